//! Reversi-Rust: a small-board Reversi engine with search agents.
//!
//! This crate provides the board state machine for Reversi (Othello) on a
//! small square grid together with agents that pick moves for either side.
//!
//! ## Modules
//!
//! - [`constants`] - Board size and search budgets
//! - [`board`] - Players, cell grid and capture line scanning
//! - [`position`] - Game state, legal moves, move application and status
//! - [`weights`] - Static positional weight tables
//! - [`playout`] - Random game simulation
//! - [`agent`] - The agent interface and agent factory
//! - [`greedy`] - Random, greedy and weighted-greedy agents
//! - [`minimax`] - Alpha-beta search agent
//! - [`mcts`] - Flat Monte Carlo and UCT agents
//! - [`game`] - Game construction and the play loop
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use reversi_rust::agent::Agent;
//! use reversi_rust::game::{new_game, run_game};
//! use reversi_rust::greedy::GreedyAgent;
//! use reversi_rust::mcts::UctMctsAgent;
//!
//! // Ask the UCT agent for an opening move
//! let mut pos = new_game();
//! let mut uct = UctMctsAgent::with_seed(100, 7);
//! let mv = uct.decide(&mut pos).unwrap();
//! println!("UCT played {mv:?}");
//!
//! // Play a whole game
//! let record = run_game(&mut GreedyAgent, &mut UctMctsAgent::with_seed(50, 1)).unwrap();
//! println!("{}", record.status);
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod greedy;
pub mod mcts;
pub mod minimax;
pub mod playout;
pub mod position;
pub mod weights;
