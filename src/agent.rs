//! The agent interface and the closed set of built-in agents.
//!
//! Every agent answers one question: given a position, which legal move does
//! the player to move make? [`Agent::decide`] then commits that move on the
//! live position.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::Coord;
use crate::constants::{NAIVE_PLAYOUTS, N, UCT_ITERATIONS};
use crate::error::{GameError, Result};
use crate::greedy::{GreedyAgent, RandomAgent, WeightedGreedyAgent};
use crate::mcts::{NaiveMctsAgent, UctMctsAgent};
use crate::minimax::AlphaBetaAgent;
use crate::position::{LegalMoves, Position};

pub trait Agent {
    /// Short display name.
    fn name(&self) -> &str;

    /// Choose a legal move for the player to move without touching `pos`.
    fn select_move(&mut self, pos: &Position) -> Result<Coord>;

    /// Choose a move and apply it to `pos`.
    ///
    /// Callers must only invoke this while the game is active.
    fn decide(&mut self, pos: &mut Position) -> Result<Coord> {
        let player = pos.turn();
        let mv = self.select_move(pos)?;
        pos.apply_move(player, mv)?;
        debug!(agent = self.name(), %player, ?mv, "move committed");
        Ok(mv)
    }
}

/// Legal moves for the player to move, or `NoLegalMoves` if there are none.
pub fn candidate_moves(pos: &Position) -> Result<&LegalMoves> {
    let moves = pos.legal_moves(pos.turn());
    if !pos.is_active() || moves.is_empty() {
        return Err(GameError::NoLegalMoves { player: pos.turn() });
    }
    Ok(moves)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Random,
    Greedy,
    WeightedGreedy,
    AlphaBeta,
    NaiveMcts,
    UctMcts,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Random,
        AgentKind::Greedy,
        AgentKind::WeightedGreedy,
        AgentKind::AlphaBeta,
        AgentKind::NaiveMcts,
        AgentKind::UctMcts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Greedy => "greedy",
            AgentKind::WeightedGreedy => "weighted",
            AgentKind::AlphaBeta => "alpha-beta",
            AgentKind::NaiveMcts => "naive-mcts",
            AgentKind::UctMcts => "uct-mcts",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.to_lowercase();
        AgentKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = AgentKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown agent '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Settings used by [`build_agent`].
#[derive(Clone, Debug)]
pub struct AgentOptions {
    /// Board size the agent will play on
    pub size: usize,
    /// Seed for stochastic agents (`None` = unseeded)
    pub seed: Option<u64>,
    /// Playouts per decision for the flat Monte Carlo agent
    pub playouts: usize,
    /// Iterations per decision for the UCT agent
    pub iterations: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            size: N,
            seed: None,
            playouts: NAIVE_PLAYOUTS,
            iterations: UCT_ITERATIONS,
        }
    }
}

/// Construct an agent of the given kind.
///
/// Fails with `GameError::Configuration` when a weighted agent is asked to
/// play on a board size without a weight table.
pub fn build_agent(kind: AgentKind, opts: &AgentOptions) -> Result<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match kind {
        AgentKind::Random => Box::new(match opts.seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        }),
        AgentKind::Greedy => Box::new(GreedyAgent),
        AgentKind::WeightedGreedy => Box::new(WeightedGreedyAgent::new(opts.size)?),
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new()),
        AgentKind::NaiveMcts => Box::new(match opts.seed {
            Some(seed) => NaiveMctsAgent::with_seed(opts.playouts, seed),
            None => NaiveMctsAgent::new(opts.playouts),
        }),
        AgentKind::UctMcts => Box::new(match opts.seed {
            Some(seed) => UctMctsAgent::with_seed(opts.iterations, seed),
            None => UctMctsAgent::new(opts.iterations),
        }),
    };
    Ok(agent)
}
