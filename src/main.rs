//! Reversi-Rust: small-board Reversi with search agents.
//!
//! ## Usage
//!
//! - `reversi-rust` - Show a demo
//! - `reversi-rust play --black uct-mcts --white greedy` - Play one game
//! - `reversi-rust demo` - Run the demo

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use reversi_rust::agent::{AgentKind, AgentOptions, build_agent};
use reversi_rust::board::Player;
use reversi_rust::constants::{N, NAIVE_PLAYOUTS, UCT_ITERATIONS};
use reversi_rust::position::Position;

/// Reversi-Rust: small-board Reversi with search agents
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two agents
    Play {
        /// Agent for Black (random, greedy, weighted, alpha-beta, naive-mcts, uct-mcts)
        #[arg(long, default_value = "uct-mcts")]
        black: AgentKind,
        /// Agent for White
        #[arg(long, default_value = "greedy")]
        white: AgentKind,
        /// Board size
        #[arg(long, default_value_t = N)]
        size: usize,
        /// Seed for the random agents
        #[arg(long)]
        seed: Option<u64>,
        /// Playouts per move for naive-mcts
        #[arg(long, default_value_t = NAIVE_PLAYOUTS)]
        playouts: usize,
        /// Iterations per move for uct-mcts
        #[arg(long, default_value_t = UCT_ITERATIONS)]
        iterations: usize,
        /// Only print the final result
        #[arg(long)]
        quiet: bool,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Play {
            black,
            white,
            size,
            seed,
            playouts,
            iterations,
            quiet,
        }) => {
            let opts = AgentOptions {
                size,
                seed,
                playouts,
                iterations,
            };
            play(black, white, &opts, quiet)
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn play(black: AgentKind, white: AgentKind, opts: &AgentOptions, quiet: bool) -> Result<()> {
    let mut pos = Position::with_size(opts.size).context("creating board")?;
    let mut black_agent = build_agent(black, opts).with_context(|| format!("building {black}"))?;
    // Offset the seed so both sides do not draw the same numbers
    let white_opts = AgentOptions {
        seed: opts.seed.map(|s| s.wrapping_add(1)),
        ..opts.clone()
    };
    let mut white_agent =
        build_agent(white, &white_opts).with_context(|| format!("building {white}"))?;

    println!("{black} (X) vs {white} (O) on {0}x{0}\n", opts.size);
    if !quiet {
        println!("{pos}\n");
    }
    while pos.is_active() {
        let player = pos.turn();
        let agent = match player {
            Player::Black => &mut black_agent,
            Player::White => &mut white_agent,
        };
        let mv = agent
            .decide(&mut pos)
            .with_context(|| format!("{player} ({}) failed to move", agent.name()))?;
        if !quiet {
            println!("{player} plays {mv:?}");
            println!("{pos}\n");
        }
    }
    println!(
        "Result: {} (Black {} - White {})",
        pos.status(),
        pos.score(Player::Black),
        pos.score(Player::White)
    );
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Reversi-Rust: small-board Reversi with search agents\n");

    println!("=== Starting Position ===");
    let pos = Position::new();
    println!("{pos}\n");
    for (mv, captured) in pos.legal_moves(pos.turn()) {
        println!("Black at {mv:?} captures {captured:?}");
    }

    println!("\n=== Opening Choices ===");
    let opts = AgentOptions {
        seed: Some(1),
        ..AgentOptions::default()
    };
    for kind in AgentKind::ALL {
        let mut agent = build_agent(kind, &opts).with_context(|| format!("building {kind}"))?;
        let mv = agent.select_move(&pos)?;
        println!("{:<11} -> {mv:?}", kind.as_str());
    }
    Ok(())
}
