//! slipgrid CLI - Q-learning on small grid worlds with hazards and sliding moves
//!
//! This CLI provides:
//! - Multi-level campaigns on randomly drawn layouts
//! - Training and path extraction on a single hand-placed layout
//! - JSON, CSV and JSONL exports of what was learned

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slipgrid")]
#[command(version, about = "Tabular Q-learning on grids with hazards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a multi-level campaign on random grids
    Run(Box<slipgrid::cli::commands::run::RunArgs>),

    /// Train on one layout with explicit start, goal and hazards
    Solve(Box<slipgrid::cli::commands::solve::SolveArgs>),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Run(args) => args.common.verbose,
            Commands::Solve(args) => args.common.verbose,
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `info` with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Run(args) => slipgrid::cli::commands::run::execute(*args),
        Commands::Solve(args) => slipgrid::cli::commands::solve::execute(*args),
    }
}
