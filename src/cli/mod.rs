//! Command-line interface for openclaw-agent
//!
//! Running without a subcommand behaves like `add`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod add;
mod list;
pub mod prompt;

pub use add::AddArgs;
pub use list::ListArgs;

/// Register OpenClaw agents, models and API-key auth profiles
#[derive(Parser)]
#[command(name = "openclaw-agent", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log debug detail about loaded files, merge steps and writes
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or update an agent, its model and its API key (default)
    Add(AddArgs),

    /// Show configured agents and their auth profiles
    List(ListArgs),
}

impl Commands {
    fn execute(self) -> Result<()> {
        match self {
            Self::Add(args) => add::run(args),
            Self::List(args) => list::run(args),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli.command.unwrap_or_else(|| Commands::Add(AddArgs::default())).execute()
}

/// Diagnostics go to stderr so stdout carries only operator messages.
/// `RUST_LOG` directives are honoured on top of the chosen level.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();
}
