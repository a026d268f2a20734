//! Antiyoy level tool.
//!
//! Loads level files and prints them, checks them, answers neighbor queries
//! and runs AI players against them.

use antiyoy_core::Coord;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "antiyoy")]
#[command(about = "Inspect Antiyoy levels and run AI players on them")]
struct Cli {
    /// Level file to load
    #[arg(
        long,
        global = true,
        env = "ANTIYOY_LEVEL",
        default_value = "levels/test_level.txt"
    )]
    level: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the level grid
    Show,
    /// Validate the level and summarize tile ownership
    Check,
    /// List the six neighbors of a tile
    Neighbors {
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
    },
    /// Dump the level as JSON
    Json,
    /// Register AI players (ids 1, 2, ...) and ask each for its moves
    Run {
        /// AI names, e.g. "antiyoy"
        #[arg(required = true)]
        ais: Vec<String>,
    },
    /// Rewrite the level in canonical layout
    Normalize {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!("Using level file {}", cli.level.display());

    let level = commands::load(&cli.level)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Show => commands::show(&level, &mut out),
        Commands::Check => commands::check(&level, &mut out),
        Commands::Neighbors { x, y } => commands::neighbors(&level, Coord::new(x, y), &mut out),
        Commands::Json => commands::json(&level, &mut out),
        Commands::Run { ais } => commands::run(&level, ais.as_slice(), &mut out),
        Commands::Normalize { output } => commands::normalize(&level, &output),
    }
}
