//! Hindsight CLI — the main entry point.
//!
//! Commands:
//! - `inject` — Read a prompt payload from stdin, emit an example block
//! - `status` — Show resolved configuration and corpus statistics
//!
//! `inject` is the hook entry and the default command. It always exits 0:
//! the surrounding prompt pipeline must never be failed by this engine.
//! Diagnostics go to stderr; stdout carries only the injectable block.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "hindsight",
    about = "Hindsight — few-shot episodic memory for prompt pipelines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a JSON payload from stdin and print the injectable block
    Inject,

    /// Show resolved configuration and corpus statistics
    Status,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Commands::Inject) {
        Commands::Inject => commands::inject::run(),
        Commands::Status => commands::status::run(),
    }
}
