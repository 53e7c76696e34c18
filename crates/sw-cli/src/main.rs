//! Headless match runner for Spacewar.

mod commands;
mod pilot;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "spacewar",
    about = "Spacewar: two ships, one gravity well, a fixed energy budget",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an autopilot-vs-autopilot match and print a summary
    Simulate {
        /// Maximum number of ticks to run (default: one minute at 60 ticks/s)
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// RNG seed for deterministic jumps
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// TOML file overriding tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Spare lives per ship (overrides the tuning file)
        #[arg(short, long)]
        lives: Option<i32>,

        /// Show all events (not just a summary)
        #[arg(short, long)]
        verbose: bool,

        /// Print the final state as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Print tuning values as TOML
    Tuning {
        /// Validate and print this override file merged over the defaults
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            ticks,
            seed,
            tuning,
            lives,
            verbose,
            json,
        } => commands::simulate::run(
            commands::simulate::Options {
                ticks,
                seed,
                tuning,
                lives,
            },
            verbose,
            json,
        ),
        Commands::Tuning { file } => commands::tuning::run(file.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
