// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meeple - a local mirror of your remote board-game catalog.
//!
//! This is the binary entry point for the meeple CLI.

use clap::{Parser, Subcommand};

mod collection;
mod credentials;
mod plays;
mod status;
mod sync;

/// Meeple - a local mirror of your remote board-game catalog.
#[derive(Parser, Debug)]
#[command(name = "meeple", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the collection and play log from the remote service.
    Sync {
        /// Sync this account instead of the configured one.
        #[arg(long)]
        username: Option<String>,
    },
    /// Show last-sync times and local record counts.
    Status {
        /// Emit structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// List the locally stored collection.
    Collection {
        /// Emit structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// List locally stored plays, most recent first.
    Plays {
        /// Show at most this many plays.
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Emit structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meeple={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match meeple_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("meeple: invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log.level);

    let result = match cli.command {
        Some(Commands::Sync { username }) => sync::run_sync(&config, username).await,
        Some(Commands::Status { json }) => status::run_status(&config, json).await,
        Some(Commands::Collection { json }) => collection::run_collection(&config, json).await,
        Some(Commands::Plays { limit, json }) => plays::run_plays(&config, limit, json).await,
        None => {
            println!("meeple: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("meeple: {e}");
        std::process::exit(1);
    }
}
