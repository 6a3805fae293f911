//! Unihosts - Unified Hosts File Generator
//!
//! Merges many hosts file sources into one deduplicated hosts file.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use unihosts::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Build(args) => unihosts::commands::build::run(args, &cli.config, &cli.base_dir),
        Commands::Sources { action } => {
            unihosts::commands::sources::run(action, &cli.config, &cli.base_dir)
        }
        Commands::Version => {
            println!("unihosts {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
