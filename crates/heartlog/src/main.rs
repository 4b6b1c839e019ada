//! heartlog - journaling CLI
//!
//! Today-word, memory timeline, emotion history and conversation analysis
//! over the same data directory the web server uses.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heartlog_core::{Config, Store};

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("heartlog=warn".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    let store = Store::new(&config.paths.data_dir);
    debug!("Data directory: {}", store.data_dir().display());

    // Execute command
    match cli.command {
        Commands::Word(cmd) => commands::word::execute(cmd, &store),
        Commands::Memories(args) => commands::memories::execute(args, &store),
        Commands::Emotions(args) => commands::emotions::execute(args, &store),
        Commands::Analyze(args) => commands::analyze::execute(args, &config, &store).await,
        Commands::Doctor => commands::doctor::execute(&config),
        Commands::Version => {
            println!("heartlog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
