//! presence-hook: CLI front end for presence payload synthesis.
//!
//! Editor hosts without an in-process integration pipe a JSON snapshot to this
//! binary on every refresh and forward the printed payload to the presence
//! service.
//!
//! ## Subcommands
//!
//! - `refresh`: Build a payload from a snapshot on stdin
//! - `render`: Preview a single template against a snapshot on stdin
//! - `config`: Print the effective configuration

mod logging;
mod refresh;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "presence-hook")]
#[command(about = "Editor presence payload builder")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a presence payload (reads a refresh request from stdin)
    Refresh {
        /// Configuration file (defaults to ~/.editor-presence/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Start-timestamp state file (defaults to ~/.editor-presence/state.json)
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Render one template (reads a refresh request from stdin)
    Render {
        #[arg(value_name = "TEMPLATE")]
        template: String,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Refresh { config, state } => refresh::run(config, state),
        Commands::Render { template, config } => render::run(&template, config),
        Commands::Config { config } => print_config(config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "presence-hook failed");
        eprintln!("presence-hook: {}", e);
        std::process::exit(1);
    }
}

fn print_config(config_path: Option<PathBuf>) -> Result<(), String> {
    let config = presence_core::load_config(config_path)?;
    print!("{}", presence_core::config_to_toml(&config)?);
    Ok(())
}
