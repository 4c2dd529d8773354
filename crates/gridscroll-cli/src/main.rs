use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridscroll_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "gridscroll")]
#[command(author, version, about = "Scroll physics for virtual tables, with a terminal demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.config/gridscroll/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo table
    Run,
    /// Replay an input script headlessly and print every signal as a JSON line
    Replay {
        /// Path to the JSON script
        script: PathBuf,
        /// Skip translate and scroll signals
        #[arg(long)]
        lifecycle_only: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Show engine options after normalization
        #[arg(long)]
        normalized: bool,
        /// Write the configuration to the config path
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the screen, so it only lets warnings through by default
    let default_filter = if matches!(cli.command, Some(Commands::Run) | None) {
        "warn"
    } else {
        "info"
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(&config),
        Some(Commands::Replay {
            script,
            lifecycle_only,
        }) => commands::replay::run(&config, &script, lifecycle_only),
        Some(Commands::Config { normalized, write }) => {
            commands::config::run(&config, &config_path, normalized, write)
        }
    }
}
