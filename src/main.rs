//! Futures signal monitor CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use trading_monitor::{setup_logging, LogOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = cli::commands::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    match &cli.command {
        Commands::Run(args) => cli::commands::apply_selection(&mut config, &args.selection),
        Commands::Once(args) => cli::commands::apply_selection(&mut config, &args.selection),
        Commands::ValidateConfig => {}
    }

    // Setup logging; the dashboard owns stdout while it runs
    let _log_guard = setup_logging(LogOptions {
        level: &config.logging.level,
        json: config.logging.format == "json",
        console: !cli.command.uses_dashboard(),
        file_dir: config.logging.file.as_deref().map(Path::new),
    });

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, config).await,
        Commands::Once(args) => cli::commands::once::run(args, config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&config).await,
    }
}
