//! Single pass command.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use trading_config::AppConfig;
use trading_monitor::render_text;
use trading_notify::NoopNotifier;

use crate::cli::{OnceArgs, OutputFormat};

pub async fn run(args: OnceArgs, config: AppConfig) -> Result<()> {
    config.validate()?;

    // One-off passes never announce anything
    let mut refresh = super::build_refresh_loop(&config, Arc::new(NoopNotifier))?;
    let report = refresh.run_once().await;

    match args.output {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    if report.critical_failure {
        bail!("Could not fetch data for any instrument");
    }
    Ok(())
}
