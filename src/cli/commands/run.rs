//! Continuous monitoring command.

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::info;
use trading_config::AppConfig;
use trading_monitor::{render_text, Dashboard, DashboardState};
use trading_signals::PassReport;

use crate::cli::RunArgs;

const DASHBOARD_TICK_MS: u64 = 250;

pub async fn run(args: RunArgs, config: AppConfig) -> Result<()> {
    config.validate()?;

    let notifier = super::build_notifier(&config)?;
    let mut refresh = super::build_refresh_loop(&config, notifier)?;
    let reports = refresh.subscribe();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(async move { refresh.run(shutdown_rx).await });

    if args.headless {
        print_reports(reports).await;
    } else {
        let state = DashboardState {
            timeframe: config.monitor.timeframe,
            report: None,
            thresholds: config.thresholds,
            rsi_period: config.indicators.rsi_period,
        };
        tokio::task::spawn_blocking(move || {
            Dashboard::new(DASHBOARD_TICK_MS).run(|| DashboardState {
                report: reports.borrow().clone(),
                ..state.clone()
            })
        })
        .await
        .context("Dashboard task failed")?
        .context("Terminal error")?;
    }

    info!("Shutting down");
    shutdown_tx.send_replace(true);
    worker.await.context("Refresh loop panicked")?;

    Ok(())
}

async fn print_reports(mut reports: watch::Receiver<Option<PassReport>>) {
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = reports.borrow_and_update().clone();
                if let Some(report) = report {
                    println!("{}", render_text(&report));
                }
            }
        }
    }
}
