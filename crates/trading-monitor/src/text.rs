//! Plain-text pass reports for headless runs.

use chrono::Local;
use std::fmt::Write;
use trading_core::format::format_price;
use trading_signals::PassReport;

/// Render a pass as a fixed-width table.
pub fn render_text(report: &PassReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Pass {} | {} | {}",
        report.pass,
        report.timeframe.label(),
        report
            .finished_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );

    if report.critical_failure {
        let _ = writeln!(
            out,
            "CRITICAL: could not fetch data for any of {} instruments; waiting for the next refresh",
            report.records.len()
        );
        return out;
    }

    let _ = writeln!(out, "{:<12} {:>14} {:>9}  {}", "Coin", "Price", "RSI (14)", "Signal");
    for record in &report.records {
        let price = record
            .price
            .map_or_else(|| "-".to_string(), format_price);
        let rsi = record
            .snapshot
            .and_then(|s| s.rsi)
            .map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
        let marker = if record.notified { " *" } else { "" };

        let _ = writeln!(
            out,
            "{:<12} {:>14} {:>9}  {}{}",
            record.symbol,
            price,
            rsi,
            record.signal.label(),
            marker
        );
    }

    let _ = writeln!(
        out,
        "{} fetched, {} failed, {} notified; next refresh in {} min",
        report.successful().count(),
        report.failed_count(),
        report.notified_count(),
        report.next_refresh_in.as_secs() / 60
    );

    out
}
