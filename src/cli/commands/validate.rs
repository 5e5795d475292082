//! Validate configuration command.

use anyhow::Result;
use trading_config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("Instruments: {}", config.monitor.instruments.join(", "));
    println!(
        "Timeframe: {} | refresh every {}s | cache TTL {}s",
        config.monitor.timeframe.label(),
        config.monitor.refresh_interval_secs,
        config.monitor.cache_ttl().as_secs()
    );
    println!(
        "Discord: {}",
        if config.discord.webhook_url().is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
