//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trading_core::types::Timeframe;

#[derive(Parser)]
#[command(name = "signal-watch")]
#[command(author, version, about = "Futures RSI/SMA signal monitor with Discord alerts")]
pub struct Cli {
    /// Configuration file path [default: config/default.toml when present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor continuously
    Run(RunArgs),
    /// Run a single pass and print the result
    Once(OnceArgs),
    /// Validate configuration
    ValidateConfig,
}

impl Commands {
    /// Whether the command draws the terminal dashboard.
    pub fn uses_dashboard(&self) -> bool {
        matches!(self, Commands::Run(args) if !args.headless)
    }
}

/// Instrument selection shared by the monitoring commands.
#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Candle timeframe (e.g. 15m, 1h, 4h)
    #[arg(short, long)]
    pub timeframe: Option<Timeframe>,

    /// Symbols to monitor (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Print a table per pass instead of drawing the dashboard
    #[arg(long)]
    pub headless: bool,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(clap::Args)]
pub struct OnceArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
