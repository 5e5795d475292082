//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DiscordSettings, ExchangeSettings, LoggingConfig, MonitorSettings,
};

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use std::path::Path;

/// Environment variable prefix, e.g. `SIGNALS__MONITOR__TIMEFRAME=4h`.
pub const ENV_PREFIX: &str = "SIGNALS";

/// Keys whose environment value is a comma-separated list.
const LIST_KEYS: [&str; 1] = ["monitor.instruments"];

/// Load configuration from an optional file and the environment.
///
/// Missing sections and fields fall back to defaults. A path that is given
/// must exist. `SIGNALS__MONITOR__INSTRUMENTS` takes a comma-separated list.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(path, None)
}

/// Parse configuration from TOML text, without environment overrides.
pub fn from_toml_str(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

/// `env` replaces the process environment when given.
fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    builder
        .add_source(environment().source(env))
        .build()?
        .try_deserialize()
}

fn environment() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}
