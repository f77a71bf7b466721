//! Application settings, read from `settings.toml`.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter applied to every workspace crate.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Expenses {
    pub bind: Option<String>,
    pub port: u16,
    /// SQLite database path. Absent means an in-memory database.
    pub database: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Analytics {
    pub bind: Option<String>,
    pub port: u16,
    /// Base URL of the expenses service. Defaults to the local expenses
    /// service configured above.
    pub expenses_url: Option<String>,
    /// Upstream request timeout in seconds (default 10).
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub expenses: Option<Expenses>,
    pub analytics: Option<Analytics>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
