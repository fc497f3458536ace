//! Handles settings for the application.
//!
//! Values are read from `config/fuelog.toml` (optional) and then from
//! `FUELOG__*` environment variables, e.g. `FUELOG__SERVER__PORT=8080`.
//!
//! ```toml
//! [app]
//! level = "info"
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 3000
//! database = { sqlite = "fuelog.db" }
//!
//! [stats]
//! consumption_basis = "include_first_fill"
//! ```
use config::{Config, ConfigError, Environment, File};
use engine::ConsumptionBasis;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/fuelog";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub consumption_basis: ConsumptionBasis,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    pub stats: Stats,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("FUELOG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_builder(Config::builder().add_source(File::with_name(&path).required(false)))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(Environment::with_prefix("FUELOG").separator("__"))
            .build()?
            .try_deserialize()
    }
}
