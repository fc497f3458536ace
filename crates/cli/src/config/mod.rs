use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use engine::ConsumptionBasis;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/fuelog_cli.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// When set, entries live in this JSON file instead of on the server.
    pub local_path: Option<String>,
    pub consumption_basis: ConsumptionBasis,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            local_path: None,
            consumption_basis: ConsumptionBasis::default(),
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the fill-up history, most recent first.
    List,
    /// Print average consumption, total cost and total distance.
    Stats,
    /// Record a fill-up.
    Add {
        /// Day of the fill-up (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Fuel volume in liters.
        #[arg(long)]
        liters: f64,
        /// Total amount paid.
        #[arg(long)]
        price: f64,
        /// Odometer reading in km.
        #[arg(long)]
        odometer: u64,
    },
    /// Delete a fill-up by id.
    Delete { id: Uuid },
}

#[derive(Debug, Parser)]
#[command(name = "fuelog_cli", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Keep entries in a local JSON file instead of the server.
    #[arg(long)]
    local: Option<String>,
    /// include_first_fill (default) or exclude_first_fill.
    #[arg(long, value_parser = parse_basis)]
    consumption_basis: Option<ConsumptionBasis>,
    #[command(subcommand)]
    command: Command,
}

fn parse_basis(value: &str) -> std::result::Result<ConsumptionBasis, String> {
    match value {
        "include_first_fill" => Ok(ConsumptionBasis::IncludeFirstFill),
        "exclude_first_fill" => Ok(ConsumptionBasis::ExcludeFirstFill),
        other => Err(format!(
            "unknown basis '{other}', expected include_first_fill or exclude_first_fill"
        )),
    }
}

pub fn load() -> Result<(AppConfig, Command)> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<(AppConfig, Command)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FUELOG_CLI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(local) = args.local {
        settings.local_path = Some(local);
    }
    if let Some(basis) = args.consumption_basis {
        settings.consumption_basis = basis;
    }
    if settings.base_url.trim().is_empty() && settings.local_path.is_none() {
        return Err(AppError::Argument(
            "either base_url or a local file is required".to_string(),
        ));
    }

    Ok((settings, args.command))
}
