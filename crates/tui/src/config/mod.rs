use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use engine::Currency;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/fincontrol.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub source: SourceKind,
    pub file: String,
    pub page_size: u32,
    pub currency: Currency,
    pub window_days: u32,
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            source: SourceKind::Http,
            file: "movements.json".to_string(),
            page_size: 50,
            currency: Currency::Eur,
            window_days: 0,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Analytics window, `None` when every movement counts.
    pub fn window(&self) -> Option<u32> {
        (self.window_days > 0).then_some(self.window_days)
    }
}

#[derive(Debug, Clone, Default, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    #[default]
    Tui,
    /// Print totals, balance and expense breakdown.
    Summary {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the movement table.
    List,
    /// Write all movements to a CSV file.
    Export {
        /// Destination path.
        path: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(name = "fincontrol_tui", version, about = "Income and expense dashboard")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8080).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override the movement source.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,
    /// Override the JSON file read by the file source.
    #[arg(long, global = true)]
    file: Option<String>,
    /// Override the display currency (EUR, USD, BRL).
    #[arg(long, global = true)]
    currency: Option<String>,
    /// Only consider the last N days (0 = everything).
    #[arg(long, global = true)]
    window_days: Option<u32>,
    /// Write logs to this file.
    #[arg(long, global = true)]
    log_file: Option<String>,
}

pub fn load() -> Result<(AppConfig, Command)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINCONTROL_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(source) = args.source {
        settings.source = source;
    }
    if let Some(file) = args.file {
        settings.file = file;
    }
    if let Some(currency) = args.currency {
        settings.currency = Currency::try_from(currency.as_str())?;
    }
    if let Some(window_days) = args.window_days {
        settings.window_days = window_days;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    if settings.page_size == 0 {
        return Err(AppError::InvalidConfig(
            "page_size must be positive".to_string(),
        ));
    }

    Ok((settings, args.command.unwrap_or_default()))
}
