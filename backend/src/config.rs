//! Configuration management for the Orchard Watering Scheduler
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with OWS_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{parse_weekday, Language, WaterSplitMode, DEFAULT_LITERS_PER_TREE_PER_WEEK, DEFAULT_WEEKS};

const DEFAULT_MAX_TOTAL_BLOCKS: u32 = 10_000;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Defaults applied to schedule requests
    pub schedule: ScheduleConfig,

    /// Export configuration
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Horizon used when a request does not give one
    pub default_weeks: u32,

    /// Longest horizon a request may ask for
    pub max_weeks: u32,

    /// Most blocks (area × blocks per unit area) a request may produce
    pub max_total_blocks: u32,

    /// Weekly rest day ("sun", "mon", ...)
    pub rest_day: String,

    /// Label language ("ja" or "en")
    pub language: String,

    /// Weekly water requirement per tree in liters
    pub liters_per_tree_per_week: Decimal,

    /// "events" or "workdays"
    pub split_mode: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Prefix CSV downloads with a UTF-8 byte order mark
    pub csv_bom: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("OWS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("schedule.default_weeks", i64::from(DEFAULT_WEEKS))?
            .set_default("schedule.max_weeks", 104)?
            .set_default("schedule.max_total_blocks", i64::from(DEFAULT_MAX_TOTAL_BLOCKS))?
            .set_default("schedule.rest_day", "sun")?
            .set_default("schedule.language", "ja")?
            .set_default(
                "schedule.liters_per_tree_per_week",
                DEFAULT_LITERS_PER_TREE_PER_WEEK.to_string(),
            )?
            .set_default("schedule.split_mode", "events")?
            .set_default("export.csv_bom", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (OWS_ prefix)
            .add_source(
                Environment::with_prefix("OWS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.schedule.check()?;
        Ok(config)
    }
}

impl ScheduleConfig {
    /// Reject string settings that do not parse, so requests never see them
    fn check(&self) -> Result<(), ConfigError> {
        self.rest_day_weekday()?;
        self.language()?;
        self.split_mode()?;
        Ok(())
    }

    pub fn rest_day_weekday(&self) -> Result<chrono::Weekday, ConfigError> {
        parse_weekday(&self.rest_day).map_err(|e| ConfigError::Message(format!("schedule.rest_day: {}", e)))
    }

    pub fn language(&self) -> Result<Language, ConfigError> {
        self.language
            .parse()
            .map_err(|e| ConfigError::Message(format!("schedule.language: {}", e)))
    }

    pub fn split_mode(&self) -> Result<WaterSplitMode, ConfigError> {
        self.split_mode
            .parse()
            .map_err(|e| ConfigError::Message(format!("schedule.split_mode: {}", e)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_weeks: DEFAULT_WEEKS,
            max_weeks: 104,
            max_total_blocks: DEFAULT_MAX_TOTAL_BLOCKS,
            rest_day: "sun".to_string(),
            language: "ja".to_string(),
            liters_per_tree_per_week: DEFAULT_LITERS_PER_TREE_PER_WEEK,
            split_mode: "events".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            schedule: ScheduleConfig::default(),
            export: ExportConfig { csv_bom: true },
        }
    }
}
