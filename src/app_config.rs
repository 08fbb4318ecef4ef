use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::names::DisplayMode;
use crate::providers::google;
use crate::rebuild::DEFAULT_DESTINATION_SUFFIX;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Destination language code; empty means ask the operator
    #[serde(default)]
    pub target_language: String,

    /// How translated names are displayed; `None` means ask the operator
    #[serde(default)]
    pub display_mode: Option<DisplayMode>,

    /// Text appended to the source folder name for the translated copy
    #[serde(default = "default_destination_suffix")]
    pub destination_suffix: String,

    /// Translation backend settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslatorConfig {
    // @field: Translation endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: URL fetched by the reachability probe
    #[serde(default = "default_probe_url")]
    pub probe_url: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Delay between consecutive requests
    #[serde(default)]
    pub rate_limit_delay_ms: u64,

    // @field: Retry count for failed requests
    #[serde(default)]
    pub retry_count: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            probe_url: default_probe_url(),
            timeout_secs: default_timeout_secs(),
            rate_limit_delay_ms: 0,
            retry_count: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_destination_suffix() -> String {
    DEFAULT_DESTINATION_SUFFIX.to_string()
}

fn default_endpoint() -> String {
    google::DEFAULT_ENDPOINT.to_string()
}

fn default_probe_url() -> String {
    google::DEFAULT_PROBE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_language: String::new(),
            display_mode: None,
            destination_suffix: default_destination_suffix(),
            translator: TranslatorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration file, or fall back to defaults if it does not exist.
    ///
    /// Nothing is written when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write config to file: {}", path.as_ref().display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.target_language.is_empty() {
            crate::language_utils::validate_language_code(&self.target_language)?;
        }

        if self.destination_suffix.trim().is_empty() {
            return Err(anyhow!("Destination suffix cannot be empty"));
        }
        if !crate::validator::is_valid_name(&format!("x{}", self.destination_suffix)) {
            return Err(anyhow!(
                "Destination suffix '{}' is not valid in a folder name",
                self.destination_suffix
            ));
        }

        if self.translator.timeout_secs == 0 {
            return Err(anyhow!("Translator timeout must be greater than zero"));
        }
        url::Url::parse(&self.translator.endpoint)
            .with_context(|| format!("Invalid translator endpoint: {}", self.translator.endpoint))?;
        url::Url::parse(&self.translator.probe_url)
            .with_context(|| format!("Invalid probe URL: {}", self.translator.probe_url))?;

        Ok(())
    }
}
