use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::gnss::ConstellationTable;
use crate::ingest::DEFAULT_PORT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gpsd: GpsdConfig,
    #[serde(default)]
    pub web: WebConfig,
    pub watchdog: WatchdogConfig,
    /// Identifier numbering plan, first matching range wins
    #[serde(default)]
    pub constellations: ConstellationTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GpsdConfig {
    #[serde(default = "default_gpsd_host")]
    pub host: String,
    #[serde(default = "default_gpsd_port")]
    pub port: u16,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl GpsdConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GpsdConfig {
    fn default() -> Self {
        Self {
            host: default_gpsd_host(),
            port: default_gpsd_port(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_gpsd_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gpsd_port() -> u16 {
    DEFAULT_PORT
}

fn default_channel_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Served at `/` when set (dashboard page, scripts)
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchdogConfig {
    /// Monitored file. strftime escapes are expanded on every check, so
    /// `/var/log/gps/%Y-%m-%d-webdash.log` follows the daily file.
    pub log_file: String,
    #[serde(default = "default_interval", deserialize_with = "humantime_duration")]
    pub interval: Duration,
    #[serde(default = "default_threshold", deserialize_with = "humantime_duration")]
    pub threshold: Duration,
    #[serde(default)]
    pub alarm: AlarmConfig,
}

fn default_interval() -> Duration {
    Duration::from_millis(500)
}

fn default_threshold() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlarmConfig {
    /// File receiving `1`/`0`; the level is only logged when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub active_low: bool,
}

fn humantime_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.watchdog.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "watchdog.interval must be greater than zero".into(),
            ));
        }
        if self.gpsd.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "gpsd.channel_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
