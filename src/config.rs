//! Layered settings: built-in defaults, then an optional TOML file, then
//! `KRIPTO__SECTION__KEY` environment variables.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::market_data::adapters::coingecko::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::market_data::cache::DEFAULT_TTL;
use crate::report::rank::DEFAULT_TOP_N;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub cache: CacheSettings,
    pub report: ReportSettings,
    pub log: LogSettings,
    pub metrics: MetricsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub top_n: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub port: u16,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.bind", "127.0.0.1:8501")?
            .set_default("upstream.base_url", DEFAULT_BASE_URL)?
            .set_default("upstream.timeout_secs", DEFAULT_TIMEOUT.as_secs() as i64)?
            .set_default("cache.ttl_secs", DEFAULT_TTL.as_secs() as i64)?
            .set_default("report.top_n", DEFAULT_TOP_N as i64)?
            .set_default("log.filter", "info")?
            .set_default("metrics.port", 9000_i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix("KRIPTO").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_n == 0 {
            return Err(ConfigError::Message("report.top_n must be at least 1".into()));
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Message("cache.ttl_secs must be at least 1".into()));
        }
        Ok(())
    }
}
