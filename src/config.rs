//! Configuration types for ticker-stream

use crate::feed::{YahooConfig, YAHOO_API_URL};
use crate::poller::PollerConfig;
use crate::sink::FirehoseConfig;
use crate::telemetry::LogFormat;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poller: PollerSection,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Polling loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerSection {
    /// Firehose delivery stream name
    #[serde(default = "default_delivery_stream")]
    pub delivery_stream: String,

    /// Ticker symbols, polled in this order
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Pause between cycles (seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_delivery_stream() -> String {
    "stock-market-data".to_string()
}
fn default_symbols() -> Vec<String> {
    [
        "AAPL", "MSFT", "GOOGL", "NFLX", "AMZN", "META", "ADBE", "ABNB", "NVDA",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_interval_secs() -> u64 {
    60
}

impl Default for PollerSection {
    fn default() -> Self {
        Self {
            delivery_stream: default_delivery_stream(),
            symbols: default_symbols(),
            interval_secs: default_interval_secs(),
        }
    }
}

/// Market-data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header; the provider default is used when unset
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    YAHOO_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Ingestion sink configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SinkConfig {
    /// AWS region override
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override (e.g., "http://localhost:4566" for LocalStack)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Plain,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, using the bundled example only when `path` does not exist
    ///
    /// Parse and validation errors in an existing file are returned as-is.
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Warning: {} not found, using default configuration", path.display());
                let config: Config = toml::from_str(include_str!("../config.toml.example"))?;
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to read {}", path.display()))),
        }
    }

    /// Reject configurations the poller cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poller.delivery_stream.trim().is_empty() {
            anyhow::bail!("poller.delivery_stream must not be empty");
        }
        if self.poller.symbols.is_empty() {
            anyhow::bail!("poller.symbols must list at least one symbol");
        }
        if let Some(i) = self.poller.symbols.iter().position(|s| s.trim().is_empty()) {
            anyhow::bail!("poller.symbols[{}] is empty", i);
        }
        if self.poller.interval_secs == 0 {
            anyhow::bail!("poller.interval_secs must be greater than 0");
        }
        Ok(())
    }

    /// Settings for the polling loop
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            delivery_stream: self.poller.delivery_stream.clone(),
            symbols: self.poller.symbols.clone(),
            interval: Duration::from_secs(self.poller.interval_secs),
        }
    }

    /// Settings for the Yahoo chart client
    pub fn yahoo_config(&self) -> YahooConfig {
        let mut config = YahooConfig {
            base_url: self.provider.base_url.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
            ..Default::default()
        };
        if let Some(ref ua) = self.provider.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }

    /// Settings for the Firehose client
    pub fn firehose_config(&self) -> FirehoseConfig {
        FirehoseConfig {
            region: self.sink.region.clone(),
            endpoint_url: self.sink.endpoint_url.clone(),
        }
    }
}
