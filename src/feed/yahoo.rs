//! Yahoo Finance chart API client
//!
//! Requests the current trading day at 1-minute granularity and returns the
//! latest complete bar. Symbols the provider does not know, or days without
//! any complete bar, come back as "no data" rather than an error.

use super::{Bar, FetchError, QuoteSource};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance chart API base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

/// Default user agent; the chart endpoint rejects requests without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration for the Yahoo chart client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client for the Yahoo Finance chart endpoint
pub struct YahooChartClient {
    base_url: Url,
    client: Client,
}

impl YahooChartClient {
    /// Create a new client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: YahooConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid provider URL {}: {}", config.base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Provider URL {} cannot carry a path", config.base_url);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { base_url, client })
    }

    /// Build the chart URL for a symbol, percent-encoding it as one path segment
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }
}

#[async_trait]
impl QuoteSource for YahooChartClient {
    async fn latest_bar(&self, symbol: &str) -> Result<Option<Bar>, FetchError> {
        let url = self.chart_url(symbol);

        tracing::debug!(url = %url, symbol, "Fetching 1m chart");

        let response = self
            .client
            .get(url)
            .query(&[("range", "1d"), ("interval", "1m")])
            .send()
            .await
            .map_err(|source| FetchError::Request {
                symbol: symbol.to_string(),
                source,
            })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(symbol, "Provider does not know symbol, no data");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            symbol: symbol.to_string(),
            source,
        })?;

        parse_chart(symbol, &body)
    }
}

/// Chart endpoint envelope
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    /// Bar open times in Unix seconds
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

/// Column-oriented OHLCV; missing minutes are padded with nulls
#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl QuoteColumns {
    /// Complete row at index `i`, if every column has a value there
    fn row(&self, i: usize) -> Option<(f64, f64, f64, f64, f64)> {
        Some((
            (*self.open.get(i)?)?,
            (*self.high.get(i)?)?,
            (*self.low.get(i)?)?,
            (*self.close.get(i)?)?,
            (*self.volume.get(i)?)?,
        ))
    }
}

/// Parse a chart body into the latest complete bar
fn parse_chart(symbol: &str, body: &str) -> Result<Option<Bar>, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

    if let Some(err) = response.chart.error {
        tracing::debug!(
            symbol,
            code = %err.code,
            description = err.description.as_deref().unwrap_or(""),
            "Provider reported an error, no data"
        );
        return Ok(None);
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let Some(columns) = result.indicators.quote.into_iter().next() else {
        return Ok(None);
    };

    for (i, ts) in timestamps.iter().enumerate().rev() {
        let Some((open, high, low, close, volume)) = columns.row(i) else {
            continue;
        };

        let time = Utc
            .timestamp_opt(*ts, 0)
            .single()
            .ok_or_else(|| FetchError::Decode {
                symbol: symbol.to_string(),
                message: format!("bar timestamp {} out of range", ts),
            })?;

        return Ok(Some(Bar {
            time,
            open,
            high,
            low,
            close,
            volume,
        }));
    }

    Ok(None)
}
