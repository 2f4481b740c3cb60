//! Quote feed types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// One 1-minute bar as returned by the market-data provider
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Market timestamp of the bar
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Raw provider volume, coerced when a [`Quote`] is built
    pub volume: f64,
}

/// Latest observation for a symbol, stamped with the time it was fetched
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    /// Unix seconds at fetch time, not the bar's market time
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Quote {
    /// Build a quote from the latest bar of a symbol
    pub fn from_bar(
        symbol: impl Into<String>,
        bar: &Bar,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, FetchError> {
        let symbol = symbol.into();

        if !bar.volume.is_finite() || bar.volume < 0.0 {
            return Err(FetchError::InvalidBar {
                symbol,
                reason: format!("volume {} is not a non-negative number", bar.volume),
            });
        }

        Ok(Self {
            symbol,
            timestamp: fetched_at.timestamp(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            // Truncates toward zero
            volume: bar.volume as u64,
        })
    }
}

/// Quote retrieval errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure talking to the provider
    #[error("Request for {symbol} failed: {source}")]
    Request {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },
    /// Provider answered with an unexpected status
    #[error("Provider returned {status} for {symbol}: {body}")]
    Status {
        symbol: String,
        status: u16,
        body: String,
    },
    /// Response body could not be decoded
    #[error("Could not decode response for {symbol}: {message}")]
    Decode { symbol: String, message: String },
    /// Provider row could not be turned into a quote
    #[error("Invalid bar for {symbol}: {reason}")]
    InvalidBar { symbol: String, reason: String },
}
