//! Quote feed module
//!
//! Retrieves the latest 1-minute bar per symbol from Yahoo Finance

mod types;
mod yahoo;

pub use types::{Bar, FetchError, Quote};
pub use yahoo::{YahooChartClient, YahooConfig, YAHOO_API_URL};

use async_trait::async_trait;

/// Trait for market-data providers
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Latest bar for `symbol` on the current trading day.
    ///
    /// `Ok(None)` means the provider had nothing for the symbol; callers skip it.
    async fn latest_bar(&self, symbol: &str) -> Result<Option<Bar>, FetchError>;
}
