//! Polling loop
//!
//! Each cycle walks the symbol list in order and, per symbol, fetches the
//! latest bar, encodes it and submits it before moving on. Only "no data"
//! is tolerated; every other error ends the run.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::feed::{FetchError, Quote, QuoteSource};
use crate::record::{self, SerializeError};
use crate::sink::{IngestionSink, RecordId, SinkError};
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::watch;

/// Immutable settings threaded through the loop
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delivery stream records are submitted to
    pub delivery_stream: String,
    /// Symbols polled each cycle, in order
    pub symbols: Vec<String>,
    /// Pause after each cycle; not adjusted for cycle duration
    pub interval: Duration,
}

/// Fatal polling errors
#[derive(Debug, Error)]
pub enum PollerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Could not serialize quote for {symbol}: {source}")]
    Serialize {
        symbol: String,
        #[source]
        source: SerializeError,
    },
    #[error("Could not deliver quote for {symbol}: {source}")]
    Sink {
        symbol: String,
        #[source]
        source: SinkError,
    },
}

/// Outcome of one pass over the symbol list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Symbols delivered, with the id the sink assigned
    pub sent: Vec<(String, RecordId)>,
    /// Symbols the provider had no data for
    pub skipped: Vec<String>,
}

/// Fetch, encode and forward quotes on a fixed cadence
pub struct Poller {
    config: PollerConfig,
    source: Arc<dyn QuoteSource>,
    sink: Arc<dyn IngestionSink>,
    clock: Arc<dyn Clock>,
}

impl Poller {
    /// Create a poller stamping quotes with the system clock
    pub fn new(
        config: PollerConfig,
        source: Arc<dyn QuoteSource>,
        sink: Arc<dyn IngestionSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp quotes
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Poll until `stop` flips to true or an error occurs.
    ///
    /// The stop flag is checked before every cycle and raced against the
    /// sleep that follows it.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) -> Result<(), PollerError> {
        tracing::info!(
            stream = %self.config.delivery_stream,
            symbols = self.config.symbols.len(),
            interval_secs = self.config.interval.as_secs(),
            "Poller started"
        );

        loop {
            if *stop.borrow() {
                tracing::info!("Stop requested, poller exiting");
                return Ok(());
            }

            if let Err(e) = self.run_cycle().await {
                tracing::error!(error = %e, "Polling cycle failed");
                return Err(e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = stopped(&mut stop) => {
                    tracing::info!("Stop requested during pause, poller exiting");
                    return Ok(());
                }
            }
        }
    }

    /// Run a single pass over every configured symbol
    pub async fn run_cycle(&self) -> Result<CycleReport, PollerError> {
        let started = Instant::now();
        let mut report = CycleReport::default();

        for symbol in &self.config.symbols {
            match self.poll_symbol(symbol).await? {
                Some(record_id) => {
                    println!(
                        "Data sent to Kinesis Firehose for {}. RecordId: {}",
                        symbol, record_id
                    );
                    report.sent.push((symbol.clone(), record_id));
                }
                None => {
                    tracing::debug!(symbol = %symbol, "No data, skipping");
                    increment(CounterMetric::SymbolsSkipped, symbol);
                    report.skipped.push(symbol.clone());
                }
            }
        }

        record_latency(LatencyMetric::Cycle, started.elapsed());
        tracing::info!(
            sent = report.sent.len(),
            skipped = report.skipped.len(),
            "Polling cycle complete"
        );

        Ok(report)
    }

    /// Fetch, encode and submit one symbol. `None` when there was no data.
    async fn poll_symbol(&self, symbol: &str) -> Result<Option<RecordId>, PollerError> {
        let started = Instant::now();
        let bar = self.source.latest_bar(symbol).await?;
        record_latency(LatencyMetric::Fetch, started.elapsed());

        let Some(bar) = bar else {
            return Ok(None);
        };

        let quote = Quote::from_bar(symbol, &bar, self.clock.now())?;
        tracing::debug!(
            symbol,
            bar_time = %bar.time,
            close = quote.close,
            volume = quote.volume,
            "Latest bar"
        );

        let data = record::encode(&quote).map_err(|source| PollerError::Serialize {
            symbol: symbol.to_string(),
            source,
        })?;

        let started = Instant::now();
        let record_id = self
            .sink
            .put_record(&self.config.delivery_stream, data)
            .await
            .map_err(|source| PollerError::Sink {
                symbol: symbol.to_string(),
                source,
            })?;
        record_latency(LatencyMetric::Submit, started.elapsed());
        increment(CounterMetric::RecordsSent, symbol);

        Ok(Some(record_id))
    }
}

/// Resolves once the stop flag is set. Pends forever if the sender is gone.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    if stop.wait_for(|s| *s).await.is_err() {
        std::future::pending::<()>().await;
    }
}
