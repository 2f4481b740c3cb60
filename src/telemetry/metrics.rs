//! Prometheus metrics

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Market-data request
    Fetch,
    /// Firehose submission
    Submit,
    /// Full pass over the symbol list
    Cycle,
}

/// Per-symbol counters
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Records accepted by the sink
    RecordsSent,
    /// Symbols the provider had no data for
    SymbolsSkipped,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::Fetch => "tickerstream_fetch_latency_ms",
            LatencyMetric::Submit => "tickerstream_submit_latency_ms",
            LatencyMetric::Cycle => "tickerstream_cycle_duration_ms",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::RecordsSent => "tickerstream_records_sent_total",
            CounterMetric::SymbolsSkipped => "tickerstream_symbols_skipped_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric.name()).record(ms);
    tracing::trace!(metric = metric.name(), value_ms = ms, "Recording latency");
}

/// Increment a per-symbol counter
pub fn increment(metric: CounterMetric, symbol: &str) {
    metrics::counter!(metric.name(), "symbol" => symbol.to_string()).increment(1);
}

/// Serve metrics in Prometheus text format on `0.0.0.0:port`
pub fn start_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}
