//! Dry-run sink wired into the poller

use crate::common::{bar, FakeProvider};
use std::sync::Arc;
use std::time::Duration;
use ticker_stream::poller::{Poller, PollerConfig};
use ticker_stream::sink::{IngestionSink, StdoutSink};

#[tokio::test]
async fn test_dry_run_sink_receives_json_lines() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_bar("AAPL", bar(150.0, 151.0, 149.5, 150.5, 1_000_000.0))
            .with_bar("NVDA", bar(480.0, 482.0, 479.0, 481.25, 2_500.0)),
    );
    let sink = Arc::new(StdoutSink::with_writer(Vec::<u8>::new()));
    let poller = Poller::new(
        PollerConfig {
            delivery_stream: "stock-market-data".to_string(),
            symbols: vec!["AAPL".to_string(), "NVDA".to_string()],
            interval: Duration::from_secs(60),
        },
        provider,
        sink.clone() as Arc<dyn IngestionSink>,
    );

    let report = poller.run_cycle().await.unwrap();
    assert_eq!(report.sent.len(), 2);
    drop(poller);

    let sink = Arc::try_unwrap(sink).ok().expect("sink still shared");
    let written = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(first["symbol"], "AAPL");
    assert_eq!(second["symbol"], "NVDA");
    assert_eq!(second["close"], 481.25);
    assert_eq!(second["volume"], 2500);
}
