//! End-to-end polling scenarios

use crate::common::{bar, FakeFirehose, FakeProvider};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use ticker_stream::feed::FetchError;
use ticker_stream::poller::{FixedClock, Poller, PollerConfig, PollerError};
use tokio::sync::watch;
use tokio_test::{assert_err, assert_ok};

fn config(symbols: &[&str]) -> PollerConfig {
    PollerConfig {
        delivery_stream: "stock-market-data".to_string(),
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        interval: Duration::from_millis(20),
    }
}

#[tokio::test]
async fn test_quote_reaches_sink_as_json_line() {
    let t = Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 7).unwrap();
    let provider =
        Arc::new(FakeProvider::default().with_bar("AAPL", bar(150.0, 151.0, 149.5, 150.5, 1_000_000.0)));
    let firehose = Arc::new(FakeFirehose::default());
    let poller = Poller::new(config(&["AAPL"]), provider, firehose.clone())
        .with_clock(Arc::new(FixedClock(t)));

    let report = assert_ok!(poller.run_cycle().await);
    assert_eq!(report.sent.len(), 1);

    let accepted = firehose.accepted.lock().unwrap();
    assert_eq!(accepted[0].0, "stock-market-data");
    assert_eq!(
        String::from_utf8(accepted[0].1.clone()).unwrap(),
        format!(
            "{{\"symbol\":\"AAPL\",\"timestamp\":{},\"open\":150.0,\"high\":151.0,\"low\":149.5,\"close\":150.5,\"volume\":1000000}}\n",
            t.timestamp()
        )
    );
}

#[tokio::test]
async fn test_symbol_without_data_is_skipped() {
    let provider =
        Arc::new(FakeProvider::default().with_bar("AAPL", bar(1.0, 2.0, 0.5, 1.5, 10.0)));
    let firehose = Arc::new(FakeFirehose::default());
    let poller = Poller::new(config(&["XYZ", "AAPL"]), provider.clone(), firehose.clone());

    let report = assert_ok!(poller.run_cycle().await);

    assert_eq!(report.skipped, vec!["XYZ".to_string()]);
    assert_eq!(report.sent[0].0, "AAPL");
    assert_eq!(*firehose.attempts.lock().unwrap(), 1);
    assert_eq!(*provider.requests.lock().unwrap(), vec!["XYZ", "AAPL"]);
}

#[tokio::test]
async fn test_submission_failure_stops_everything() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_bar("AAPL", bar(1.0, 2.0, 0.5, 1.5, 10.0))
            .with_bar("MSFT", bar(1.0, 2.0, 0.5, 1.5, 10.0))
            .with_bar("NVDA", bar(1.0, 2.0, 0.5, 1.5, 10.0)),
    );
    let firehose = Arc::new(FakeFirehose {
        fail_after: Some(1),
        ..Default::default()
    });
    let poller = Poller::new(
        config(&["AAPL", "MSFT", "NVDA"]),
        provider.clone(),
        firehose.clone(),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);
    let err = assert_err!(poller.run(stop_rx).await);

    assert!(matches!(err, PollerError::Sink { ref symbol, .. } if symbol == "MSFT"));
    assert_eq!(*provider.requests.lock().unwrap(), vec!["AAPL", "MSFT"]);
    assert_eq!(firehose.accepted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_provider_failure_stops_everything() {
    let provider = Arc::new(
        FakeProvider::default()
            .with_bar("AAPL", bar(1.0, 2.0, 0.5, 1.5, 10.0))
            .with_bar("NVDA", bar(1.0, 2.0, 0.5, 1.5, 10.0))
            .with_failure("MSFT"),
    );
    let firehose = Arc::new(FakeFirehose::default());
    let poller = Poller::new(
        config(&["AAPL", "MSFT", "NVDA"]),
        provider.clone(),
        firehose.clone(),
    );

    let (_stop_tx, stop_rx) = watch::channel(false);
    let err = assert_err!(poller.run(stop_rx).await);

    assert!(matches!(
        err,
        PollerError::Fetch(FetchError::Status { ref symbol, status: 502, .. }) if symbol == "MSFT"
    ));
    assert_eq!(*provider.requests.lock().unwrap(), vec!["AAPL", "MSFT"]);
    assert_eq!(*firehose.attempts.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_each_cycle_visits_every_symbol_once_in_order() {
    let symbols = ["AAPL", "MSFT", "GOOGL", "NFLX"];
    let provider = Arc::new(
        symbols
            .iter()
            .fold(FakeProvider::default(), |p, s| {
                p.with_bar(s, bar(1.0, 2.0, 0.5, 1.5, 10.0))
            }),
    );
    let firehose = Arc::new(FakeFirehose::default());
    let poller = Poller::new(config(&symbols), provider.clone(), firehose.clone());

    for _ in 0..3 {
        assert_ok!(poller.run_cycle().await);
    }

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 12);
    for cycle in requests.chunks(symbols.len()) {
        assert_eq!(cycle, symbols);
    }
    assert_eq!(*firehose.attempts.lock().unwrap(), 12);
}

#[tokio::test]
async fn test_run_keeps_polling_until_stopped() {
    let provider =
        Arc::new(FakeProvider::default().with_bar("AAPL", bar(1.0, 2.0, 0.5, 1.5, 10.0)));
    let firehose = Arc::new(FakeFirehose::default());
    let poller = Poller::new(config(&["AAPL"]), provider, firehose.clone());

    let (stop_tx, stop_rx) = watch::channel(false);
    let watcher = {
        let firehose = firehose.clone();
        tokio::spawn(async move {
            loop {
                if firehose.accepted.lock().unwrap().len() >= 3 {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            stop_tx.send(true).unwrap();
        })
    };

    tokio::time::timeout(Duration::from_secs(5), poller.run(stop_rx))
        .await
        .expect("poller did not stop")
        .unwrap();
    watcher.await.unwrap();

    assert!(firehose.accepted.lock().unwrap().len() >= 3);
}
