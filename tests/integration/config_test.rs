//! Configuration loading tests

use std::time::Duration;
use ticker_stream::config::Config;

#[test]
fn test_example_config_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.validate().unwrap();

    assert_eq!(config.poller.delivery_stream, "stock-market-data");
    assert_eq!(config.poller.symbols.len(), 9);
    assert_eq!(config.poller_config().interval, Duration::from_secs(60));
    assert!(config.sink.endpoint_url.is_none());
}

#[test]
fn test_localstack_config() {
    let toml = r#"
        [poller]
        delivery_stream = "local-quotes"
        symbols = ["AAPL"]
        interval_secs = 1

        [sink]
        region = "us-east-1"
        endpoint_url = "http://localhost:4566"
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    let firehose = config.firehose_config();
    assert_eq!(firehose.region.as_deref(), Some("us-east-1"));
    assert_eq!(firehose.endpoint_url.as_deref(), Some("http://localhost:4566"));
}
