//! ticker-stream: equity quote poller feeding Kinesis Data Firehose
//!
//! This library provides the components for:
//! - Latest 1-minute bars from the Yahoo Finance chart API
//! - Closed-set JSON record encoding
//! - Record submission to Firehose (or stdout for dry runs)
//! - A fixed-cadence polling loop with a stop signal
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod feed;
pub mod poller;
pub mod record;
pub mod sink;
pub mod telemetry;
