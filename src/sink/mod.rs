//! Ingestion sink module
//!
//! Submits encoded records to a named delivery stream, one request per record

mod firehose;
mod stdout;

pub use firehose::{FirehoseConfig, FirehoseSink};
pub use stdout::StdoutSink;

use async_trait::async_trait;
use thiserror::Error;

/// Identifier the ingestion service assigns to an accepted record
pub type RecordId = String;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// The service rejected or never received the record
    #[error("Submission to {target} failed: {message}")]
    Submit { target: String, message: String },
    /// The request could not be assembled
    #[error("Could not build record for {target}: {message}")]
    Build { target: String, message: String },
}

/// Trait for ingestion sink implementations
#[async_trait]
pub trait IngestionSink: Send + Sync {
    /// Submit exactly one record to `target` and return its id
    async fn put_record(&self, target: &str, data: Vec<u8>) -> Result<RecordId, SinkError>;
}
