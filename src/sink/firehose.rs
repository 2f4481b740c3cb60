//! Kinesis Data Firehose sink
//!
//! One `PutRecord` call per record. SDK-level retries are switched off so a
//! failed submission reaches the caller on the first error.

use super::{IngestionSink, RecordId, SinkError};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_firehose::error::DisplayErrorContext;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use aws_sdk_firehose::Client;

/// Configuration for the Firehose client
#[derive(Debug, Clone, Default)]
pub struct FirehoseConfig {
    /// AWS region; falls back to the default provider chain when unset
    pub region: Option<String>,
    /// Endpoint override (e.g., LocalStack)
    pub endpoint_url: Option<String>,
}

/// Firehose-backed ingestion sink
pub struct FirehoseSink {
    client: Client,
}

impl FirehoseSink {
    /// Build a sink from the default AWS credential and region chain
    pub async fn from_config(config: &FirehoseConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(1));

        if let Some(ref region) = config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(ref endpoint) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        tracing::info!(
            region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            endpoint = config.endpoint_url.as_deref().unwrap_or("<default>"),
            "Firehose client configured"
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl IngestionSink for FirehoseSink {
    async fn put_record(&self, target: &str, data: Vec<u8>) -> Result<RecordId, SinkError> {
        let record = Record::builder()
            .data(Blob::new(data))
            .build()
            .map_err(|e| SinkError::Build {
                target: target.to_string(),
                message: e.to_string(),
            })?;

        let output = self
            .client
            .put_record()
            .delivery_stream_name(target)
            .record(record)
            .send()
            .await
            .map_err(|e| SinkError::Submit {
                target: target.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.record_id().to_string())
    }
}
