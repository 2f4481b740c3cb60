//! Dry-run sink that writes records to stdout

use super::{IngestionSink, RecordId, SinkError};
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Writes each record to a local writer instead of a delivery stream
pub struct StdoutSink<W = tokio::io::Stdout> {
    out: Mutex<W>,
}

impl StdoutSink {
    /// Sink writing to the process stdout
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> StdoutSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Sink writing to an arbitrary writer
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return its writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W> IngestionSink for StdoutSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn put_record(&self, target: &str, data: Vec<u8>) -> Result<RecordId, SinkError> {
        let mut out = self.out.lock().await;
        let io_err = |e: std::io::Error| SinkError::Submit {
            target: target.to_string(),
            message: e.to_string(),
        };

        out.write_all(&data).await.map_err(io_err)?;
        out.flush().await.map_err(io_err)?;

        Ok(Uuid::new_v4().to_string())
    }
}
