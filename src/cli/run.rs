//! Run command implementation

use crate::config::Config;
use crate::feed::{QuoteSource, YahooChartClient};
use crate::poller::Poller;
use crate::sink::{FirehoseSink, IngestionSink, StdoutSink};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Print records to stdout instead of submitting them
    #[arg(long)]
    pub dry_run: bool,

    /// Poll only these symbols (repeatable), overriding the config
    #[arg(short, long = "symbol", value_name = "SYMBOL")]
    pub symbols: Vec<String>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut poller_config = config.poller_config();
        if !self.symbols.is_empty() {
            poller_config.symbols = self.symbols.clone();
        }

        let source: Arc<dyn QuoteSource> =
            Arc::new(YahooChartClient::with_config(config.yahoo_config())?);

        let sink: Arc<dyn IngestionSink> = if self.dry_run {
            tracing::info!("Dry run, records go to stdout");
            Arc::new(StdoutSink::new())
        } else {
            Arc::new(FirehoseSink::from_config(&config.firehose_config()).await)
        };

        let poller = Poller::new(poller_config, source, sink);

        if self.once {
            let report = poller.run_cycle().await?;
            tracing::info!(
                sent = report.sent.len(),
                skipped = ?report.skipped,
                "Single cycle finished"
            );
            return Ok(());
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received shutdown signal");
                let _ = stop_tx.send(true);
            }
        });

        poller.run(stop_rx).await?;
        Ok(())
    }
}
