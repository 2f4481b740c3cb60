use clap::Parser;
use ticker_stream::cli::{Cli, Commands};
use ticker_stream::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; a missing file falls back to the bundled example
    let config = Config::load_or_default(&cli.config)?;

    ticker_stream::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting quote poller");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Delivery stream: {}", config.poller.delivery_stream);
            println!("  Symbols: {}", config.poller.symbols.join(", "));
            println!("  Interval: {}s", config.poller.interval_secs);
            println!(
                "  Provider: {} (timeout {}s)",
                config.provider.base_url, config.provider.timeout_secs
            );
            println!(
                "  Sink: region={} endpoint={}",
                config.sink.region.as_deref().unwrap_or("<default>"),
                config.sink.endpoint_url.as_deref().unwrap_or("<default>")
            );
            println!(
                "  Telemetry: level={} format={:?} metrics_port={}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config
                    .telemetry
                    .metrics_port
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "off".to_string())
            );
        }
    }

    Ok(())
}
