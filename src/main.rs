use std::sync::Arc;

use webcodec::config::Config;
use webcodec::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let negotiator = Arc::new(cfg.negotiator()?);
    tracing::info!(codecs = negotiator.registry().len(), "Codec registry ready");

    tokio::select! {
        res = server::listener::run(&cfg, negotiator) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
