use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::negotiator::ContentNegotiator;

/// Bind the configured address and serve until the listener fails.
pub async fn run(cfg: &Config, negotiator: Arc<ContentNegotiator>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, negotiator, Arc::from(cfg.negotiation.callback_param.as_str())).await
}

/// Accept connections on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    negotiator: Arc<ContentNegotiator>,
    callback_param: Arc<str>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let negotiator = Arc::clone(&negotiator);
        let callback_param = Arc::clone(&callback_param);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, negotiator, callback_param);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
