use std::net::SocketAddr;
use std::sync::Arc;
use textcraft_api::Server;
use textcraft_core::TextCraftConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> textcraft_core::Result<()> {
    let config = Arc::new(TextCraftConfig::load()?);

    let default_filter = format!(
        "textcraft_api={level},textcraft_ai={level},textcraft_store={level},tower_http=debug",
        level = config.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            textcraft_core::TextCraftError::Config(format!("invalid listen address: {}", e))
        })?;

    let server = Server::new(addr, config)?;
    server.run().await
}
