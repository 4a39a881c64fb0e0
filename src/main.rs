use anyhow::Context;
use clima_gateway::{config::Config, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Cache: {} entries, {}s TTL; upstream timeout {}s",
        config.cache_capacity,
        config.cache_ttl.as_secs(),
        config.request_timeout.as_secs()
    );

    let resolver = server::build_resolver(&config).context("Failed to build HTTP client")?;

    server::serve(&config, resolver)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    Ok(())
}
