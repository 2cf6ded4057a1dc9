use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vodhub_catalog::service::CatalogService;
use vodhub_metadata::enrich::MovieEnricher;
use vodhub_playlist::fetch::HttpFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cache_ttl_secs: i64 = std::env::var("VODHUB_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(vodhub_catalog::cache::DEFAULT_TTL_SECS);

    let fetch_timeout_secs: u64 = std::env::var("VODHUB_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);

    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(fetch_timeout_secs)));
    let catalog = Arc::new(CatalogService::new(fetcher, cache_ttl_secs));
    let enricher = Arc::new(MovieEnricher::new());

    let app_state = vodhub_server::state::AppState { catalog, enricher };
    let app = vodhub_server::routes::build_router(app_state);

    let bind_addr = std::env::var("VODHUB_BIND").unwrap_or_else(|_| "0.0.0.0:7000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %bind_addr, cache_ttl_secs, fetch_timeout_secs, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
