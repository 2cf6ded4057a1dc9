use std::sync::Arc;

use vodhub_catalog::service::CatalogService;
use vodhub_metadata::enrich::MovieEnricher;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub enricher: Arc<MovieEnricher>,
}
