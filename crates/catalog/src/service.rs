use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::PlaylistCache;
use crate::merge;
use vodhub_core::types::{MovieRecord, Source};
use vodhub_playlist::fetch::PlaylistFetcher;
use vodhub_playlist::m3u::{self, PlaylistEntry};

/// Orchestrates resolve cycles: cached merged collections per source
/// configuration, at most one in-flight build per cache key.
pub struct CatalogService {
    fetcher: Arc<dyn PlaylistFetcher>,
    cache: PlaylistCache,
}

impl CatalogService {
    pub fn new(fetcher: Arc<dyn PlaylistFetcher>, cache_ttl_secs: i64) -> Self {
        Self {
            fetcher,
            cache: PlaylistCache::new(cache_ttl_secs),
        }
    }

    /// The merged movie collection for `sources`, from cache when fresh.
    ///
    /// On miss or expiry runs a full resolve-merge cycle and replaces the
    /// cache entry, even when the fresh result is identical to the old one.
    pub async fn movies(&self, sources: &[Source]) -> Vec<MovieRecord> {
        let key = PlaylistCache::cache_key(sources);
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let lock = self.cache.build_lock(&key).await;
        let _guard = lock.lock().await;

        // A coalesced request may have finished the build while we waited.
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let merged = self.resolve(sources).await;
        self.cache.insert(key, merged.clone()).await;
        merged
    }

    /// One full resolve-merge cycle: parallel fetch with no shared state,
    /// join all (failures included), then a single-threaded fold in
    /// configured source order.
    async fn resolve(&self, sources: &[Source]) -> Vec<MovieRecord> {
        let fetches = sources.iter().map(|source| self.collect(source));
        let results = futures::future::join_all(fetches).await;

        let merged = merge::merge_sources(&results);
        info!(
            sources = sources.len(),
            movies = merged.len(),
            "resolved movie collection"
        );
        merged
    }

    async fn collect(&self, source: &Source) -> (Source, Vec<PlaylistEntry>) {
        let text = match self.fetcher.fetch(source).await {
            Ok(text) => text,
            Err(e) => {
                warn!(source = %source.name, error = %e, "source fetch failed");
                return (source.clone(), Vec::new());
            }
        };

        match m3u::parse(&text) {
            Ok(entries) => (source.clone(), entries),
            Err(e) => {
                warn!(source = %source.name, error = %e, "playlist parse failed");
                (source.clone(), Vec::new())
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
