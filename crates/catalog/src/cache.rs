use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use vodhub_core::types::{MovieRecord, Source};

/// Default TTL for cached collections.
pub const DEFAULT_TTL_SECS: i64 = 600;

struct CacheEntry {
    data: Vec<MovieRecord>,
    stored_at: DateTime<Utc>,
}

/// TTL-bounded cache of merged movie collections, keyed by source
/// configuration.
///
/// Writes are whole-entry replacements; reads clone. The `building` map
/// hands out one async lock per key so concurrent misses for the same
/// configuration coalesce into a single resolve.
pub struct PlaylistCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
    building: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PlaylistCache {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            entries: Mutex::new(HashMap::new()),
            building: Mutex::new(HashMap::new()),
        }
    }

    /// Canonical cache key for a source list. Order-sensitive: reordering
    /// the same sources is a different configuration and forces a miss.
    pub fn cache_key(sources: &[Source]) -> String {
        let mut key = String::new();
        for s in sources {
            key.push_str(&s.url);
            key.push('\n');
            key.push_str(&s.name);
            key.push('\n');
        }
        key
    }

    /// The cached collection, if present and within TTL.
    pub async fn get(&self, key: &str) -> Option<Vec<MovieRecord>> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        if Utc::now().signed_duration_since(entry.stored_at) < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    /// Unconditionally replace the entry for `key`.
    pub async fn insert(&self, key: String, data: Vec<MovieRecord>) {
        let entry = CacheEntry {
            data,
            stored_at: Utc::now(),
        };
        self.entries.lock().await.insert(key, entry);
    }

    /// The build lock for `key`. Holders serialize per key; after acquiring,
    /// re-check the cache before resolving.
    pub async fn build_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut building = self.building.lock().await;
        building.entry(key.to_string()).or_default().clone()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
