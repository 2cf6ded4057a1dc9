//! On-demand movie enrichment.
//!
//! Caching policy: only successful enrichments are memoized, permanently for
//! the process lifetime. A failed or empty lookup returns the original record
//! uncached, so the next request for that movie attempts the lookup again.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::provider::{MetadataProvider, SearchResult};
use vodhub_core::types::MovieRecord;

/// Enriches movie records from an external metadata provider, with a
/// process-lifetime cache keyed by movie id. No eviction and no TTL; entries
/// survive playlist-cache refreshes of the same movie id.
pub struct MovieEnricher {
    cache: Mutex<HashMap<String, MovieRecord>>,
}

impl MovieEnricher {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Enrich one movie record.
    ///
    /// With no provider (absent API key) the input is returned unchanged.
    /// A cache hit bypasses the network entirely. On a miss, one search is
    /// issued; the first result wins, and only success populates the cache.
    pub async fn enrich(
        &self,
        movie: &MovieRecord,
        provider: Option<&dyn MetadataProvider>,
    ) -> MovieRecord {
        let Some(provider) = provider else {
            return movie.clone();
        };

        if let Some(hit) = self.cache.lock().await.get(&movie.id) {
            return hit.clone();
        }

        match provider
            .search_movie(&movie.search_name, movie.year.as_deref())
            .await
        {
            Ok(results) => match results.first() {
                Some(best) => {
                    let enriched = apply_result(movie, best);
                    self.cache
                        .lock()
                        .await
                        .insert(movie.id.clone(), enriched.clone());
                    enriched
                }
                None => {
                    debug!(
                        movie = %movie.search_name,
                        provider = provider.name(),
                        "no metadata candidates"
                    );
                    movie.clone()
                }
            },
            Err(e) => {
                warn!(
                    movie = %movie.search_name,
                    provider = provider.name(),
                    error = %e,
                    "enrichment failed"
                );
                movie.clone()
            }
        }
    }
}

impl Default for MovieEnricher {
    fn default() -> Self {
        Self::new()
    }
}

/// Overwrite display fields from the best candidate. Genre reconciliation is
/// deferred: `genres` stays untouched. A candidate that omits a field never
/// erases what the merge produced.
fn apply_result(movie: &MovieRecord, best: &SearchResult) -> MovieRecord {
    MovieRecord {
        display_name: best.title.clone(),
        poster: best.poster_url.clone().or_else(|| movie.poster.clone()),
        background: best
            .backdrop_url
            .clone()
            .or_else(|| movie.background.clone()),
        description: best.overview.clone().or_else(|| movie.description.clone()),
        year: best.year.clone().or_else(|| movie.year.clone()),
        rating: best
            .rating
            .map(|r| format!("{r:.1}"))
            .or_else(|| movie.rating.clone()),
        ..movie.clone()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider that counts calls.
    struct FakeProvider {
        response: Result<Vec<SearchResult>, ()>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn returning(results: Vec<SearchResult>) -> Self {
            Self {
                response: Ok(results),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl MetadataProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn search_movie(
            &self,
            _title: &str,
            _year: Option<&str>,
        ) -> Result<Vec<SearchResult>, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(results) => Ok(results.clone()),
                Err(()) => Err(MetadataError::Network("connection refused".into())),
            }
        }
    }

    fn movie() -> MovieRecord {
        MovieRecord {
            id: "abc123".into(),
            display_name: "Inception (2010)".into(),
            search_name: "Inception".into(),
            year: Some("2010".into()),
            poster: Some("http://a/inception.png".into()),
            background: Some("http://a/inception.png".into()),
            genres: vec!["Sci-Fi".into()],
            streams: vec![],
            description: Some("Quality: 1080p".into()),
            rating: None,
        }
    }

    fn candidate() -> SearchResult {
        SearchResult {
            title: "Inception".into(),
            year: Some("2010".into()),
            overview: Some("A thief who steals corporate secrets...".into()),
            poster_url: Some("http://tmdb/poster.jpg".into()),
            backdrop_url: Some("http://tmdb/backdrop.jpg".into()),
            rating: Some(8.36),
        }
    }

    #[tokio::test]
    async fn no_provider_is_a_noop() {
        let enricher = MovieEnricher::new();
        let out = enricher.enrich(&movie(), None).await;
        assert_eq!(out, movie());
    }

    #[tokio::test]
    async fn first_candidate_overwrites_display_fields() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::returning(vec![candidate()]);

        let out = enricher.enrich(&movie(), Some(&provider)).await;

        assert_eq!(out.display_name, "Inception");
        assert_eq!(out.poster.as_deref(), Some("http://tmdb/poster.jpg"));
        assert_eq!(out.background.as_deref(), Some("http://tmdb/backdrop.jpg"));
        assert_eq!(
            out.description.as_deref(),
            Some("A thief who steals corporate secrets...")
        );
        assert_eq!(out.rating.as_deref(), Some("8.4"));
        // Genre reconciliation is deferred.
        assert_eq!(out.genres, vec!["Sci-Fi".to_string()]);
        // Identity is untouched.
        assert_eq!(out.id, "abc123");
    }

    #[tokio::test]
    async fn missing_candidate_fields_fall_back_to_existing_values() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::returning(vec![SearchResult {
            title: "Inception".into(),
            year: None,
            overview: None,
            poster_url: None,
            backdrop_url: None,
            rating: None,
        }]);

        let out = enricher.enrich(&movie(), Some(&provider)).await;

        assert_eq!(out.poster.as_deref(), Some("http://a/inception.png"));
        assert_eq!(out.description.as_deref(), Some("Quality: 1080p"));
        assert_eq!(out.year.as_deref(), Some("2010"));
    }

    #[tokio::test]
    async fn success_is_memoized_without_further_calls() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::returning(vec![candidate()]);

        let first = enricher.enrich(&movie(), Some(&provider)).await;
        let second = enricher.enrich(&movie(), Some(&provider)).await;

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn failure_is_not_cached_and_retries() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::failing();

        let first = enricher.enrich(&movie(), Some(&provider)).await;
        let second = enricher.enrich(&movie(), Some(&provider)).await;

        assert_eq!(first, movie());
        assert_eq!(second, movie());
        // Each failed call attempts the lookup again.
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_result_set_is_not_cached() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::returning(vec![]);

        let out = enricher.enrich(&movie(), Some(&provider)).await;
        assert_eq!(out, movie());
        let _ = enricher.enrich(&movie(), Some(&provider)).await;
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn rating_formats_to_one_decimal() {
        let enricher = MovieEnricher::new();
        let provider = FakeProvider::returning(vec![SearchResult {
            rating: Some(7.0),
            ..candidate()
        }]);

        let out = enricher.enrich(&movie(), Some(&provider)).await;
        assert_eq!(out.rating.as_deref(), Some("7.0"));
    }
}
