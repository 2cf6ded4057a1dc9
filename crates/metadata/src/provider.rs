use crate::MetadataError;

/// An external metadata service that can search for movies.
///
/// A narrow seam so the enricher's tests can substitute deterministic fakes
/// for real network calls.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search for a movie by cleaned title and optional year hint.
    /// Results are ordered by the provider's own ranking, best first.
    async fn search_movie(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<SearchResult>, MetadataError>;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub year: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    /// Community rating in [0, 10].
    pub rating: Option<f64>,
}
