//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use crate::provider::{MetadataProvider, SearchResult};
use crate::MetadataError;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_movie(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<SearchResult>, MetadataError> {
        let mut params = vec![("query", title)];
        if let Some(y) = year {
            params.push(("year", y));
        }

        let data = self.get_json("/search/movie", &params).await?;
        Ok(map_search_results(&data))
    }
}

fn map_search_results(data: &serde_json::Value) -> Vec<SearchResult> {
    let results = data["results"].as_array().cloned().unwrap_or_default();

    results
        .iter()
        .take(10)
        .map(|r| SearchResult {
            title: r["title"].as_str().unwrap_or("Unknown").to_string(),
            // Release date year is the portion before the first '-'.
            year: r["release_date"]
                .as_str()
                .and_then(|d| d.split('-').next())
                .filter(|y| !y.is_empty())
                .map(|y| y.to_string()),
            overview: r["overview"].as_str().map(|s| s.to_string()),
            poster_url: r["poster_path"]
                .as_str()
                .map(|p| format!("{IMAGE_BASE}/w500{p}")),
            backdrop_url: r["backdrop_path"]
                .as_str()
                .map(|p| format!("{IMAGE_BASE}/original{p}")),
            rating: r["vote_average"].as_f64(),
        })
        .collect()
}
