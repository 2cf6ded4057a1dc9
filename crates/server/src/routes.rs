use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{decode_config, RequestConfig};
use crate::error::AppError;
use crate::state::AppState;
use vodhub_catalog::query::{self, CatalogQuery};
use vodhub_core::error::ApiError;
use vodhub_core::types::{MovieRecord, MovieSummary, StreamEntry};
use vodhub_metadata::provider::MetadataProvider;
use vodhub_metadata::tmdb::TmdbClient;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        // Catalog clients are browsers and media apps on other origins.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/{config}/movies", get(list_movies))
        .route("/{config}/movies/{id}", get(get_movie))
        .route("/{config}/movies/{id}/streams", get(get_movie_streams))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ListParams {
    search: Option<String>,
    genre: Option<String>,
}

fn parse_config(raw: &str) -> Result<RequestConfig, AppError> {
    decode_config(raw).map_err(|e| ApiError::BadRequest(e.to_string()).into())
}

async fn list_movies(
    State(state): State<AppState>,
    Path(config): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MovieSummary>>, AppError> {
    let cfg = parse_config(&config)?;
    let movies = state.catalog.movies(&cfg.sources).await;

    let filtered = query::apply(
        movies,
        &CatalogQuery {
            search: params.search,
            genre: params.genre,
        },
    );

    Ok(Json(filtered.iter().map(MovieRecord::summary).collect()))
}

async fn get_movie(
    State(state): State<AppState>,
    Path((config, id)): Path<(String, String)>,
) -> Result<Json<MovieRecord>, AppError> {
    let cfg = parse_config(&config)?;
    let movie = find_movie(&state, &cfg, &id).await?;

    let provider = cfg.api_key.clone().map(TmdbClient::new);
    let enriched = state
        .enricher
        .enrich(&movie, provider.as_ref().map(|p| p as &dyn MetadataProvider))
        .await;

    Ok(Json(enriched))
}

async fn get_movie_streams(
    State(state): State<AppState>,
    Path((config, id)): Path<(String, String)>,
) -> Result<Json<Vec<StreamEntry>>, AppError> {
    let cfg = parse_config(&config)?;
    let movie = find_movie(&state, &cfg, &id).await?;
    Ok(Json(movie.streams))
}

async fn find_movie(
    state: &AppState,
    cfg: &RequestConfig,
    id: &str,
) -> Result<MovieRecord, AppError> {
    state
        .catalog
        .movies(&cfg.sources)
        .await
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ApiError::NotFound("movie not found".into()).into())
}
