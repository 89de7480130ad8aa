//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{self, MatchRequest, SampleRequest, SplitRequest};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{InMemoryPaletteStore, PaletteLoader};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub palette_loader: Arc<PaletteLoader>,
    pub palette_store: Arc<InMemoryPaletteStore>,
}

/// Create application state from an asset loader.
///
/// Fails if the palette source cannot be read or is not a JSON array.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let palette_loader = Arc::new(PaletteLoader::new(asset_loader, &config));
    let report = palette_loader
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to load palette: {e}"))?;
    let palette_store = Arc::new(InMemoryPaletteStore::new(report));

    Ok(AppState {
        config,
        palette_loader,
        palette_store,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.sampling.max_body_bytes;

    Router::new()
        // Palette
        .route("/api/palette", get(handle_palette))
        .route("/api/palette/reload", post(handle_reload))
        .route("/api/palette/:id", get(handle_palette_entry))
        // Matching and sampling
        .route("/api/match", post(handle_match))
        .route("/api/match/split", post(handle_split))
        .route("/api/sample", post(handle_sample))
        .route("/api/convert", get(api::handle_convert))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_palette(
    State(state): State<AppState>,
    query: Result<Query<api::palette::PaletteQuery>, QueryRejection>,
) -> Result<Json<api::PaletteResponse>, ApiError> {
    api::handle_palette(State(state.palette_store), query).await
}

async fn handle_palette_entry(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<api::SwatchDto>, ApiError> {
    api::handle_palette_entry(State(state.palette_store), path).await
}

async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<api::ReloadResponse>, ApiError> {
    api::handle_reload(State(state.palette_loader), State(state.palette_store)).await
}

async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<api::MatchResponse>, ApiError> {
    api::handle_match(State(state.config), State(state.palette_store), payload).await
}

async fn handle_split(
    State(state): State<AppState>,
    payload: Result<Json<SplitRequest>, JsonRejection>,
) -> Result<Json<api::SplitResponse>, ApiError> {
    api::handle_split(State(state.config), State(state.palette_store), payload).await
}

async fn handle_sample(
    State(state): State<AppState>,
    payload: Result<Json<SampleRequest>, JsonRejection>,
) -> Result<Json<api::SampleResponse>, ApiError> {
    api::handle_sample(State(state.config), State(state.palette_store), payload).await
}
