use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swatch_match::PaletteEntry;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::services::{InMemoryPaletteStore, PaletteLoader, PaletteProvider};

/// One palette entry as served to clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SwatchDto {
    pub id: String,
    pub hex: String,
    pub rgb: [u8; 3],
    /// Lab used for matching (measured if the palette file supplied one)
    pub lab: [f64; 3],
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&PaletteEntry> for SwatchDto {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            hex: entry.hex().to_string(),
            rgb: entry.rgb().to_bytes(),
            lab: entry.lab().to_array(),
            tags: entry.tags().iter().map(|t| t.to_string()).collect(),
            image: entry.image().map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaletteQuery {
    /// Only list entries carrying this tag
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaletteResponse {
    /// Entries in the palette (before the tag query)
    pub count: usize,
    /// Records skipped at load
    pub rejected: usize,
    pub loaded_at: DateTime<Utc>,
    /// Distinct tags in first-seen order
    pub tags: Vec<String>,
    pub entries: Vec<SwatchDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReloadResponse {
    pub status: u16,
    pub count: usize,
    pub rejected: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Get the current palette
#[utoipa::path(
    get,
    path = "/api/palette",
    params(PaletteQuery),
    responses(
        (status = 200, description = "Palette entries", body = PaletteResponse),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(
    State(store): State<Arc<InMemoryPaletteStore>>,
    query: Result<Query<PaletteQuery>, QueryRejection>,
) -> Result<Json<PaletteResponse>, ApiError> {
    let Query(query) = query?;
    let snapshot = store.snapshot().await;
    let palette = &snapshot.palette;

    let wanted = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let entries = palette
        .iter()
        .filter(|e| wanted.map_or(true, |tag| e.has_tag(tag)))
        .map(SwatchDto::from)
        .collect();

    Ok(Json(PaletteResponse {
        count: palette.len(),
        rejected: snapshot.rejected,
        loaded_at: snapshot.loaded_at,
        tags: palette.tags().iter().map(|t| t.to_string()).collect(),
        entries,
    }))
}

/// Get one palette entry by id
#[utoipa::path(
    get,
    path = "/api/palette/{id}",
    params(("id" = String, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Palette entry", body = SwatchDto),
        (status = 404, description = "No entry with this id"),
    ),
    tag = "Palette"
)]
pub async fn handle_palette_entry(
    State(store): State<Arc<InMemoryPaletteStore>>,
    Path(id): Path<String>,
) -> Result<Json<SwatchDto>, ApiError> {
    let snapshot = store.snapshot().await;
    snapshot
        .palette
        .get(&id)
        .map(|entry| Json(SwatchDto::from(entry)))
        .ok_or(ApiError::NotFound(id))
}

/// Reload the palette from its source
///
/// Re-reads the palette file (or the embedded palette) and replaces the
/// current palette wholesale. On failure the current palette stays.
#[utoipa::path(
    post,
    path = "/api/palette/reload",
    responses(
        (status = 200, description = "Palette reloaded", body = ReloadResponse),
        (status = 500, description = "Palette source unreadable or malformed"),
    ),
    tag = "Palette"
)]
pub async fn handle_reload(
    State(loader): State<Arc<PaletteLoader>>,
    State(store): State<Arc<InMemoryPaletteStore>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let snapshot = loader.reload_into(store.as_ref()).await?;

    Ok(Json(ReloadResponse {
        status: 200,
        count: snapshot.palette.len(),
        rejected: snapshot.rejected,
        loaded_at: snapshot.loaded_at,
    }))
}
