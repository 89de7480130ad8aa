use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use swatch_match::{
    find_closest, find_split, DistanceMetric, FilterMode, Lab, MatchQuery, MatchResult, Rgb,
    SplitQuery, TagFilters,
};
use utoipa::ToSchema;

use super::convert::ColorDto;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{InMemoryPaletteStore, PaletteProvider};

/// Request body for a single ranked list
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MatchRequest {
    /// Target color as hex. Give either this or `lab`.
    #[serde(default)]
    pub hex: Option<String>,
    /// Target color as `[L, a, b]`
    #[serde(default)]
    pub lab: Option<[f64; 3]>,
    /// Maximum number of matches (configured default if omitted)
    #[serde(default)]
    pub count: Option<usize>,
    /// Only rank entries carrying this tag; `filters` is ignored when set
    #[serde(default)]
    pub tag: Option<String>,
    /// Tag name to `include`, `exclude` or `none`
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    /// `ciede2000` (default) or `rgb`
    #[serde(default)]
    pub metric: Option<String>,
}

/// Request body for the primary/secondary query
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SplitRequest {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub lab: Option<[f64; 3]>,
    /// Maximum length of each list
    #[serde(default)]
    pub count: Option<usize>,
    /// Tag ranked in the primary list (configured default if omitted)
    #[serde(default)]
    pub primary_tag: Option<String>,
    /// Filters for the secondary list
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub metric: Option<String>,
}

/// One ranked palette entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MatchDto {
    /// 0-based position in the list
    pub rank: usize,
    pub id: String,
    pub hex: String,
    /// Distance to the target under the chosen metric
    pub distance: f64,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&MatchResult<'_>> for MatchDto {
    fn from(m: &MatchResult<'_>) -> Self {
        Self {
            rank: m.rank,
            id: m.entry.id().to_string(),
            hex: m.entry.hex().to_string(),
            distance: m.distance,
            tags: m.entry.tags().iter().map(|t| t.to_string()).collect(),
            image: m.entry.image().map(str::to_string),
        }
    }
}

pub(crate) fn to_dtos(matches: &[MatchResult<'_>]) -> Vec<MatchDto> {
    matches.iter().map(MatchDto::from).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub target: ColorDto,
    pub metric: String,
    pub matches: Vec<MatchDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SplitResponse {
    pub target: ColorDto,
    pub metric: String,
    pub primary_tag: String,
    /// Entries carrying the primary tag, unfiltered
    pub primary: Vec<MatchDto>,
    /// Everything else, after filters
    pub secondary: Vec<MatchDto>,
}

/// The target of a query, from exactly one of `hex` or `lab`.
pub(crate) fn resolve_target(hex: Option<&str>, lab: Option<[f64; 3]>) -> Result<Lab, ApiError> {
    match (hex, lab) {
        (Some(hex), None) => Ok(Lab::from(hex.parse::<Rgb>()?)),
        (None, Some(lab)) if lab.iter().all(|v| v.is_finite()) => Ok(Lab::from(lab)),
        (None, Some(_)) => Err(ApiError::BadRequest(
            "lab values must be finite numbers".to_string(),
        )),
        (Some(_), Some(_)) => Err(ApiError::BadRequest(
            "give either hex or lab, not both".to_string(),
        )),
        (None, None) => Err(ApiError::BadRequest(
            "missing target color: set hex or lab".to_string(),
        )),
    }
}

pub(crate) fn parse_filters(filters: &BTreeMap<String, String>) -> Result<TagFilters, ApiError> {
    let mut parsed = TagFilters::new();
    for (tag, mode) in filters {
        let mode: FilterMode = mode
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("filter for tag {tag:?}: {e}")))?;
        parsed.set(tag.as_str(), mode);
    }
    Ok(parsed)
}

pub(crate) fn parse_metric(
    metric: Option<&str>,
    default: DistanceMetric,
) -> Result<DistanceMetric, ApiError> {
    match metric {
        Some(name) => name
            .parse()
            .map_err(|e: swatch_match::ParseMetricError| ApiError::BadRequest(e.to_string())),
        None => Ok(default),
    }
}

/// Build a single-list query from request fields and configured defaults.
pub(crate) fn build_query(
    config: &AppConfig,
    count: Option<usize>,
    tag: Option<&str>,
    filters: &BTreeMap<String, String>,
    metric: Option<&str>,
) -> Result<MatchQuery, ApiError> {
    let mut query = MatchQuery::new()
        .count(count.unwrap_or(config.matching.default_count))
        .filters(parse_filters(filters)?)
        .metric(parse_metric(metric, config.matching.metric)?);
    if let Some(tag) = tag.filter(|t| !t.trim().is_empty()) {
        query = query.required_tag(tag);
    }
    Ok(query)
}

/// Rank palette entries by distance to a color
///
/// Mirrors the picker's single result list: optional required tag, else
/// tri-state tag filters, closest first.
#[utoipa::path(
    post,
    path = "/api/match",
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Closest palette entries", body = MatchResponse),
        (status = 400, description = "Missing or malformed target, filter or metric"),
    ),
    tag = "Matching"
)]
pub async fn handle_match(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<InMemoryPaletteStore>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(request) = payload?;
    let target = resolve_target(request.hex.as_deref(), request.lab)?;
    let query = build_query(
        &config,
        request.count,
        request.tag.as_deref(),
        &request.filters,
        request.metric.as_deref(),
    )?;

    let snapshot = store.snapshot().await;
    let matches = find_closest(target, &snapshot.palette, &query);

    tracing::debug!(
        target = ?target,
        metric = %query.metric,
        candidates = snapshot.palette.len(),
        returned = matches.len(),
        "Match query"
    );

    Ok(Json(MatchResponse {
        target: ColorDto::from_lab(target),
        metric: query.metric.to_string(),
        matches: to_dtos(&matches),
    }))
}

/// Rank primary-tag entries and all other entries separately
///
/// The primary list holds entries carrying the primary tag (full blocks by
/// default) and ignores filters. The secondary list holds every other entry
/// that passes the filters.
#[utoipa::path(
    post,
    path = "/api/match/split",
    request_body = SplitRequest,
    responses(
        (status = 200, description = "Primary and secondary lists", body = SplitResponse),
        (status = 400, description = "Missing or malformed target, filter or metric"),
    ),
    tag = "Matching"
)]
pub async fn handle_split(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<InMemoryPaletteStore>>,
    payload: Result<Json<SplitRequest>, JsonRejection>,
) -> Result<Json<SplitResponse>, ApiError> {
    let Json(request) = payload?;
    let target = resolve_target(request.hex.as_deref(), request.lab)?;
    let primary_tag = request
        .primary_tag
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| config.matching.primary_tag.clone());
    let query = SplitQuery::new()
        .count(request.count.unwrap_or(config.matching.default_count))
        .primary_tag(primary_tag.as_str())
        .filters(parse_filters(&request.filters)?)
        .metric(parse_metric(request.metric.as_deref(), config.matching.metric)?);

    let snapshot = store.snapshot().await;
    let split = find_split(target, &snapshot.palette, &query);

    Ok(Json(SplitResponse {
        target: ColorDto::from_lab(target),
        metric: query.metric.to_string(),
        primary_tag: query.primary_tag.to_string(),
        primary: to_dtos(&split.primary),
        secondary: to_dtos(&split.secondary),
    }))
}
