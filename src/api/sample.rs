use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use swatch_match::{
    average_color, find_closest, RgbBuffer, RgbaBuffer, SampleError, SampleRect, SampleResult,
};
use utoipa::ToSchema;

use super::convert::ColorDto;
use super::matching::{build_query, to_dtos, MatchDto};
use crate::error::ApiError;
use crate::models::{AppConfig, SamplingConfig};
use crate::services::{InMemoryPaletteStore, PaletteProvider};

/// Byte layout of the submitted pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel; alpha 0 pixels are skipped
    #[default]
    Rgba,
}

/// An explicit rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RegionDto {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl From<SampleRect> for RegionDto {
    fn from(r: SampleRect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            width: r.width,
            height: r.height,
        }
    }
}

impl From<RegionDto> for SampleRect {
    fn from(r: RegionDto) -> Self {
        SampleRect::new(r.left, r.top, r.width, r.height)
    }
}

/// A pointer position; the box around it is sampled
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PointDto {
    pub x: usize,
    pub y: usize,
    /// Box side (configured pointer size if omitted)
    #[serde(default)]
    pub size: Option<usize>,
}

/// A dragged selection from `(x0, y0)` to `(x1, y1)`
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct DragDto {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

/// Request body for sampling a pixel buffer
#[derive(Debug, Deserialize, ToSchema)]
pub struct SampleRequest {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub format: PixelFormat,
    /// Base64 pixel bytes, row-major
    pub data: String,
    /// Sample this rectangle. At most one of `rect`, `point`, `drag`;
    /// the whole buffer if none is given.
    #[serde(default)]
    pub rect: Option<RegionDto>,
    #[serde(default)]
    pub point: Option<PointDto>,
    /// Small drags are treated as a click at the drag's end
    #[serde(default)]
    pub drag: Option<DragDto>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub metric: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SampleResponse {
    /// Averaged color
    pub color: ColorDto,
    /// Pixels that contributed to the average
    pub pixel_count: usize,
    /// Rectangle actually sampled
    pub region: RegionDto,
    pub metric: String,
    pub matches: Vec<MatchDto>,
}

/// Pick the rectangle to sample from the request.
pub(crate) fn resolve_region(
    request: &SampleRequest,
    sampling: &SamplingConfig,
) -> Result<SampleRect, ApiError> {
    let (width, height) = (request.width, request.height);
    match (request.rect, request.point, request.drag) {
        (None, None, None) => Ok(SampleRect::new(0, 0, width, height)),
        (Some(rect), None, None) => Ok(rect.into()),
        (None, Some(point), None) => Ok(SampleRect::around_point(
            point.x,
            point.y,
            point.size.unwrap_or(sampling.pointer_size),
            width,
            height,
        )),
        (None, None, Some(drag)) => {
            let rect = SampleRect::from_drag(drag.x0, drag.y0, drag.x1, drag.y1, width, height);
            if rect.area() > sampling.min_selection_area {
                Ok(rect)
            } else {
                Ok(SampleRect::around_point(
                    drag.x1,
                    drag.y1,
                    sampling.pointer_size,
                    width,
                    height,
                ))
            }
        }
        _ => Err(ApiError::BadRequest(
            "give at most one of rect, point or drag".to_string(),
        )),
    }
}

fn sample_pixels(
    bytes: &[u8],
    format: PixelFormat,
    width: usize,
    height: usize,
    rect: SampleRect,
) -> Result<SampleResult, SampleError> {
    match format {
        PixelFormat::Rgba => average_color(&RgbaBuffer::new(bytes, width, height)?, rect),
        PixelFormat::Rgb => average_color(&RgbBuffer::new(bytes, width, height)?, rect),
    }
}

/// Average a region of a pixel buffer and rank the palette against it
///
/// The buffer arrives as raw bytes; no image decoding is done. Hue is
/// averaged on the circle, so regions straddling red keep their hue.
#[utoipa::path(
    post,
    path = "/api/sample",
    request_body = SampleRequest,
    responses(
        (status = 200, description = "Averaged color and closest entries", body = SampleResponse),
        (status = 400, description = "Malformed buffer, region, filter or metric"),
        (status = 413, description = "Body exceeds sampling.max_body_bytes"),
        (status = 422, description = "Region holds no eligible pixel"),
    ),
    tag = "Sampling"
)]
pub async fn handle_sample(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<InMemoryPaletteStore>>,
    payload: Result<Json<SampleRequest>, JsonRejection>,
) -> Result<Json<SampleResponse>, ApiError> {
    let Json(request) = payload?;
    let rect = resolve_region(&request, &config.sampling)?;
    let query = build_query(
        &config,
        request.count,
        request.tag.as_deref(),
        &request.filters,
        request.metric.as_deref(),
    )?;
    let bytes = STANDARD
        .decode(request.data.as_bytes())
        .map_err(|e| ApiError::BadRequest(format!("pixel data is not valid base64: {e}")))?;

    let (format, width, height) = (request.format, request.width, request.height);
    let sample = tokio::task::spawn_blocking(move || {
        sample_pixels(&bytes, format, width, height, rect)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("sampling task failed: {e}")))??;

    let snapshot = store.snapshot().await;
    let matches = find_closest(sample.lab, &snapshot.palette, &query);

    tracing::debug!(
        width,
        height,
        region = ?rect,
        pixels = sample.pixel_count,
        hex = %sample.hex,
        "Sampled region"
    );

    Ok(Json(SampleResponse {
        color: ColorDto::from_lab(sample.lab),
        pixel_count: sample.pixel_count,
        region: rect.into(),
        metric: query.metric.to_string(),
        matches: to_dtos(&matches),
    }))
}
