use axum::{
    extract::{rejection::QueryRejection, Query},
    response::Json,
};
use serde::{Deserialize, Serialize};
use swatch_match::{Hsl, Hsv, Lab, Lch, Rgb};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// One color in every supported representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ColorDto {
    /// `#RRGGBB`, upper case
    pub hex: String,
    pub rgb: [u8; 3],
    /// Hue in degrees, saturation and lightness in percent, rounded
    pub hsl: [u16; 3],
    /// Hue in degrees, saturation and value in percent, rounded
    pub hsv: [u16; 3],
    pub lab: [f64; 3],
    /// Lightness, chroma, hue in degrees
    pub lch: [f64; 3],
}

impl ColorDto {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::build(rgb, Lab::from(rgb))
    }

    /// Keep `lab` unrounded; the RGB side is its nearest displayable color.
    pub fn from_lab(lab: Lab) -> Self {
        Self::build(Rgb::from(lab), lab)
    }

    fn build(rgb: Rgb, lab: Lab) -> Self {
        let (h, s, l) = Hsl::from(rgb).rounded();
        let (hv, sv, v) = Hsv::from(rgb).rounded();
        let lch = Lch::from(lab);
        Self {
            hex: rgb.to_hex(),
            rgb: rgb.to_bytes(),
            hsl: [h, s as u16, l as u16],
            hsv: [hv, sv as u16, v as u16],
            lab: lab.to_array(),
            lch: [lch.l, lch.c, lch.h],
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Hex color, with or without `#`, 3 or 6 digits
    pub hex: Option<String>,
}

/// Convert a hex color
///
/// Returns the color as hex, RGB, HSL, HSV, Lab and Lch.
#[utoipa::path(
    get,
    path = "/api/convert",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Color converted", body = ColorDto),
        (status = 400, description = "Missing or malformed hex"),
    ),
    tag = "Colors"
)]
pub async fn handle_convert(
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<ColorDto>, ApiError> {
    let Query(query) = query?;
    let hex = query
        .hex
        .ok_or_else(|| ApiError::BadRequest("missing query parameter: hex".to_string()))?;
    let rgb: Rgb = hex.parse()?;
    Ok(Json(ColorDto::from_rgb(rgb)))
}
