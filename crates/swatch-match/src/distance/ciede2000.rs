//! CIEDE2000 color difference
//!
//! The chroma and hue weights (`S_C`, `S_H`, `R_C`) use the mean of the
//! input chromas *before* the G adjustment of the a* axis. Published test
//! tables use the adjusted mean and disagree in the second decimal for
//! saturated colors.

use crate::color::{normalize_degrees, Lab, Lch};

/// 25^7, the chroma scale constant shared by G and R_C.
const POW25_7: f64 = 6_103_515_625.0;

#[inline]
fn chroma_weight(c_mean: f64) -> f64 {
    let c7 = c_mean.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// Hue angle of `(a, b)` in degrees, `[0, 360)`.
#[inline]
fn hue_degrees(a: f64, b: f64) -> f64 {
    normalize_degrees(b.atan2(a).to_degrees())
}

/// Perceptual difference between two Lab colors (k_L = k_C = k_H = 1).
///
/// Returns 0.0 for identical colors and a non-negative value otherwise.
/// Swapping the arguments yields the same result up to rounding error.
///
/// ```
/// use swatch_match::{delta_e_2000, Lab, Rgb};
///
/// let red = Lab::from(Rgb::new(255, 0, 0));
/// let almost_red = Lab::from(Rgb::new(254, 0, 0));
/// let blue = Lab::from(Rgb::new(0, 0, 255));
///
/// assert_eq!(delta_e_2000(red, red), 0.0);
/// assert!(delta_e_2000(red, almost_red) < 1.0);
/// assert!(delta_e_2000(red, blue) > 20.0);
/// ```
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = Lch::from(lab1).c;
    let c2 = Lch::from(lab2).c;

    let delta_l = lab2.l - lab1.l;
    let l_mean = (lab1.l + lab2.l) / 2.0;
    let c_mean = (c1 + c2) / 2.0;

    // Stretch the a* axis for low-chroma colors
    let weight = chroma_weight(c_mean);
    let g = 0.5 * (1.0 - weight);
    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);

    let c1p = (a1p * a1p + lab1.b * lab1.b).sqrt();
    let c2p = (a2p * a2p + lab2.b * lab2.b).sqrt();
    let delta_cp = c2p - c1p;

    let h1p = hue_degrees(a1p, lab1.b);
    let h2p = hue_degrees(a2p, lab2.b);

    let chroma_product = c1p * c2p;
    let h_abs = (h1p - h2p).abs();

    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else if h_abs <= 180.0 {
        h2p - h1p
    } else if h2p <= h1p {
        h2p - h1p + 360.0
    } else {
        h2p - h1p - 360.0
    };

    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let h_mean = if chroma_product == 0.0 {
        h1p + h2p
    } else if h_abs <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let l_off = (l_mean - 50.0) * (l_mean - 50.0);
    let s_l = 1.0 + 0.015 * l_off / (20.0 + l_off).sqrt();
    let s_c = 1.0 + 0.045 * c_mean;
    let s_h = 1.0 + 0.015 * c_mean * t;

    let delta_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * weight;
    let r_t = -r_c * (2.0 * delta_theta).to_radians().sin();

    let l_term = delta_l / s_l;
    let c_term = delta_cp / s_c;
    let h_term = delta_big_hp / s_h;

    let sum = l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term;
    // The rotation term can push a near-zero sum a hair below zero
    sum.max(0.0).sqrt()
}
