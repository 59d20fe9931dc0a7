//! Yxy to display RGB conversion and the full per-direction sky color.

use super::preetham::{gamma_angle, perez, PerezCoefficients, ZenithAbsolutes};
use std::f64::consts::FRAC_PI_2;

/// Display color with channels in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Display gamma correction, power 1/1.8, clamped into [0, 1].
///
/// Total over all inputs: negatives collapse to 0 and overbright values
/// saturate at 1.
pub fn gamma_correct(v: f64) -> f64 {
    v.max(0.0).powf(1.0 / 1.8).min(1.0)
}

/// Convert a Yxy triple to gamma-corrected RGB, channels scaled to [0, 255].
pub fn yxy_to_rgb(luminance: f64, x: f64, y: f64) -> Rgb {
    let big_x = x / y * luminance;
    let big_z = (1.0 - x - y) / y * luminance;

    Rgb {
        r: gamma_correct(3.2406 * big_x - 1.5372 * luminance - 0.4986 * big_z) * 255.0,
        g: gamma_correct(-0.9689 * big_x + 1.8758 * luminance + 0.0415 * big_z) * 255.0,
        b: gamma_correct(0.0557 * big_x - 0.2040 * luminance + 1.0570 * big_z) * 255.0,
    }
}

/// Sky color for one view direction.
///
/// The view zenith is clamped to π/2 − 0.01 and then nudged 0.01 inward, so
/// grid samples at the horizon stay clear of the Perez singularity. Each Yxy
/// channel is the zenith absolute scaled by the ratio of the Perez function
/// at the view direction over its value toward the sun.
pub fn sky_color(
    zenith: f64,
    azimuth: f64,
    zenith_abs: &ZenithAbsolutes,
    sun_zenith: f64,
    sun_azimuth: f64,
    coeffs: &PerezCoefficients,
) -> Rgb {
    let zenith = zenith.min(FRAC_PI_2 - 0.01) + 0.01;
    let gamma = gamma_angle(zenith, azimuth, sun_zenith, sun_azimuth);

    let lum = zenith_abs.luminance * perez(zenith, gamma, &coeffs.luminance)
        / perez(0.0, sun_zenith, &coeffs.luminance);
    let x = zenith_abs.x * perez(zenith, gamma, &coeffs.x) / perez(0.0, sun_zenith, &coeffs.x);
    let y = zenith_abs.y * perez(zenith, gamma, &coeffs.y) / perez(0.0, sun_zenith, &coeffs.y);

    yxy_to_rgb(lum, x, y)
}
