//! Sky Model Validation Test Suite
//!
//! Validates the analytic daylight pipeline against the published model and
//! against reference values computed once and pinned.
//!
//! # Test Categories
//! 1. Turbidity estimation from weather observations
//! 2. Preetham zenith absolutes (luminance ratio + chromaticities)
//! 3. Perez distribution function and coefficient tables
//! 4. Yxy to RGB conversion and gamma correction
//! 5. Solar geometry and the dawn/dusk alpha factor
//!
//! # References
//! - Preetham, A.J., Shirley, P., Smits, B. (1999). "A Practical Analytic
//!   Model for Daylight." SIGGRAPH '99.
//! - Perez, R., Seals, R., Michalsky, J. (1993). "All-weather model for sky
//!   luminance distribution." Solar Energy, 50(3), 235-245.
//!
//! Run with: `cargo test --test sky_model_validation`

use approx::assert_relative_eq;
use sky_sim_core::{
    day_alpha, estimate_turbidity, gamma_correct, perez_coefficients, sky_color, solar_position,
    zenith_absolutes, GeoPosition, TimeSnapshot,
};
// ───────────────────────────────────────────────────────────────────────────
// SECTION 1: TURBIDITY
// ───────────────────────────────────────────────────────────────────────────

#[test]
fn test_turbidity_stays_in_model_range_for_contract_inputs() {
    // Ozone 275-500 DU and humidity 0-100% must land in roughly [2, 8]
    let mut ozone = 275.0;
    while ozone <= 500.0 {
        let mut humidity = 0.0;
        while humidity <= 100.0 {
            let t = estimate_turbidity(ozone, humidity);
            assert!(
                (2.0..=8.0).contains(&t),
                "turbidity {t} out of range for ozone {ozone} humidity {humidity}"
            );
            humidity += 10.0;
        }
        ozone += 25.0;
    }
}

#[test]
fn test_turbidity_reference_scenario() {
    // The end-to-end scenario value, pinned
    assert_relative_eq!(estimate_turbidity(300.0, 50.0), 2.8133333333, epsilon = 1e-9);
}

// ───────────────────────────────────────────────────────────────────────────
// SECTION 2: ZENITH ABSOLUTES
// ───────────────────────────────────────────────────────────────────────────

#[test]
fn test_zenith_absolutes_pinned_triple() {
    let za = zenith_absolutes(2.5, 1.0);
    assert_relative_eq!(za.luminance, 0.2000899678, epsilon = 1e-9);
    assert_relative_eq!(za.x, 0.241, epsilon = 1e-9);
    assert_relative_eq!(za.y, 0.24633, epsilon = 1e-9);
}

#[test]
fn test_zenith_luminance_is_normalized() {
    // Yz/Y0 must be exactly 1 for a sun at the zenith, whatever the haze
    for turbidity in [2.0, 3.5, 5.0, 8.0] {
        let za = zenith_absolutes(turbidity, 0.0);
        assert_relative_eq!(za.luminance, 1.0, epsilon = 1e-12);
    }
}

// ───────────────────────────────────────────────────────────────────────────
// SECTION 3: PEREZ DISTRIBUTION
// ───────────────────────────────────────────────────────────────────────────

#[test]
fn test_perez_coefficients_linear_in_turbidity() {
    let lo = perez_coefficients(2.0);
    let mid = perez_coefficients(5.0);
    let hi = perez_coefficients(8.0);
    // Linear: the midpoint of the endpoints equals the coefficient at the
    // midpoint turbidity
    assert_relative_eq!(
        mid.luminance.a,
        (lo.luminance.a + hi.luminance.a) / 2.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(mid.x.d, (lo.x.d + hi.x.d) / 2.0, epsilon = 1e-12);
    assert_relative_eq!(mid.y.b, (lo.y.b + hi.y.b) / 2.0, epsilon = 1e-12);
}

// ───────────────────────────────────────────────────────────────────────────
// SECTION 4: COLOR CONVERSION
// ───────────────────────────────────────────────────────────────────────────

#[test]
fn test_gamma_correct_total_over_reals() {
    assert_eq!(gamma_correct(-5.0), 0.0);
    assert_eq!(gamma_correct(0.0), 0.0);
    assert_eq!(gamma_correct(1.0), 1.0);
    assert_eq!(gamma_correct(7.5), 1.0);
    let v = gamma_correct(0.25);
    assert!(v > 0.25 && v < 1.0, "1/1.8 power brightens midtones: {v}");
}

#[test]
fn test_sky_color_pinned_pixel() {
    let za = zenith_absolutes(3.0, 0.8);
    let coeffs = perez_coefficients(3.0);
    let rgb = sky_color(0.5, 0.3, &za, 0.8, 2.0, &coeffs);
    assert_relative_eq!(rgb.r, 83.48235627, epsilon = 1e-6);
    assert_relative_eq!(rgb.g, 112.06359150, epsilon = 1e-6);
    assert_relative_eq!(rgb.b, 162.16771723, epsilon = 1e-6);
}

#[test]
fn test_clear_sky_is_blue_away_from_sun() {
    let za = zenith_absolutes(2.5, 0.6);
    let coeffs = perez_coefficients(2.5);
    // Looking at a patch well away from the sun azimuth
    let rgb = sky_color(0.4, -2.0, &za, 0.6, 1.0, &coeffs);
    assert!(
        rgb.b > rgb.r,
        "clear sky should be blue-dominant, got r {} b {}",
        rgb.r,
        rgb.b
    );
}

// ───────────────────────────────────────────────────────────────────────────
// SECTION 5: SOLAR GEOMETRY
// ───────────────────────────────────────────────────────────────────────────

#[test]
fn test_solar_position_pinned_midsummer_noon() {
    let position = GeoPosition {
        name: "New York".into(),
        country: "US".into(),
        latitude: 40.7,
        longitude: -74.0,
    };
    let time = TimeSnapshot {
        local_time: 1_624_276_800,
        sunrise: 1_624_255_200,
        sunset: 1_624_308_000,
    };
    let sun = solar_position(&position, &time);
    assert_relative_eq!(sun.zenith, 0.9981132826, epsilon = 1e-9);
    assert_relative_eq!(sun.azimuth, 0.9947339210, epsilon = 1e-9);
    assert!(sun.zenith < 60f64.to_radians());
}

#[test]
fn test_day_alpha_window_anchors() {
    let sunrise = 1_624_255_200;
    let sunset = 1_624_308_000;
    assert_eq!(day_alpha(sunrise, sunrise, sunset), 100.0);
    assert_eq!(day_alpha(sunset, sunrise, sunset), 100.0);
    assert_eq!(day_alpha(sunrise - 21_600, sunrise, sunset), 50.0);
    // Beyond the six-hour window the fade is clamped, not extrapolated
    assert_eq!(day_alpha(sunrise - 43_200, sunrise, sunset), 50.0);
    assert_eq!(day_alpha((sunrise + sunset) / 2, sunrise, sunset), 100.0);
}
