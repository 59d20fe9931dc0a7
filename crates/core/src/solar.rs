//! Solar geometry: sun position and the dawn/dusk opacity factor.
//!
//! Sun angles follow the solar-time formulation of Preetham et al., appendix
//! A: an equation-of-time correction with two sinusoidal terms plus a
//! standard-meridian longitude offset, an annual sinusoidal declination
//! model, and the standard spherical-astronomy conversion to zenith/azimuth.
//!
//! # References
//! - Preetham, A.J., Shirley, P., Smits, B. (1999). "A Practical Analytic
//!   Model for Daylight." SIGGRAPH '99, appendix A.6.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::scene::{GeoPosition, TimeSnapshot};

/// Standard-meridian offset fed into the solar-time correction.
const STANDARD_MERIDIAN: f64 = 25.0;

/// Sun direction in sky coordinates, radians.
///
/// `zenith` is the polar angle from straight up; values past `π/2` mean the
/// sun is below the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub zenith: f64,
    pub azimuth: f64,
}

/// Compute the sun's zenith and azimuth for a position and local timestamp.
///
/// Pure arithmetic with no error paths; latitude/longitude are assumed to be
/// valid degrees and `local_time` a valid unix timestamp.
pub fn solar_position(position: &GeoPosition, time: &TimeSnapshot) -> SolarPosition {
    let longitude = position.longitude.to_radians();
    let latitude = position.latitude.to_radians();

    let (day_of_year, hour_of_day) = calendar_parts(time.local_time);
    let julian = f64::from(day_of_year);

    // Solar time: clock hour corrected by the equation of time and the
    // standard-meridian longitude offset (Preetham eq. A.2)
    let solar_time = hour_of_day + 0.170 * (4.0 * PI * (julian - 80.0) / 373.0).sin()
        - 0.129 * (2.0 * PI * (julian - 8.0) / 355.0).sin()
        + 12.0 * (STANDARD_MERIDIAN - longitude) / PI;

    // Solar declination, annual sinusoidal model (Preetham eq. A.5)
    let declination = 0.4093 * (2.0 * PI * (julian - 81.0) / 368.0).sin();

    let sin_l = latitude.sin();
    let cos_l = latitude.cos();
    let sin_d = declination.sin();
    let cos_d = declination.cos();
    let hour_angle = PI * solar_time / 12.0;
    let cos_h = hour_angle.cos();
    let sin_h = hour_angle.sin();

    SolarPosition {
        zenith: FRAC_PI_2 - (sin_l * sin_d - cos_l * cos_d * cos_h).asin(),
        azimuth: (-cos_d * sin_h).atan2(cos_l * sin_d - sin_l * cos_d * cos_h),
    }
}

/// Resolve a local unix timestamp into (1-based day of year, whole hours
/// since midnight).
fn calendar_parts(local_time: i64) -> (u32, f64) {
    DateTime::<Utc>::from_timestamp(local_time, 0)
        .map_or((1, 0.0), |dt| (dt.ordinal(), f64::from(dt.hour())))
}

/// Global scene opacity modeling the dawn/dusk fade, in [50, 100].
///
/// Returns 100 between sunrise and sunset (boundaries inclusive). Outside
/// that window the distance to the nearer boundary fades linearly from 100
/// down to 50 over six hours, clamped at 50 beyond.
pub fn day_alpha(local_time: i64, sunrise: i64, sunset: i64) -> f64 {
    const SIX_HOURS: f64 = 21_600.0;
    const MIN_ALPHA: f64 = 50.0;
    const MAX_ALPHA: f64 = 100.0;

    let distance = if local_time < sunrise {
        sunrise - local_time
    } else if local_time > sunset {
        local_time - sunset
    } else {
        return MAX_ALPHA;
    };

    let fade = (MAX_ALPHA - MIN_ALPHA) * distance as f64 / SIX_HOURS;
    (MAX_ALPHA - fade).max(MIN_ALPHA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn new_york() -> GeoPosition {
        GeoPosition {
            name: "New York".into(),
            country: "US".into(),
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    #[test]
    fn test_solar_position_midsummer_noon() {
        // 2021-06-21 12:00:00, reference values computed once and pinned
        let time = TimeSnapshot {
            local_time: 1_624_276_800,
            sunrise: 1_624_255_200,
            sunset: 1_624_308_000,
        };
        let sun = solar_position(&new_york(), &time);
        assert_relative_eq!(sun.zenith, 0.9981132826, epsilon = 1e-9);
        assert_relative_eq!(sun.azimuth, 0.9947339210, epsilon = 1e-9);
        // Plausible midday elevation: under 60 degrees from zenith
        assert!(sun.zenith < 60f64.to_radians());
    }

    #[test]
    fn test_solar_position_equator_new_year() {
        let position = GeoPosition {
            name: "Null Island".into(),
            country: "-".into(),
            latitude: 0.0,
            longitude: 0.0,
        };
        let time = TimeSnapshot {
            local_time: 1_609_459_200, // 2021-01-01 00:00:00
            sunrise: 0,
            sunset: 0,
        };
        let sun = solar_position(&position, &time);
        assert_relative_eq!(sun.zenith, 2.7154184678, epsilon = 1e-9);
        assert_relative_eq!(sun.azimuth, 2.8043119643, epsilon = 1e-9);
        // Midnight: sun far below the horizon
        assert!(sun.zenith > FRAC_PI_2);
    }

    #[test]
    fn test_day_alpha_daytime_is_full() {
        assert_eq!(day_alpha(5_000, 1_000, 10_000), 100.0);
        // Boundaries are "not before sunrise and not after sunset"
        assert_eq!(day_alpha(1_000, 1_000, 10_000), 100.0);
        assert_eq!(day_alpha(10_000, 1_000, 10_000), 100.0);
    }

    #[test]
    fn test_day_alpha_fades_before_sunrise() {
        let sunrise = 100_000;
        let sunset = 150_000;
        assert_eq!(day_alpha(sunrise - 21_600, sunrise, sunset), 50.0);
        assert_relative_eq!(
            day_alpha(sunrise - 10_800, sunrise, sunset),
            75.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_day_alpha_clamps_beyond_window() {
        // Twelve hours out the unclamped linear map would reach 0; the fade
        // bottoms out at 50 instead
        assert_eq!(day_alpha(100_000 - 43_200, 100_000, 150_000), 50.0);
        assert_eq!(day_alpha(150_000 + 43_200, 100_000, 150_000), 50.0);
    }
}
