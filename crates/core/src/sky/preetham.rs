//! Preetham zenith absolutes and Perez distribution coefficients.
//!
//! The numeric tables below are the published Preetham appendix values and
//! must be reproduced exactly; regression tests pin them.

use std::f64::consts::PI;

/// Luminance and chromaticity at the zenith.
///
/// `luminance` is the zenith luminance Yz normalized by its value for a sun
/// at the zenith (Yz/Y0), never the raw ratio expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZenithAbsolutes {
    pub luminance: f64,
    pub x: f64,
    pub y: f64,
}

/// One set of the five Perez distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

/// Perez parameter sets for the luminance and the two chromaticity channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerezCoefficients {
    pub luminance: ChannelCoefficients,
    pub x: ChannelCoefficients,
    pub y: ChannelCoefficients,
}

/// Evaluate the zenith absolutes for a turbidity and solar zenith angle.
///
/// The zenith luminance ratio is the Preetham closed-form tan expression,
/// normalized by its value at solar zenith 0. Chromaticities are the
/// turbidity-quadratic by zenith-cubic polynomial tables.
pub fn zenith_absolutes(turbidity: f64, solar_zenith: f64) -> ZenithAbsolutes {
    let chi = |angle: f64| {
        (4.0453 * turbidity - 4.9710) * ((4.0 / 9.0 - turbidity / 120.0) * angle).tan()
            - 0.2155 * turbidity
            + 2.4192
    };
    let yz = chi(PI - 2.0 * solar_zenith);
    let y0 = chi(PI);

    let z = solar_zenith;
    let z2 = z * z;
    let z3 = z2 * z;
    let t_vec = [turbidity * turbidity, turbidity, 1.0];

    let xv = [
        0.00166 * z3 - 0.00375 * z2 + 0.00209 * z,
        -0.02903 * z3 + 0.06377 * z2 - 0.03202 * z + 0.00394,
        0.11693 * z3 - 0.21196 * z2 + 0.06052 * z + 0.25886,
    ];
    let yv = [
        0.00275 * z3 - 0.00610 * z2 + 0.00317 * z,
        -0.04214 * z3 + 0.08970 * z2 - 0.04153 * z + 0.00516,
        0.15346 * z3 - 0.26756 * z2 + 0.06670 * z + 0.26688,
    ];

    ZenithAbsolutes {
        luminance: yz / y0,
        x: t_vec[0] * xv[0] + t_vec[1] * xv[1] + t_vec[2] * xv[2],
        y: t_vec[0] * yv[0] + t_vec[1] * yv[1] + t_vec[2] * yv[2],
    }
}

/// The three Perez parameter sets as linear functions of turbidity.
pub fn perez_coefficients(turbidity: f64) -> PerezCoefficients {
    let t = turbidity;
    PerezCoefficients {
        luminance: ChannelCoefficients {
            a: 0.1787 * t - 1.4630,
            b: -0.3554 * t + 0.4275,
            c: -0.0227 * t + 5.3251,
            d: 0.1206 * t - 2.5771,
            e: -0.0670 * t + 0.3703,
        },
        x: ChannelCoefficients {
            a: -0.0193 * t - 0.2592,
            b: -0.0665 * t + 0.0008,
            c: -0.0004 * t + 0.2125,
            d: -0.0641 * t - 0.8989,
            e: -0.0033 * t + 0.0452,
        },
        y: ChannelCoefficients {
            a: -0.0167 * t - 0.2608,
            b: -0.0950 * t + 0.0092,
            c: -0.0079 * t + 0.2102,
            d: -0.0441 * t - 1.6537,
            e: -0.0109 * t + 0.0529,
        },
    }
}

/// The Perez luminance distribution function.
///
/// The 0.01 epsilon keeps the cos in the first factor away from zero for
/// view directions at the horizon.
pub fn perez(zenith: f64, gamma: f64, coeffs: &ChannelCoefficients) -> f64 {
    (1.0 + coeffs.a * (coeffs.b / (zenith + 0.01).cos()).exp())
        * (1.0 + coeffs.c * (coeffs.d * gamma).exp() + coeffs.e * gamma.cos().powi(2))
}

/// Angular distance between a sky direction and the sun, via the spherical
/// law of cosines.
pub fn gamma_angle(zenith: f64, azimuth: f64, sun_zenith: f64, sun_azimuth: f64) -> f64 {
    (sun_zenith.sin() * zenith.sin() * (azimuth - sun_azimuth).cos()
        + sun_zenith.cos() * zenith.cos())
    .acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_zenith_absolutes_reference_triple() {
        // Pinned once against the published tables
        let za = zenith_absolutes(2.5, 1.0);
        assert_relative_eq!(za.luminance, 0.2000899678, epsilon = 1e-9);
        assert_relative_eq!(za.x, 0.241, epsilon = 1e-9);
        assert_relative_eq!(za.y, 0.24633, epsilon = 1e-9);
    }

    #[test]
    fn test_zenith_absolutes_plausible_ranges() {
        // Known Preetham output ranges over the full working domain
        let mut turbidity = 2.0;
        while turbidity <= 8.0 {
            let mut zenith = 0.0;
            while zenith <= FRAC_PI_2 {
                let za = zenith_absolutes(turbidity, zenith);
                assert!(
                    za.luminance > 0.0 && za.luminance <= 5.0,
                    "Yz/Y0 {} out of range at T={turbidity} Z={zenith}",
                    za.luminance
                );
                assert!(
                    (0.15..=0.4).contains(&za.x),
                    "xz {} out of range at T={turbidity} Z={zenith}",
                    za.x
                );
                assert!(
                    (0.15..=0.4).contains(&za.y),
                    "yz {} out of range at T={turbidity} Z={zenith}",
                    za.y
                );
                zenith += 0.05;
            }
            turbidity += 0.25;
        }
    }

    #[test]
    fn test_perez_coefficient_tables() {
        let coeffs = perez_coefficients(2.5);
        assert_relative_eq!(coeffs.luminance.a, -1.01625, epsilon = 1e-12);
        assert_relative_eq!(coeffs.luminance.c, 5.26835, epsilon = 1e-12);
        assert_relative_eq!(coeffs.x.d, -1.05915, epsilon = 1e-12);
        assert_relative_eq!(coeffs.y.e, 0.02565, epsilon = 1e-12);
    }

    #[test]
    fn test_perez_function_reference_value() {
        let coeffs = perez_coefficients(2.5);
        assert_relative_eq!(
            perez(0.3, 0.7, &coeffs.luminance),
            0.8183879557,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_gamma_angle_reference_and_identity() {
        assert_relative_eq!(gamma_angle(0.5, 0.3, 0.8, 2.0), 0.9678088620, epsilon = 1e-9);
        // Looking straight at the sun
        assert_relative_eq!(gamma_angle(0.8, 2.0, 0.8, 2.0), 0.0, epsilon = 1e-6);
    }
}
