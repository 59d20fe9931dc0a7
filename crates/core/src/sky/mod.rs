//! Analytic daylight sky model.
//!
//! Implements the Preetham/Perez clear-sky model: atmospheric turbidity is
//! estimated from the weather observation, zenith luminance and chromaticity
//! follow the published Preetham polynomial tables, and the Perez function
//! shapes the gradient across the sky dome. Per-direction Yxy values are
//! converted to display RGB through the standard linear transform plus gamma
//! correction.
//!
//! All angles are radians; degrees exist only at the input boundary. The
//! model is total over its stated domains: horizon singularities are avoided
//! by nudging the view zenith inward and the color conversion clamps each
//! channel into [0, 255].
//!
//! # References
//! - Preetham, A.J., Shirley, P., Smits, B. (1999). "A Practical Analytic
//!   Model for Daylight." SIGGRAPH '99.
//! - Perez, R., Seals, R., Michalsky, J. (1993). "All-weather model for sky
//!   luminance distribution." Solar Energy, 50(3), 235-245.

mod color;
mod preetham;
mod turbidity;

pub use color::{gamma_correct, sky_color, yxy_to_rgb, Rgb};
pub use preetham::{
    gamma_angle, perez, perez_coefficients, zenith_absolutes, ChannelCoefficients,
    PerezCoefficients, ZenithAbsolutes,
};
pub use turbidity::estimate_turbidity;
