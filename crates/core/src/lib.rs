//! Sky Simulation Core Library
//!
//! A physically-inspired real-time sky, cloud and precipitation renderer
//! driven by live geolocation and weather data. The sky follows the
//! Preetham/Perez analytic daylight model; clouds and precipitation are
//! stylized particle fields advanced every frame.
//!
//! ## Architecture
//!
//! External I/O (a weather fetch and a geolocation callback) replaces whole
//! snapshots inside [`SceneState`] and sets a dirty bit. Each frame the
//! [`Renderer`] consumes the bit, recomputing solar geometry, sky
//! coefficients and particle fields only when something changed, then paints
//! sky, clouds and precipitation into an RGBA surface the host displays.

pub mod particles;
pub mod renderer;
pub mod scene;
pub mod sky;
pub mod solar;
pub mod surface;

// Re-export the data contract
pub use scene::{GeoPosition, PrecipitationKind, SceneState, TimeSnapshot, WeatherSnapshot};

// Re-export the sky model
pub use sky::{
    estimate_turbidity, gamma_correct, perez_coefficients, sky_color, zenith_absolutes,
    PerezCoefficients, Rgb, ZenithAbsolutes,
};

// Re-export solar geometry
pub use solar::{day_alpha, solar_position, SolarPosition};

// Re-export the frame pipeline
pub use particles::{CloudField, PrecipitationField, Vec3};
pub use renderer::Renderer;
pub use surface::{PixelSurface, Viewport};
