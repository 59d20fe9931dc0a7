//! Per-frame particle fields: clouds and precipitation.
//!
//! Both fields follow the same contract: `simulate` advances every owned
//! particle, draws it, then respawns any particle that left the viewport
//! bounds. Particles are recycled in place, never freed. A field owns its
//! particles exclusively; weather changes rebuild whole fields rather than
//! diffing them.

mod cloud;
mod precipitation;

pub use cloud::{Cloud, CloudField};
pub use precipitation::{Droplet, PrecipitationField};

/// Particle-space vector, screen-centered coordinates.
pub type Vec3 = nalgebra::Vector3<f32>;
