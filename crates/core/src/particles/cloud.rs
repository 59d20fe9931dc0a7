//! Wind-driven cloud particles.

use super::Vec3;
use crate::scene::WeatherSnapshot;
use crate::surface::{PixelSurface, Viewport};
use std::f32::consts::FRAC_PI_2;

/// Base sprite radius in world units before scale and perspective.
const CLOUD_RADIUS: f32 = 120.0;

/// Sprite opacity, out of 255.
const CLOUD_ALPHA: u8 = 50;

/// Depth band clouds spawn in.
const SPAWN_DEPTH: std::ops::Range<f32> = -1000.0..0.0;

/// A single drifting cloud.
///
/// Velocity comes from the wind vector and survives respawns; position,
/// scale and rotation are re-rolled every time the cloud is recycled.
#[derive(Debug, Clone)]
pub struct Cloud {
    position: Vec3,
    velocity: Vec3,
    scale: f32,
    rotation: f32,
    shade: f32,
}

impl Cloud {
    fn new(viewport: Viewport, wind_speed: f32, wind_bearing: f32, uv_index: f32) -> Self {
        let bearing = wind_bearing.to_radians();

        // Wind decomposed into the horizontal plane at half strength, with
        // a ±5% per-cloud jitter on each component
        let vx = -bearing.sin() * wind_speed / 2.0 * rand::random_range(0.95..1.05);
        let vz = bearing.cos() * wind_speed / 2.0 * rand::random_range(0.95..1.05);

        // UV index tints the cover from dark storm gray toward bright white
        let shade = uv_index / 6.0 * 200.0 + rand::random_range(0.0..55.0);

        Cloud {
            position: spawn_position(viewport),
            velocity: Vec3::new(vx, 0.0, vz),
            scale: rand::random_range(0.5..2.0),
            rotation: rand::random_range(-FRAC_PI_2..FRAC_PI_2),
            shade,
        }
    }

    /// Drift with the wind; vertical position never changes.
    fn advance(&mut self) {
        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;
    }

    fn draw(&self, surface: &mut PixelSurface) {
        let Some((sx, sy, perspective)) = surface.project(self.position) else {
            return;
        };
        let rx = CLOUD_RADIUS * self.scale * perspective;
        // Rotation flattens the billboard the way the original tilted its
        // cloud models about the x axis
        let ry = rx * (0.5 + 0.2 * (self.rotation * 0.7).cos());
        let shade = self.shade.min(255.0) as u8;
        surface.fill_ellipse(sx, sy, rx, ry, [shade, shade, shade], CLOUD_ALPHA);
    }

    fn out_of_bounds(&self, viewport: Viewport) -> bool {
        self.position.x.abs() > viewport.width / 2.0
            || self.position.z > 1000.0
            || self.position.z < -2000.0
    }

    /// Re-roll position, scale and rotation; the wind velocity is kept so the
    /// cover keeps moving coherently.
    fn respawn(&mut self, viewport: Viewport) {
        self.position = spawn_position(viewport);
        self.scale = rand::random_range(0.5..2.0);
        self.rotation = rand::random_range(-FRAC_PI_2..FRAC_PI_2);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

fn spawn_position(viewport: Viewport) -> Vec3 {
    Vec3::new(
        rand::random_range(-viewport.width / 2.0..viewport.width / 2.0),
        rand::random_range(-viewport.height / 2.0..viewport.height / 2.0),
        rand::random_range(SPAWN_DEPTH),
    )
}

/// The full cloud cover for one weather observation.
#[derive(Debug, Clone, Default)]
pub struct CloudField {
    clouds: Vec<Cloud>,
}

impl CloudField {
    /// Build the cover from a weather snapshot: one cloud per one and a half
    /// percent of reported cover, rounded down.
    pub fn new(weather: &WeatherSnapshot, viewport: Viewport) -> Self {
        let count = (weather.cloud_cover_pct * 2.0 / 3.0).floor() as usize;
        let clouds = (0..count)
            .map(|_| {
                Cloud::new(
                    viewport,
                    weather.wind_speed as f32,
                    weather.wind_bearing as f32,
                    weather.uv_index as f32,
                )
            })
            .collect();
        CloudField { clouds }
    }

    /// Advance, draw and recycle every cloud for one frame.
    pub fn simulate(&mut self, surface: &mut PixelSurface) {
        let viewport = surface.viewport();
        for cloud in &mut self.clouds {
            cloud.advance();
            cloud.draw(surface);
            if cloud.out_of_bounds(viewport) {
                cloud.respawn(viewport);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
