//! Falling precipitation particles.

use super::Vec3;
use crate::scene::{PrecipitationKind, WeatherSnapshot};
use crate::surface::{PixelSurface, Viewport};

/// Density cap: at most 25² droplets regardless of reported intensity.
const MAX_DENSITY: f64 = 25.0;

/// One falling particle: a raindrop, snowflake or sleet pellet.
///
/// Kinds differ only in their parameter table (opacity, downward
/// acceleration, size) and in the sprite drawn: rain is a thin streak, snow
/// and sleet are round.
#[derive(Debug, Clone)]
pub struct Droplet {
    kind: PrecipitationKind,
    position: Vec3,
    speed: f32,
    accel: f32,
    alpha: f32,
    size: f32,
}

impl Droplet {
    fn new(kind: PrecipitationKind, viewport: Viewport) -> Self {
        // Per-kind visual and physical parameters
        let (alpha, accel, size) = match kind {
            PrecipitationKind::Rain => (
                rand::random_range(5.0..20.0),
                0.5,
                rand::random_range(10.0..20.0),
            ),
            PrecipitationKind::Snow => (
                rand::random_range(50.0..100.0),
                0.2,
                rand::random_range(1.0..3.0),
            ),
            PrecipitationKind::Sleet => (
                rand::random_range(5.0..100.0),
                rand::random_range(0.2..0.5),
                rand::random_range(0.1..4.0),
            ),
            PrecipitationKind::None => (0.0, 0.0, 0.0),
        };

        Droplet {
            kind,
            position: Vec3::new(
                rand::random_range(-viewport.width / 2.0..viewport.width / 2.0),
                rand::random_range(-viewport.height..viewport.height),
                rand::random_range(-1000.0..100.0),
            ),
            speed: rand::random_range(0.0..3.0),
            accel,
            alpha,
            size,
        }
    }

    /// Gravity-like fall: constant acceleration added to the vertical speed
    /// every frame.
    fn advance(&mut self) {
        self.speed += self.accel;
        self.position.y += self.speed;
    }

    fn draw(&self, surface: &mut PixelSurface) {
        let Some((sx, sy, perspective)) = surface.project(self.position) else {
            return;
        };
        const WHITE: [u8; 3] = [255, 255, 255];
        let alpha = self.alpha.min(255.0) as u8;
        match self.kind {
            PrecipitationKind::Rain => {
                // Vertical streak, 1.5 world units of half-width
                let half_w = 1.5 * perspective;
                let len = self.size * perspective;
                surface.fill_rect(sx - half_w, sy - len / 2.0, half_w * 2.0, len, WHITE, alpha);
            }
            PrecipitationKind::Snow | PrecipitationKind::Sleet => {
                let r = self.size * perspective;
                surface.fill_ellipse(sx, sy, r, r, WHITE, alpha);
            }
            PrecipitationKind::None => {}
        }
    }

    fn out_of_bounds(&self, viewport: Viewport) -> bool {
        self.position.y > viewport.height
    }

    /// Reset above the viewport with zero speed; opacity and size are kept.
    fn respawn(&mut self, viewport: Viewport) {
        self.position = Vec3::new(
            rand::random_range(-viewport.width / 2.0..viewport.width / 2.0),
            -viewport.height / 2.0 - 100.0,
            rand::random_range(-1000.0..100.0),
        );
        self.speed = 0.0;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// All falling particles for one weather observation.
#[derive(Debug, Clone, Default)]
pub struct PrecipitationField {
    droplets: Vec<Droplet>,
}

impl PrecipitationField {
    /// Build the field from a weather snapshot.
    ///
    /// Droplet count responds quadratically to intensity — min(10·intensity,
    /// 25)² — so light drizzle stays sparse while a storm fills the view.
    /// A `none` precipitation type yields an empty field.
    pub fn new(weather: &WeatherSnapshot, viewport: Viewport) -> Self {
        if !weather.precipitation_type.is_precipitating() {
            return PrecipitationField::default();
        }

        let density = (weather.precipitation_intensity * 10.0).min(MAX_DENSITY);
        let count = density.powi(2).ceil() as usize;
        let droplets = (0..count)
            .map(|_| Droplet::new(weather.precipitation_type, viewport))
            .collect();
        PrecipitationField { droplets }
    }

    /// Advance, draw and recycle every droplet for one frame.
    pub fn simulate(&mut self, surface: &mut PixelSurface) {
        let viewport = surface.viewport();
        for droplet in &mut self.droplets {
            droplet.advance();
            droplet.draw(surface);
            if droplet.out_of_bounds(viewport) {
                droplet.respawn(viewport);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.droplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.droplets.is_empty()
    }
}
