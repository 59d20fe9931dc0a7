//! Per-frame scene orchestration.
//!
//! The renderer runs once per animation frame at whatever rate the host
//! loop drives it. Expensive work — turbidity, solar position, the Preetham
//! absolutes and Perez coefficients, and both particle fields — is only
//! redone when the scene's dirty bit says the data changed; the sky grid and
//! particle layers are painted every frame from the cached derivation.

use rayon::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::{debug, info};

use crate::particles::{CloudField, PrecipitationField};
use crate::scene::{GeoPosition, SceneState, TimeSnapshot, WeatherSnapshot};
use crate::sky::{
    estimate_turbidity, perez_coefficients, sky_color, zenith_absolutes, PerezCoefficients, Rgb,
    ZenithAbsolutes,
};
use crate::solar::{day_alpha, solar_position, SolarPosition};
use crate::surface::PixelSurface;

/// Default sky sampling grid, columns by rows.
pub const DEFAULT_GRID: (u32, u32) = (64, 36);

/// Everything derived from one (position, weather, time) triple.
///
/// Rebuilt wholesale on every change — particle fields are reset rather than
/// diffed against the previous weather.
struct FrameDerivation {
    turbidity: f64,
    solar: SolarPosition,
    zenith_abs: ZenithAbsolutes,
    coefficients: PerezCoefficients,
    alpha: f64,
    clouds: CloudField,
    precipitation: PrecipitationField,
}

/// Paints sky, clouds and precipitation into an owned pixel surface.
pub struct Renderer {
    surface: PixelSurface,
    grid_cols: u32,
    grid_rows: u32,
    derived: Option<FrameDerivation>,
}

impl Renderer {
    /// Renderer with the default 64x36 sky grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_grid(width, height, DEFAULT_GRID.0, DEFAULT_GRID.1)
    }

    /// Renderer with a custom sky sampling resolution.
    pub fn with_grid(width: u32, height: u32, grid_cols: u32, grid_rows: u32) -> Self {
        debug_assert!(grid_cols > 0 && grid_rows > 0);
        Renderer {
            surface: PixelSurface::new(width, height),
            grid_cols,
            grid_rows,
            derived: None,
        }
    }

    /// Draw one frame.
    ///
    /// Blank frame while any of position/weather/time is still missing.
    /// Consumes the scene's dirty bit; a set bit (or a first frame) rebuilds
    /// the whole derivation before painting.
    pub fn render(&mut self, scene: &mut SceneState) {
        self.surface.clear();
        if !scene.is_ready() {
            return;
        }

        if scene.take_changed() || self.derived.is_none() {
            if let Some((position, weather, time)) = scene.snapshot() {
                self.derived = Some(derive(position, weather, time, &self.surface));
            }
        }

        let Some(derived) = self.derived.as_mut() else {
            return;
        };
        paint_sky(&mut self.surface, self.grid_cols, self.grid_rows, derived);
        // Layering order: sky behind clouds behind precipitation
        derived.clouds.simulate(&mut self.surface);
        derived.precipitation.simulate(&mut self.surface);
    }

    /// Resize the drawing surface and force a full recompute on the next
    /// frame.
    pub fn notify_resize(&mut self, scene: &mut SceneState, width: u32, height: u32) {
        self.surface.resize(width, height);
        scene.mark_changed();
        info!(width, height, "viewport resized");
    }

    /// The last rendered frame as RGBA bytes.
    pub fn frame(&self) -> &[u8] {
        self.surface.frame()
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Turbidity of the current derivation, if one exists yet.
    pub fn turbidity(&self) -> Option<f64> {
        self.derived.as_ref().map(|d| d.turbidity)
    }

    /// Sun position of the current derivation, if one exists yet.
    pub fn sun_position(&self) -> Option<SolarPosition> {
        self.derived.as_ref().map(|d| d.solar)
    }

    /// Number of live cloud particles.
    pub fn cloud_count(&self) -> usize {
        self.derived.as_ref().map_or(0, |d| d.clouds.len())
    }

    /// Number of live precipitation particles.
    pub fn droplet_count(&self) -> usize {
        self.derived.as_ref().map_or(0, |d| d.precipitation.len())
    }
}

/// Recompute everything the frame needs from a fresh data triple.
fn derive(
    position: &GeoPosition,
    weather: &WeatherSnapshot,
    time: &TimeSnapshot,
    surface: &PixelSurface,
) -> FrameDerivation {
    let turbidity = estimate_turbidity(weather.ozone, weather.humidity);
    let solar = solar_position(position, time);
    let zenith_abs = zenith_absolutes(turbidity, solar.zenith);
    let coefficients = perez_coefficients(turbidity);
    let alpha = day_alpha(time.local_time, time.sunrise, time.sunset);

    let viewport = surface.viewport();
    let clouds = CloudField::new(weather, viewport);
    let precipitation = PrecipitationField::new(weather, viewport);

    debug!(
        turbidity,
        solar_zenith = solar.zenith,
        alpha,
        clouds = clouds.len(),
        droplets = precipitation.len(),
        "scene derivation refreshed"
    );

    FrameDerivation {
        turbidity,
        solar,
        zenith_abs,
        coefficients,
        alpha,
        clouds,
        precipitation,
    }
}

/// Evaluate the sky model on the sampling grid and fill one screen-space
/// rectangle per cell, using the dawn/dusk alpha as global opacity.
fn paint_sky(surface: &mut PixelSurface, cols: u32, rows: u32, derived: &FrameDerivation) {
    // Grid colors are independent; evaluate the model across cells in
    // parallel, then blit sequentially
    let colors: Vec<Rgb> = (0..rows * cols)
        .into_par_iter()
        .map(|cell| {
            let row = f64::from(cell / cols) / f64::from(rows);
            let col = f64::from(cell % cols) / f64::from(cols);
            // Columns span the full compass, rows go from zenith to horizon
            let azimuth = (col * 2.0 - 1.0) * PI;
            let zenith = row * FRAC_PI_2;
            sky_color(
                zenith,
                azimuth,
                &derived.zenith_abs,
                derived.solar.zenith,
                derived.solar.azimuth,
                &derived.coefficients,
            )
        })
        .collect();

    let cell_w = f64::from(surface.width()) / f64::from(cols);
    let cell_h = f64::from(surface.height()) / f64::from(rows);
    let alpha = derived.alpha as u8;
    for (cell, rgb) in colors.iter().enumerate() {
        let row = cell as u32 / cols;
        let col = cell as u32 % cols;
        surface.fill_rect(
            (f64::from(col) * cell_w) as f32,
            (f64::from(row) * cell_h) as f32,
            cell_w as f32,
            cell_h as f32,
            [rgb.r as u8, rgb.g as u8, rgb.b as u8],
            alpha,
        );
    }
}
