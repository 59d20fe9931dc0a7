//! Scene state and the external data contract.
//!
//! Position, weather and time arrive from an external collaborator (a
//! geolocation callback and a single weather fetch) and are only ever
//! replaced wholesale. The renderer consumes them through [`SceneState`],
//! which carries a single dirty bit gating the expensive per-change
//! recomputation.

use serde::{Deserialize, Serialize};

/// A named geographic location, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub name: String,
    pub country: String,
    pub latitude: f64,  // degrees, [-90, 90]
    pub longitude: f64, // degrees, [-180, 180]
}

/// Kind of falling precipitation reported by the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationKind {
    Rain,
    Snow,
    Sleet,
    None,
}

impl PrecipitationKind {
    /// Whether anything actually falls for this kind.
    pub fn is_precipitating(self) -> bool {
        self != PrecipitationKind::None
    }
}

/// One weather observation for the current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,       // °C
    pub humidity: f64,          // %, 0-100
    pub cloud_cover_pct: f64,   // %, 0-100
    pub ozone: f64,             // Dobson units
    pub uv_index: f64,          // 0-11ish
    pub wind_speed: f64,        // km/h
    pub wind_bearing: f64,      // degrees compass, 0 = North
    pub precipitation_type: PrecipitationKind,
    pub precipitation_intensity: f64, // mm/h
}

/// Local time and day boundaries, all in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    pub local_time: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Mutable scene state shared between the async data producer and the
/// frame-driven renderer.
///
/// The producer replaces whole snapshots and sets the dirty bit; the renderer
/// consumes the bit once per change with [`SceneState::take_changed`]. Both
/// run on the same event loop, so no locking is involved.
#[derive(Debug, Default)]
pub struct SceneState {
    position: Option<GeoPosition>,
    weather: Option<WeatherSnapshot>,
    time: Option<TimeSnapshot>,
    changed: bool,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current position and mark the scene dirty.
    pub fn set_position(&mut self, position: GeoPosition) {
        self.position = Some(position);
        self.changed = true;
    }

    /// Replace the current weather observation and mark the scene dirty.
    pub fn set_weather(&mut self, weather: WeatherSnapshot) {
        self.weather = Some(weather);
        self.changed = true;
    }

    /// Replace the current time snapshot and mark the scene dirty.
    pub fn set_time(&mut self, time: TimeSnapshot) {
        self.time = Some(time);
        self.changed = true;
    }

    /// Force a recomputation on the next frame (used on viewport resize).
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Consume the dirty bit, returning whether anything changed since the
    /// last call.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// True once all three snapshots have arrived.
    pub fn is_ready(&self) -> bool {
        self.position.is_some() && self.weather.is_some() && self.time.is_some()
    }

    pub fn position(&self) -> Option<&GeoPosition> {
        self.position.as_ref()
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn time(&self) -> Option<&TimeSnapshot> {
        self.time.as_ref()
    }

    /// All three snapshots at once, or `None` while still waiting for data.
    pub fn snapshot(&self) -> Option<(&GeoPosition, &WeatherSnapshot, &TimeSnapshot)> {
        Some((
            self.position.as_ref()?,
            self.weather.as_ref()?,
            self.time.as_ref()?,
        ))
    }
}
