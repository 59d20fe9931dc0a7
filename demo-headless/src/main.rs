use clap::Parser;
use sky_sim_core::{
    GeoPosition, PrecipitationKind, Renderer, SceneState, TimeSnapshot, WeatherSnapshot,
};
use std::path::PathBuf;

/// Headless sky renderer demo with configurable weather
#[derive(Parser, Debug)]
#[command(name = "sky-sim-demo")]
#[command(about = "Weather-driven sky simulation demo", long_about = None)]
struct Args {
    /// Latitude in degrees
    #[arg(long, default_value_t = 40.7)]
    latitude: f64,

    /// Longitude in degrees
    #[arg(long, default_value_t = -74.0)]
    longitude: f64,

    /// Location label
    #[arg(long, default_value = "New York")]
    name: String,

    /// Country label
    #[arg(long, default_value = "US")]
    country: String,

    /// Temperature in °C
    #[arg(short, long, default_value_t = 24.0)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 50.0)]
    humidity: f64,

    /// Cloud cover in %
    #[arg(short, long, default_value_t = 20.0)]
    clouds: f64,

    /// Ozone concentration in Dobson units
    #[arg(long, default_value_t = 300.0)]
    ozone: f64,

    /// UV index (0-11)
    #[arg(long, default_value_t = 5.0)]
    uv_index: f64,

    /// Wind speed in km/h
    #[arg(short, long, default_value_t = 10.0)]
    wind_speed: f64,

    /// Wind bearing in degrees (0=North, 90=East)
    #[arg(long, default_value_t = 90.0)]
    wind_bearing: f64,

    /// Precipitation type (rain, snow, sleet, none)
    #[arg(short, long, default_value = "none")]
    precipitation: String,

    /// Precipitation intensity in mm/h
    #[arg(short, long, default_value_t = 0.0)]
    intensity: f64,

    /// Local time as unix seconds
    #[arg(long, default_value_t = 1_624_276_800)]
    local_time: i64,

    /// Sunrise as unix seconds
    #[arg(long, default_value_t = 1_624_255_200)]
    sunrise: i64,

    /// Sunset as unix seconds
    #[arg(long, default_value_t = 1_624_308_000)]
    sunset: i64,

    /// Frame width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    /// Write the final frame as a PNG
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("=== Sky Simulation Demo ===\n");

    let precipitation_type = match args.precipitation.to_lowercase().as_str() {
        "rain" => PrecipitationKind::Rain,
        "snow" => PrecipitationKind::Snow,
        "sleet" => PrecipitationKind::Sleet,
        _ => PrecipitationKind::None,
    };

    let mut scene = SceneState::new();
    scene.set_position(GeoPosition {
        name: args.name.clone(),
        country: args.country.clone(),
        latitude: args.latitude,
        longitude: args.longitude,
    });
    scene.set_weather(WeatherSnapshot {
        temperature: args.temperature,
        humidity: args.humidity,
        cloud_cover_pct: args.clouds,
        ozone: args.ozone,
        uv_index: args.uv_index,
        wind_speed: args.wind_speed,
        wind_bearing: args.wind_bearing,
        precipitation_type,
        precipitation_intensity: args.intensity,
    });
    scene.set_time(TimeSnapshot {
        local_time: args.local_time,
        sunrise: args.sunrise,
        sunset: args.sunset,
    });

    println!(
        "Location: {}, {} ({:.2}, {:.2})",
        args.name, args.country, args.latitude, args.longitude
    );

    let mut renderer = Renderer::new(args.width, args.height);
    let start = std::time::Instant::now();
    for _ in 0..args.frames {
        renderer.render(&mut scene);
    }
    let elapsed = start.elapsed();

    if let Some(turbidity) = renderer.turbidity() {
        println!("Turbidity: {turbidity:.3}");
    }
    if let Some(sun) = renderer.sun_position() {
        println!(
            "Sun: zenith {:.1}°, azimuth {:.1}°",
            sun.zenith.to_degrees(),
            sun.azimuth.to_degrees()
        );
    }
    println!("Clouds: {}", renderer.cloud_count());
    println!("Precipitation particles: {}", renderer.droplet_count());
    println!(
        "Rendered {} frames at {}x{} in {:.2?} ({:.1} fps)",
        args.frames,
        args.width,
        args.height,
        elapsed,
        f64::from(args.frames) / elapsed.as_secs_f64().max(1e-9)
    );

    if let Some(path) = args.output {
        let frame = renderer.frame().to_vec();
        let png = image::RgbaImage::from_raw(args.width, args.height, frame)
            .ok_or("frame buffer does not match the requested dimensions")?;
        png.save(&path)?;
        println!("Final frame written to {}", path.display());
    }

    Ok(())
}
