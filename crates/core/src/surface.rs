//! Software RGBA surface the scene is composed onto.
//!
//! Stands in for the original canvas: center-origin world coordinates, a
//! fixed-FOV perspective projection for the particle layers, and source-over
//! alpha blending for every fill. The host collaborator reads the finished
//! frame out of [`PixelSurface::frame`].

use crate::particles::Vec3;
use std::f32::consts::FRAC_PI_3;

/// Vertical field of view of the implied camera.
const FOV_Y: f32 = FRAC_PI_3;

/// Viewport dimensions in world units (1 unit = 1 pixel at depth 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// An owned RGBA8 framebuffer.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = PixelSurface {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        };
        surface.clear();
        surface
    }

    /// Reset every pixel to opaque black.
    pub fn clear(&mut self) {
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    /// Reallocate for a new viewport size; contents reset to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0; (width * height * 4) as usize];
        self.clear();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width as f32,
            height: self.height as f32,
        }
    }

    /// The finished frame as tightly packed RGBA bytes, row-major.
    pub fn frame(&self) -> &[u8] {
        &self.data
    }

    /// One pixel as (r, g, b, a).
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let i = ((y * self.width + x) * 4) as usize;
        (
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    /// Project a world-space point to (screen x, screen y, perspective
    /// scale). Returns `None` for points at or behind the camera.
    ///
    /// The camera sits on the +z axis at the distance where one world unit
    /// spans one pixel at depth 0, looking at the origin with a π/3 vertical
    /// field of view.
    pub fn project(&self, point: Vec3) -> Option<(f32, f32, f32)> {
        let camera = self.height as f32 / 2.0 / (FOV_Y / 2.0).tan();
        if point.z >= camera {
            return None;
        }
        let scale = camera / (camera - point.z);
        Some((
            self.width as f32 / 2.0 + point.x * scale,
            self.height as f32 / 2.0 + point.y * scale,
            scale,
        ))
    }

    /// Fill an axis-aligned rectangle, blending `color` over the existing
    /// pixels with `alpha` out of 255. Coordinates are top-left screen
    /// space; the rectangle is clipped to the surface.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 3], alpha: u8) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            clip_span(x, w, self.width),
            clip_span(y, h, self.height),
        ) else {
            return;
        };
        let opacity = f32::from(alpha) / 255.0;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color, opacity);
            }
        }
    }

    /// Fill an axis-aligned ellipse centered on (cx, cy), blended like
    /// [`PixelSurface::fill_rect`].
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: [u8; 3], alpha: u8) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) = (
            clip_span(cx - rx, rx * 2.0, self.width),
            clip_span(cy - ry, ry * 2.0, self.height),
        ) else {
            return;
        };
        let opacity = f32::from(alpha) / 255.0;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend_pixel(px, py, color, opacity);
                }
            }
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 3], opacity: f32) {
        let i = ((y * self.width + x) * 4) as usize;
        for channel in 0..3 {
            let dst = f32::from(self.data[i + channel]);
            self.data[i + channel] = (dst + (f32::from(color[channel]) - dst) * opacity) as u8;
        }
        self.data[i + 3] = 255;
    }
}

/// Clip a float span to `[0, limit)` pixel indices; `None` when fully
/// outside.
fn clip_span(start: f32, extent: f32, limit: u32) -> Option<(u32, u32)> {
    if extent <= 0.0 {
        return None;
    }
    let lo = start.floor().max(0.0) as u32;
    let hi = (start + extent).ceil().clamp(0.0, limit as f32) as u32;
    (lo < hi).then_some((lo, hi))
}
