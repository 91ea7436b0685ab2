//! Textures: spatially varying colors looked up at a hit point.

use crate::error::RenderResult;
use crate::perlin::Perlin;
use crate::raster::Image;
use lux_math::{Color, Interval, Point3};
use std::path::Path;
use std::sync::Arc;

/// A pure color lookup by surface UV and world position.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A single uniform color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.color
    }
}

/// Cells per unit of UV at scale 1.
const CHECKER_UV_DENSITY: f32 = 50.0;

/// Alternates two textures on a checkerboard laid out in UV space.
#[derive(Clone)]
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// Larger `scale` means larger cells.
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(scale, Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let u_cell = (u * CHECKER_UV_DENSITY * self.inv_scale).floor() as i64;
        let v_cell = (v * CHECKER_UV_DENSITY * self.inv_scale).floor() as i64;

        if (u_cell + v_cell).rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Nearest-pixel lookup into an image, UV clamped to `[0, 1]`.
#[derive(Clone)]
pub struct ImageTexture {
    image: Arc<Image>,
}

impl ImageTexture {
    pub fn new(image: Arc<Image>) -> Self {
        Self { image }
    }

    /// Load `name` from `base_dir` and wrap it.
    pub fn open(name: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> RenderResult<Self> {
        Ok(Self::new(Arc::new(Image::load(name, base_dir)?)))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        // Debug cyan for a missing image
        if self.image.is_empty() {
            return Color::new(0.0, 1.0, 1.0);
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        let v = 1.0 - unit.clamp(v); // image rows run top to bottom

        let i = (u * self.image.width() as f32) as i64;
        let j = (v * self.image.height() as f32) as i64;
        let [r, g, b] = self.image.pixel_data(i, j);

        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}

/// Grey marbling from fractal Perlin noise.
#[derive(Debug, Clone, Copy)]
pub struct NoiseTexture {
    noise: Perlin,
    frequency: f32,
    octave_count: u32,
    persistence: f32,
}

impl NoiseTexture {
    pub fn new(frequency: f32, octave_count: u32, persistence: f32) -> Self {
        Self {
            noise: Perlin::new(),
            frequency,
            octave_count,
            persistence,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        let n = self
            .noise
            .octave_noise(p, self.frequency, self.octave_count, self.persistence);
        Color::splat(0.5 * (1.0 + n))
    }
}

/// Height bands for [`TerrainTexture`], as (upper bound, color).
const TERRAIN_BANDS: [(f32, Color); 6] = [
    (0.35, Color::new(0.05, 0.15, 0.45)), // deep water
    (0.45, Color::new(0.15, 0.35, 0.65)), // shallow water
    (0.50, Color::new(0.85, 0.80, 0.55)), // sand
    (0.65, Color::new(0.25, 0.55, 0.20)), // grass
    (0.80, Color::new(0.45, 0.40, 0.35)), // rock
    (1.00, Color::new(0.95, 0.95, 0.97)), // snow
];

/// Color for a normalized terrain height. Heights outside every band are
/// logged and come back black.
fn terrain_color(height: f32) -> Color {
    if height >= 0.0 {
        if let Some((_, color)) = TERRAIN_BANDS.iter().find(|(upper, _)| height <= *upper) {
            return *color;
        }
    }
    log::warn!("terrain height {height} outside every color band");
    Color::ZERO
}

/// Noise interpreted as a height field and colored like a landscape.
#[derive(Debug, Clone, Copy)]
pub struct TerrainTexture {
    noise: Perlin,
    frequency: f32,
    octave_count: u32,
    persistence: f32,
}

impl TerrainTexture {
    pub fn new(frequency: f32, octave_count: u32, persistence: f32) -> Self {
        Self {
            noise: Perlin::new(),
            frequency,
            octave_count,
            persistence,
        }
    }
}

impl Texture for TerrainTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        let n = self
            .noise
            .octave_noise(p, self.frequency, self.octave_count, self.persistence);
        terrain_color(0.5 * (1.0 + n))
    }
}
