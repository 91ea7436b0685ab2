//! Image tiling.
//!
//! The image is cut into square tiles that render independently. A tile
//! records its origin so its pixels can be written back whatever order the
//! workers finish in.

use crate::renderer::{linear_to_gamma, render_pixel};
use crate::{Camera, Color, Hittable};
use rand::RngCore;

/// Tile edge length when none is configured.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// One tile: a pixel rectangle plus its position in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Raster-order position, also used to seed the tile's sampler
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Cut a `width` x `height` image into tiles of edge `bucket_size`, row by
/// row. Tiles on the right and bottom edges are clipped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let columns = (0..width).step_by(size as usize);

    (0..height)
        .step_by(size as usize)
        .flat_map(|y| columns.clone().map(move |x| (x, y)))
        .enumerate()
        .map(|(index, (x, y))| {
            Bucket::new(x, y, size.min(width - x), size.min(height - y), index)
        })
        .collect()
}

/// Render a single bucket.
///
/// Returns gamma-corrected pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for y in bucket.y..bucket.y + bucket.height {
        for x in bucket.x..bucket.x + bucket.width {
            let color = render_pixel(camera, world, x, y, rng);
            pixels.push(Color::new(
                linear_to_gamma(color.x),
                linear_to_gamma(color.y),
                linear_to_gamma(color.z),
            ));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// A finished tile on its way back to the image.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Display-ready colors, row-major within the tile
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
