//! Light transport and the parallel render loop.
//!
//! `ray_color` follows one path through the scene; `render` fans tiles out
//! to worker threads over a blocking queue and stitches the results into
//! an [`ImageBuffer`].

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
use crate::camera::Background;
use crate::error::{RenderError, RenderResult};
use crate::queue::WorkQueue;
use crate::{Camera, Color, HitRecord, Hittable, Ray};
use lux_math::Interval;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

/// Secondary rays start this far along to avoid re-hitting their origin.
const SHADOW_EPSILON: f32 = 0.001;

/// Radiance arriving along `ray`, following at most `depth` bounces.
///
/// A path that runs out of bounces contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(SHADOW_EPSILON, f32::INFINITY), &mut rec) {
        return background.color(ray);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a display-ready color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    let r = (255.999 * unit.clamp(color.x)) as u8;
    let g = (255.999 * unit.clamp(color.y)) as u8;
    let b = (255.999 * unit.clamp(color.z)) as u8;
    [r, g, b]
}

/// Linear average of the camera's sample count at pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = camera.sample_count().max(1);
    let background = camera.background();
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        // Jittered within the pixel footprint
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.render_depth(), &background, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Row-major image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a finished bucket into place at its recorded origin.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let Bucket { x, y, width, .. } = result.bucket;
        debug_assert_eq!(result.pixels.len(), result.bucket.pixel_count() as usize);

        for (row, line) in result.pixels.chunks(width.max(1) as usize).enumerate() {
            let start = ((y + row as u32) * self.width + x) as usize;
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }
}

/// Seed for one bucket, so a bucket renders identically whichever worker
/// picks it up.
fn bucket_seed(base_seed: u64, index: usize) -> u64 {
    base_seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Closes the result queue when the last worker exits, including by panic,
/// so the collector never waits on workers that are gone.
struct LastWorkerCloses<'a> {
    results: &'a WorkQueue<BucketResult>,
    live_workers: &'a AtomicUsize,
}

impl Drop for LastWorkerCloses<'_> {
    fn drop(&mut self) {
        if self.live_workers.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.results.close();
        }
    }
}

/// Render `world` through `camera`.
///
/// Buckets are queued up front; worker threads pull buckets until the
/// queue drains, and the calling thread assembles results as they arrive.
/// A worker panic or a missing bucket is reported as an error rather than
/// returning a partial image.
pub fn render(camera: &Camera, world: &dyn Hittable) -> RenderResult<ImageBuffer> {
    let start = Instant::now();
    let (width, height) = (camera.width(), camera.height());

    let buckets = generate_buckets(width, height, camera.chunk_dimension());
    let expected = buckets.len();
    let thread_count = camera.thread_count().max(1);
    let base_seed = camera.seed().unwrap_or_else(|| rand::thread_rng().gen());

    log::info!(
        "Rendering {}x{} at {} spp: {} buckets on {} threads",
        width,
        height,
        camera.sample_count(),
        expected,
        thread_count
    );

    let tasks: WorkQueue<Bucket> = buckets.into_iter().collect();
    tasks.close();
    let results: WorkQueue<BucketResult> = WorkQueue::new();
    let live_workers = AtomicUsize::new(thread_count);

    let mut image = ImageBuffer::new(width, height);
    let mut received = 0;

    let panicked = thread::scope(|s| {
        let handles: Vec<_> = (0..thread_count)
            .map(|worker_id| {
                let (tasks, results, live_workers) = (&tasks, &results, &live_workers);
                s.spawn(move || {
                    let _guard = LastWorkerCloses { results, live_workers };

                    while let Some(bucket) = tasks.pop() {
                        log::debug!("Worker {} rendering bucket {}", worker_id, bucket.index);
                        let mut rng = StdRng::seed_from_u64(bucket_seed(base_seed, bucket.index));
                        let result = render_bucket(&bucket, camera, world, &mut rng);
                        if results.push(result).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        while let Some(result) = results.pop() {
            image.write_bucket(&result);
            received += 1;
        }

        handles.into_iter().map(|h| h.join()).filter(Result::is_err).count()
    });

    if panicked > 0 {
        log::error!("{} render worker(s) panicked", panicked);
        return Err(RenderError::WorkerPanicked);
    }
    if received != expected {
        return Err(RenderError::IncompleteRender { expected, received });
    }

    log::info!("Render complete in {:.2?}", start.elapsed());
    Ok(image)
}

impl Camera {
    /// Render `world` through this camera.
    pub fn render(&self, world: &dyn Hittable) -> RenderResult<ImageBuffer> {
        render(self, world)
    }
}
