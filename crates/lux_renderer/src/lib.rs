//! Lux renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for offline rendering: hittable geometry
//! behind a BVH, textured materials, a depth-of-field and motion-blur
//! camera, and a tile-parallel render loop feeding PPM or ASCII output.

mod bucket;
mod bvh;
mod camera;
mod error;
mod hittable;
mod instance;
mod material;
mod output;
mod perlin;
mod quad;
mod queue;
mod raster;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::{default_thread_count, Background, Camera};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{Rotation, Translate};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use output::{write_ascii, write_image, write_ppm, OutputFormat};
pub use perlin::Perlin;
pub use quad::{make_box, Quad};
pub use queue::WorkQueue;
pub use raster::Image;
pub use renderer::{color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer};
pub use sampling::{gen_f32, gen_range_f32, random_in_unit_disk, random_unit_vector};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, TerrainTexture, Texture};
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
