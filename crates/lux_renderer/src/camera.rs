//! Camera for ray generation.
//!
//! The camera keeps its configuration and the viewport vectors derived from
//! it side by side. Every setter that touches the geometry recomputes the
//! derived vectors before returning, so `get_ray` never sees stale state.

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::sampling::{gen_f32, random_in_unit_disk, sample_square};
use lux_math::{Color, Point3, Ray, Vec3};
use rand::RngCore;

/// Fallback worker count when the platform cannot report its parallelism.
pub const FALLBACK_THREAD_COUNT: usize = 12;

/// Samples per pixel unless configured otherwise.
pub const DEFAULT_SAMPLE_COUNT: u32 = 20;

/// Maximum bounces per path unless configured otherwise.
pub const DEFAULT_RENDER_DEPTH: u32 = 50;

/// World up direction used to orient the camera basis.
const VIEW_UP: Vec3 = Vec3::Y;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A constant color in every direction.
    Solid(Color),
    /// Blend from white at the horizon-down to light blue straight up.
    SkyGradient,
}

impl Background {
    /// Color seen along `ray` when it hits nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::SkyGradient => {
                let unit_direction = ray.direction().normalize_or_zero();
                let a = 0.5 * (unit_direction.y + 1.0);
                let white = Color::new(1.0, 1.0, 1.0);
                let blue = Color::new(0.5, 0.7, 1.0);
                white * (1.0 - a) + blue * a
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::SkyGradient
    }
}

/// Worker count used when none, or an unusable one, is configured.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_THREAD_COUNT)
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    width: u32,
    height: u32,
    aspect_ratio: f32,

    // Camera positioning
    position: Point3,
    target: Point3,

    // Lens settings
    fov: f32,                        // Vertical field of view in degrees
    dof_angle: f32,                  // Cone angle of rays through each pixel, degrees
    focal_len_override: Option<f32>, // Distance to the plane of perfect focus

    // Render settings
    sample_count: u32,
    render_depth: u32,
    thread_count: usize,
    chunk_dimension: u32,
    shutter_speed: f32,
    background: Background,
    seed: Option<u64>,

    // Cached derived values (set by update_vectors())
    focal_len: f32,
    viewport_width: f32,
    viewport_height: f32,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    hori_vec: Vec3,
    vert_vec: Vec3,
    pixel_delta_x: Vec3,
    pixel_delta_y: Vec3,
    viewport_upper_left: Point3,
    pixel00: Point3,
    dof_disk_h: Vec3,
    dof_disk_v: Vec3,
}

impl Camera {
    /// Create a camera `width` pixels wide looking from `position` at
    /// `target`. `fov` and `dof_angle` are in degrees.
    pub fn new(
        width: u32,
        aspect_ratio: f32,
        fov: f32,
        target: Point3,
        position: Point3,
        dof_angle: f32,
    ) -> Self {
        let thread_count = default_thread_count();

        let mut camera = Self {
            width: width.max(1),
            height: 1,
            aspect_ratio: sanitize_aspect(aspect_ratio),
            position,
            target,
            fov,
            dof_angle,
            focal_len_override: None,
            sample_count: DEFAULT_SAMPLE_COUNT,
            render_depth: DEFAULT_RENDER_DEPTH,
            thread_count,
            chunk_dimension: DEFAULT_BUCKET_SIZE,
            shutter_speed: 1.0,
            background: Background::default(),
            seed: None,
            focal_len: 1.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            hori_vec: Vec3::ZERO,
            vert_vec: Vec3::ZERO,
            pixel_delta_x: Vec3::ZERO,
            pixel_delta_y: Vec3::ZERO,
            viewport_upper_left: Vec3::ZERO,
            pixel00: Vec3::ZERO,
            dof_disk_h: Vec3::ZERO,
            dof_disk_v: Vec3::ZERO,
        };
        camera.height = camera.compute_height();
        camera.validate_thread_count();
        camera.validate_chunk_dimension();
        camera.update_vectors();
        camera
    }

    fn compute_height(&self) -> u32 {
        ((self.width as f32 / self.aspect_ratio) as u32).max(1)
    }

    /// Recompute the basis, viewport and defocus vectors from the
    /// configuration.
    fn update_vectors(&mut self) {
        let offset = self.position - self.target;

        self.focal_len = match self.focal_len_override {
            Some(len) => len,
            None if offset.length() > 0.0 => offset.length(),
            None => 1.0,
        };

        let theta = self.fov.to_radians();
        let h = (theta / 2.0).tan();
        self.viewport_height = 2.0 * h * self.focal_len;
        self.viewport_width = self.viewport_height * (self.width as f32 / self.height as f32);

        // Calculate camera basis vectors
        self.w = offset.normalize_or_zero();
        if self.w == Vec3::ZERO {
            log::warn!("Camera position and target coincide; looking down -Z");
            self.w = Vec3::Z;
        }
        self.u = VIEW_UP.cross(self.w).normalize_or_zero();
        if self.u == Vec3::ZERO {
            log::warn!("Camera view direction is parallel to up; picking an arbitrary roll");
            self.u = self.w.any_orthonormal_vector();
        }
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        self.hori_vec = self.viewport_width * self.u;
        self.vert_vec = self.viewport_height * -self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_x = self.hori_vec / self.width as f32;
        self.pixel_delta_y = self.vert_vec / self.height as f32;

        // Calculate upper left pixel location
        self.viewport_upper_left =
            self.position - self.focal_len * self.w - self.hori_vec / 2.0 - self.vert_vec / 2.0;
        self.pixel00 = self.viewport_upper_left + 0.5 * (self.pixel_delta_x + self.pixel_delta_y);

        // Calculate defocus disk basis vectors
        let dof_radius = self.focal_len * (self.dof_angle / 2.0).to_radians().tan();
        self.dof_disk_h = self.u * dof_radius;
        self.dof_disk_v = self.v * dof_radius;
    }

    fn validate_thread_count(&mut self) {
        let count = self.thread_count;
        if count == 0 || count > self.width as usize || count > self.height as usize {
            self.thread_count = default_thread_count();
        }
    }

    fn validate_chunk_dimension(&mut self) {
        let dim = self.chunk_dimension;
        if dim == 0 || dim > self.width || dim > self.height {
            let per_thread = self.width as usize / self.thread_count.max(1);
            self.chunk_dimension = (per_thread as u32).max(1);
        }
    }

    /// Generate a ray through pixel (x, y) with random sampling.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00
            + ((x as f32) + offset.x) * self.pixel_delta_x
            + ((y as f32) + offset.y) * self.pixel_delta_y;

        let ray_origin = if self.dof_angle <= 0.0 {
            self.position
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng) * self.shutter_speed;

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.position + p.x * self.dof_disk_h + p.y * self.dof_disk_v
    }

    // Geometry setters

    /// Set the image width; the height follows from the aspect ratio.
    pub fn set_width(&mut self, width: u32) {
        self.width = width.max(1);
        self.height = self.compute_height();
        self.validate_thread_count();
        self.validate_chunk_dimension();
        self.update_vectors();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = sanitize_aspect(aspect_ratio);
        self.height = self.compute_height();
        self.validate_chunk_dimension();
        self.update_vectors();
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
        self.update_vectors();
    }

    pub fn set_target(&mut self, target: Point3) {
        self.target = target;
        self.update_vectors();
    }

    /// Vertical field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.update_vectors();
    }

    /// Defocus cone angle in degrees; 0 disables depth of field.
    pub fn set_dof_angle(&mut self, dof_angle: f32) {
        self.dof_angle = dof_angle;
        self.update_vectors();
    }

    /// Pin the focus distance. Non-positive values go back to focusing on
    /// the target.
    pub fn set_focal_len(&mut self, focal_len: f32) {
        self.focal_len_override = (focal_len > 0.0).then_some(focal_len);
        self.update_vectors();
    }

    // Render setters

    pub fn set_sample_count(&mut self, sample_count: u32) {
        self.sample_count = sample_count.max(1);
    }

    pub fn set_render_depth(&mut self, render_depth: u32) {
        self.render_depth = render_depth;
    }

    /// Set the worker count. Zero, or more workers than pixel rows or
    /// columns, selects the default.
    pub fn set_render_thread_count(&mut self, thread_count: usize) {
        self.thread_count = thread_count;
        self.validate_thread_count();
    }

    /// Set the tile edge length. Zero, or a tile larger than the image,
    /// selects `width / thread_count`.
    pub fn set_chunk_dimension(&mut self, chunk_dimension: u32) {
        self.chunk_dimension = chunk_dimension;
        self.validate_chunk_dimension();
    }

    /// Ray times are drawn from `[0, shutter_speed)`.
    pub fn set_shutter_speed(&mut self, shutter_speed: f32) {
        self.shutter_speed = shutter_speed.max(0.0);
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Fix the base seed for reproducible renders; `None` draws a fresh one
    /// per render.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    // Getters

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn dof_angle(&self) -> f32 {
        self.dof_angle
    }

    /// Effective focus distance.
    pub fn focal_len(&self) -> f32 {
        self.focal_len
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn render_depth(&self) -> u32 {
        self.render_depth
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    pub fn chunk_dimension(&self) -> u32 {
        self.chunk_dimension
    }

    pub fn shutter_speed(&self) -> f32 {
        self.shutter_speed
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Camera basis as (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn viewport_upper_left(&self) -> Point3 {
        self.viewport_upper_left
    }

    /// Center of the top-left pixel.
    pub fn pixel00(&self) -> Point3 {
        self.pixel00
    }

    pub fn pixel_delta_x(&self) -> Vec3 {
        self.pixel_delta_x
    }

    pub fn pixel_delta_y(&self) -> Vec3 {
        self.pixel_delta_y
    }
}

fn sanitize_aspect(aspect_ratio: f32) -> f32 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        log::warn!("Invalid aspect ratio {aspect_ratio}; using 1.0");
        1.0
    }
}
