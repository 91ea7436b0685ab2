//! Ray queries against scene geometry.
//!
//! Every primitive, aggregate and instance answers the same two questions:
//! where does a ray first meet it inside an interval, and what box bounds it.

use crate::material::{Material, ScatterResult};
use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Stand-in surface for a record nothing has written yet. Absorbs everything.
struct Unlit;

impl Material for Unlit {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

static UNLIT: Unlit = Unlit;

/// Where and how a ray met a surface.
///
/// The material is borrowed from the primitive that was hit, so a record
/// cannot outlive the scene it came from.
#[derive(Clone)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal, facing against the incoming ray
    pub normal: Vec3,
    pub material: &'a dyn Material,
    pub u: f32,
    pub v: f32,
    pub t: f32,
    /// The ray arrived from the side the outward normal points to
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &UNLIT,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Orient `outward_normal` against `ray` and note which face was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementations are immutable once built and shared read-only across
/// render workers.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true on a hit and fills in the record; on a miss the record
    /// is left untouched.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A flat list of hittable objects, scanned linearly for the closest hit.
#[derive(Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Create a list holding a single object.
    pub fn from_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Each hit shrinks the window, so later objects only win if nearer
        let mut window = ray_t;
        let mut found = false;
        for object in &self.objects {
            if object.hit(ray, window, rec) {
                found = true;
                window.max = rec.t;
            }
        }
        found
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
