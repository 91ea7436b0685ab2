//! Planar primitives: the parallelogram quad and the six-sided box builder.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material, Ray,
};
use lux_math::{Aabb, Interval, Point3, Vec3};
use std::sync::Arc;

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Plane spanned by an origin `q` and edge vectors `u`, `v`.
///
/// Shared by [`Quad`] and [`crate::Triangle`]: both intersect the plane first
/// and then test the planar coordinates of the hit point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlaneFrame {
    pub q: Point3,
    pub u: Vec3,
    pub v: Vec3,
    /// Unit normal, `u x v` normalized
    pub normal: Vec3,
    /// Plane constant: `normal . x = d` for points on the plane
    d: f32,
    /// `n / (n . n)` with `n = u x v`; projects onto (alpha, beta)
    w: Vec3,
}

impl PlaneFrame {
    pub fn new(q: Point3, u: Vec3, v: Vec3) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();
        let nn = n.dot(n);
        let w = if nn > 0.0 { n / nn } else { Vec3::ZERO };

        Self {
            q,
            u,
            v,
            normal,
            d: normal.dot(q),
            w,
        }
    }

    /// Ray parameter and planar `(alpha, beta)` coordinates of the plane
    /// hit, or `None` when the ray is parallel or `t` is not strictly
    /// inside `ray_t`.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Point3, f32, f32)> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        let planar = p - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        Some((t, p, alpha, beta))
    }
}

/// A parallelogram with corner `q` and edges `u` and `v`.
#[derive(Clone)]
pub struct Quad {
    plane: PlaneFrame,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let diagonal_1 = Aabb::from_points(q, q + u + v);
        let diagonal_2 = Aabb::from_points(q + u, q + v);

        Self {
            plane: PlaneFrame::new(q, u, v),
            material,
            bbox: Aabb::surrounding(&diagonal_1, &diagonal_2),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let Some((t, p, alpha, beta)) = self.plane.intersect(ray, ray_t) else {
            return false;
        };

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return false;
        }

        rec.t = t;
        rec.p = p;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.plane.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The closed box with opposite corners `a` and `b`, as six outward-facing
/// quads sharing one material.
pub fn make_box(a: Point3, b: Point3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Point3::new(min.x, min.y, max.z), dx, dy),  // front
        (Point3::new(max.x, min.y, max.z), -dz, dy), // right
        (Point3::new(max.x, min.y, min.z), -dx, dy), // back
        (Point3::new(min.x, min.y, min.z), dz, dy),  // left
        (Point3::new(min.x, max.y, max.z), dx, -dz), // top
        (Point3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];
    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}
