//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane, then accepts the hit when it lies on
//! the inner side of all three edges.

use crate::{
    hittable::{HitRecord, Hittable},
    quad::PlaneFrame,
    Material, Ray,
};
use lux_math::{Aabb, Interval, Point3, Vec3};
use std::sync::Arc;

/// A triangle with vertices `q`, `q + u` and `q + v`.
#[derive(Clone)]
pub struct Triangle {
    plane: PlaneFrame,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a triangle from a corner and two edge vectors.
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let (a, b, c) = (q, q + u, q + v);
        let bbox = Aabb::from_points(a.min(b).min(c), a.max(b).max(c));

        Self {
            plane: PlaneFrame::new(q, u, v),
            material,
            bbox,
        }
    }

    /// Create a triangle from three vertices, wound counter-clockwise
    /// around the front face.
    pub fn from_vertices(a: Point3, b: Point3, c: Point3, material: Arc<dyn Material>) -> Self {
        Self::new(a, b - a, c - a, material)
    }

    pub fn vertices(&self) -> [Point3; 3] {
        let q = self.plane.q;
        [q, q + self.plane.u, q + self.plane.v]
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    /// True when `p` (on the plane) is strictly on the inner side of every
    /// edge. Points on an edge miss.
    fn contains(&self, p: Point3) -> bool {
        let [a, b, c] = self.vertices();
        let n = self.plane.normal;

        let e0 = n.dot((b - a).cross(p - a));
        let e1 = n.dot((c - b).cross(p - b));
        let e2 = n.dot((a - c).cross(p - c));

        e0 > 0.0 && e1 > 0.0 && e2 > 0.0
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let Some((t, p, alpha, beta)) = self.plane.intersect(ray, ray_t) else {
            return false;
        };

        if !self.contains(p) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::from_vertices(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5))),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();
        // Inside the bounding square but outside the slanted edge
        let ray = Ray::new_simple(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_triangle_back_face() {
        let tri = xy_triangle();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_uv_is_planar() {
        let tri = Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        let ray = Ray::new_simple(Vec3::new(0.2, 0.3, 1.0), -Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.u - 0.2).abs() < 1e-5);
        assert!((rec.v - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_edge_and_window_end_miss() {
        let tri = Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        let mut rec = HitRecord::default();

        // Lands exactly on the edge along X
        let on_edge = Ray::new_simple(Vec3::new(0.5, 0.0, 1.0), -Vec3::Z);
        assert!(!tri.hit(&on_edge, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Interior point, but the plane sits at t = 1 = the window's end
        let inside = Ray::new_simple(Vec3::new(0.25, 0.25, 1.0), -Vec3::Z);
        assert!(!tri.hit(&inside, Interval::new(0.001, 1.0), &mut rec));
        assert!(tri.hit(&inside, Interval::new(0.001, 2.0), &mut rec));
    }

    #[test]
    fn test_triangle_bbox_covers_all_vertices() {
        let bbox = xy_triangle().bounding_box();
        assert!((bbox.x.min + 1.0).abs() < 1e-5);
        assert!((bbox.x.max - 1.0).abs() < 1e-5);
        assert!((bbox.y.max - 1.0).abs() < 1e-5);
        assert!(bbox.z.size() > 0.0);
    }
}
