//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{Aabb, Interval, Point3, Vec3};
use std::f32::consts::PI;
use std::sync::Arc;

/// A sphere primitive, optionally moving linearly over the shutter interval.
#[derive(Clone)]
pub struct Sphere {
    /// Center at time 0
    center: Point3,
    /// Displacement from time 0 to time 1; zero for a static sphere
    motion: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new stationary sphere.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            motion: Vec3::ZERO,
            radius,
            material,
            bbox,
        }
    }

    /// Create a sphere that moves from `start` at time 0 to `end` at time 1.
    pub fn moving(start: Point3, end: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(start - rvec, start + rvec);
        let box1 = Aabb::from_points(end - rvec, end + rvec);

        Self {
            center: start,
            motion: end - start,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center position at the given ray time.
    pub fn center_at(&self, time: f32) -> Point3 {
        self.center + time * self.motion
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        let u = phi / (2.0 * PI);
        let v = theta / PI;
        (u, v)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // A degenerate sphere has no surface to shade
        if self.radius <= 0.0 {
            return false;
        }

        let center = self.center_at(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

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

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());

        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::new(0.001, f32::INFINITY);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, interval, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((rec.p - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let interval = Interval::new(0.001, f32::INFINITY);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, interval, &mut rec));
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal is flipped to face the ray
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_interval_excludes_near_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let mut rec = HitRecord::default();

        // Near root at t=4 is outside, far root at t=6 is taken
        assert!(sphere.hit(&ray, Interval::new(4.5, f32::INFINITY), &mut rec));
        assert!((rec.t - 6.0).abs() < 1e-5);
        assert!(!sphere.hit(&ray, Interval::new(0.001, 3.0), &mut rec));
    }

    #[test]
    fn test_zero_radius_sphere_never_hits() {
        let point = Sphere::new(Vec3::ZERO, 0.0, grey());
        let clamped = Sphere::new(Vec3::ZERO, -2.0, grey());
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let mut rec = HitRecord::default();
        rec.t = 7.0;

        assert!(!point.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!clamped.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert_eq!(rec.t, 7.0);
    }

    #[test]
    fn test_sphere_uv() {
        let (u, v) = Sphere::get_sphere_uv(Vec3::new(1.0, 0.0, 0.0));
        assert!((u - 0.5).abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);

        let (_, v) = Sphere::get_sphere_uv(Vec3::new(0.0, 1.0, 0.0));
        assert!((v - 1.0).abs() < 1e-5);

        let (u, _) = Sphere::get_sphere_uv(Vec3::new(0.0, 0.0, 1.0));
        assert!((u - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_moving_sphere() {
        let sphere = Sphere::moving(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), 0.5, grey());
        assert_eq!(sphere.center_at(0.5), Vec3::new(0.0, 1.0, 0.0));

        let bbox = sphere.bounding_box();
        assert!((bbox.y.min + 0.5).abs() < 1e-5);
        assert!((bbox.y.max - 2.5).abs() < 1e-5);

        // At time 1 the sphere has left the origin
        let ray_early = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0);
        let ray_late = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, 1.0);
        let mut rec = HitRecord::default();
        let interval = Interval::new(0.001, f32::INFINITY);
        assert!(sphere.hit(&ray_early, interval, &mut rec));
        assert!(!sphere.hit(&ray_late, interval, &mut rec));
    }
}
