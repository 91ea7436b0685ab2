//! Transform decorators that place an existing hittable in the world.
//!
//! Neither decorator copies geometry: the ray is moved into the child's
//! local space, the child answers the query, and the hit is moved back.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use lux_math::{euler_rotation_about, Aabb, Interval, Mat4, Mat4Ext, Point3, Vec3};
use std::sync::Arc;

/// Offsets a child hittable by a fixed vector.
#[derive(Clone)]
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let local_ray = ray.with_origin(ray.origin() - self.offset);

        if !self.object.hit(&local_ray, ray_t, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates a child hittable about a pivot point.
#[derive(Clone)]
pub struct Rotation {
    object: Arc<dyn Hittable>,
    /// Local-to-world
    transform: Mat4,
    /// World-to-local, for ray transformation
    inv_transform: Mat4,
    /// Inverse transpose, for normals
    normal_matrix: Mat4,
    bbox: Aabb,
}

impl Rotation {
    /// Rotate by yaw (about Z), pitch (about Y) and roll (about X), in
    /// degrees, around `pivot`.
    pub fn new(object: Arc<dyn Hittable>, yaw: f32, pitch: f32, roll: f32, pivot: Point3) -> Self {
        let transform = euler_rotation_about(
            pivot,
            yaw.to_radians(),
            pitch.to_radians(),
            roll.to_radians(),
        );
        Self::from_matrix(object, transform)
    }

    /// Wrap `object` with any invertible affine transform.
    ///
    /// Non-uniform scale is fine: normals go through the inverse transpose.
    pub fn from_matrix(object: Arc<dyn Hittable>, transform: Mat4) -> Self {
        let inv_transform = transform.inverse();
        let normal_matrix = inv_transform.transpose();
        let bbox = transform.transform_aabb(&object.bounding_box());

        Self {
            object,
            transform,
            inv_transform,
            normal_matrix,
            bbox,
        }
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }
}

impl Hittable for Rotation {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Direction stays unnormalized so t means the same in both spaces
        let local_ray = Ray::new(
            self.inv_transform.transform_point3(ray.origin()),
            self.inv_transform.transform_vector3(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&local_ray, ray_t, rec) {
            return false;
        }

        rec.p = self.transform.transform_point3(rec.p);
        rec.normal = self.normal_matrix.transform_vector3(rec.normal).normalize();
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_box, Lambertian, Material, Quad, Sphere};

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    #[test]
    fn test_translate_moves_hit_and_bbox() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let moved = Translate::new(sphere, Vec3::new(10.0, 0.0, 0.0));

        let bbox = moved.bounding_box();
        assert!((bbox.x.min - 9.0).abs() < 1e-5);
        assert!((bbox.x.max - 11.0).abs() < 1e-5);

        let ray = Ray::new_simple(Vec3::new(10.0, 0.0, 5.0), -Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(moved.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(10.0, 0.0, 1.0)).length() < 1e-5);

        // The untranslated position is empty now
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        assert!(!moved.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_rotation_turns_quad() {
        // Unit quad in the XY plane facing +Z; pitched 90 degrees it faces +X
        let quad: Arc<dyn Hittable> =
            Arc::new(Quad::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::X, Vec3::Y, grey()));
        let rotated = Rotation::new(quad, 0.0, 90.0, 0.0, Vec3::ZERO);

        let ray = Ray::new_simple(Vec3::new(5.0, 0.0, 0.0), -Vec3::X);
        let mut rec = HitRecord::default();
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-4);
        assert!(rec.p.length() < 1e-4);
        // Normal faces the incoming ray
        assert!((rec.normal - Vec3::X).length() < 1e-4);

        // Seen edge-on from +Z
        let ray = Ray::new_simple(Vec3::new(0.3, 0.3, 5.0), -Vec3::Z);
        assert!(!rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_rotation_about_pivot() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.5, grey()));
        // Half turn about Z around the origin puts the sphere at (-2, 0, 0)
        let rotated = Rotation::new(sphere, 180.0, 0.0, 0.0, Vec3::ZERO);

        let ray = Ray::new_simple(Vec3::new(-2.0, 0.0, 5.0), -Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 4.5).abs() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
        assert!(rec.front_face);

        // Rotating about the sphere's own center leaves it in place
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.5, grey()));
        let spun = Rotation::new(sphere, 180.0, 0.0, 0.0, Vec3::new(2.0, 0.0, 0.0));
        let ray = Ray::new_simple(Vec3::new(2.0, 0.0, 5.0), -Vec3::Z);
        assert!(spun.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_rotation_bbox_contains_rotated_box() {
        let cube: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::ONE, grey()));
        let rotated = Rotation::new(cube, 45.0, 0.0, 0.0, Vec3::ZERO);
        let bbox = rotated.bounding_box();

        // The far corner (1, 1) swings onto the Y axis at sqrt(2)
        let diag = 2.0_f32.sqrt();
        assert!(bbox.y.max >= diag - 1e-3);
        assert!(bbox.x.min <= -diag / 2.0 + 1e-3);
        assert!(bbox.z.contains(0.5));
    }

    #[test]
    fn test_scaled_sphere_normal_is_perpendicular_to_surface() {
        // Stretched to x^2/4 + y^2 + z^2 = 1
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let stretched = Rotation::from_matrix(sphere, Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));

        let x = 2.0_f32.sqrt();
        let ray = Ray::new_simple(Vec3::new(x, 5.0, 0.0), -Vec3::Y);
        let mut rec = HitRecord::default();
        assert!(stretched.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        let y = 0.5_f32.sqrt();
        assert!((rec.t - (5.0 - y)).abs() < 1e-3);
        assert!((rec.p - Vec3::new(x, y, 0.0)).length() < 1e-3);
        // Surface gradient (x / 2, 2y, 0) points along (1, 2, 0)
        assert!((rec.normal - Vec3::new(1.0, 2.0, 0.0).normalize()).length() < 1e-3);
        assert!(rec.front_face);
    }

    #[test]
    fn test_miss_leaves_record_untouched() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let rotated = Rotation::new(sphere, 30.0, 10.0, 5.0, Vec3::ONE);
        let mut rec = HitRecord::default();
        rec.t = 7.0;

        let ray = Ray::new_simple(Vec3::new(0.0, 10.0, 5.0), -Vec3::Z);
        assert!(!rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert_eq!(rec.t, 7.0);
    }
}
