// Transform utilities for Mat4
//
// Extends glam::Mat4 with the helpers the rotation decorator needs.
// glam::Mat4 already provides transform_point3() and inverse().

use crate::Aabb;
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a direction (implicit w=0, translation ignored).
    fn transform_vector3(&self, vector: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        let transformed = *self * Vec4::new(vector.x, vector.y, vector.z, 0.0);
        transformed.truncate()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let lo = aabb.min();
        let hi = aabb.max();

        let mut result_min = Vec3::splat(f32::INFINITY);
        let mut result_max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            let p = self.transform_point3(corner);
            result_min = result_min.min(p);
            result_max = result_max.max(p);
        }

        Aabb::from_points(result_min, result_max)
    }
}

/// Rotation about `pivot` built from yaw (about Z), pitch (about Y) and
/// roll (about X), in radians, applied as `Rz * Ry * Rx`.
pub fn euler_rotation_about(pivot: Vec3, yaw: f32, pitch: f32, roll: f32) -> Mat4 {
    let q = Quat::from_euler(EulerRot::ZYX, yaw, pitch, roll);
    Mat4::from_translation(pivot) * Mat4::from_quat(q) * Mat4::from_translation(-pivot)
}
