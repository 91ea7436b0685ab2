//! Lux math primitives.
//!
//! One canonical 3-component `f32` vector (re-exported from `glam`) plus the
//! scalar interval, bounding box and ray types every intersection query uses.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{euler_rotation_about, Mat4Ext};

/// RGB color, linear unless stated otherwise.
pub type Color = Vec3;

/// A position in world space.
pub type Point3 = Vec3;
