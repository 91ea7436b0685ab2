//! Rays carry the shutter time they were cast at, so moving geometry can be
//! placed where it was at that instant.

use crate::{Point3, Vec3};

/// The half-line `origin + t * direction`.
///
/// The direction is left unnormalized; instancing relies on `t` meaning the
/// same thing before and after a ray is mapped into object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// A ray cast when the shutter opens.
    #[inline]
    pub fn new_simple(origin: Point3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    /// The same ray leaving from `origin`, at the same instant.
    #[inline]
    pub fn with_origin(&self, origin: Point3) -> Self {
        Self { origin, ..*self }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_along_unnormalized_direction() {
        let ray = Ray::new(Point3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 2.0, 2.0), 0.25);

        assert_eq!(ray.at(0.0), ray.origin());
        assert_eq!(ray.at(0.5), Point3::new(1.0, 0.0, 1.0));
        assert_eq!(ray.at(-1.0), Point3::new(1.0, -3.0, -2.0));
    }

    #[test]
    fn test_with_origin_keeps_direction_and_time() {
        let ray = Ray::new(Point3::ZERO, Vec3::X, 0.75);
        let moved = ray.with_origin(Point3::splat(4.0));

        assert_eq!(moved.origin(), Point3::splat(4.0));
        assert_eq!(moved.direction(), Vec3::X);
        assert_eq!(moved.time(), 0.75);
        assert_eq!(Ray::new_simple(Point3::ZERO, Vec3::Y).time(), 0.0);
    }
}
