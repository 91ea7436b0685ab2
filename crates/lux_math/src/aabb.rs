use crate::{Interval, Ray, Vec3};

/// Thinnest extent a padded box may have along any axis.
const MIN_THICKNESS: f32 = 0.0001;

/// Axis-aligned box, one [`Interval`] slab per axis.
///
/// Boxes built from points or intervals are padded so flat geometry still
/// has volume for the slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Bounds nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }.pad()
    }

    /// Box spanned by two opposite corners given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let (lo, hi) = (a.min(b), a.max(b));
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// Smallest box enclosing both.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Slab along axis `n` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    ///
    /// If `n > 2`.
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("AABB axis index out of range: {n}"),
        }
    }

    /// Whether `ray` passes through the box for some `t` in `ray_t`.
    ///
    /// Each slab clips the parametric window to where the ray lies between
    /// its two planes; an empty window means a miss.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut window = ray_t;
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let inv_dir = 1.0 / ray.direction[axis];
            let origin = ray.origin[axis];

            let near = (slab.min - origin) * inv_dir;
            let far = (slab.max - origin) * inv_dir;
            let (enter, exit) = if inv_dir < 0.0 { (far, near) } else { (near, far) };

            window.min = window.min.max(enter);
            window.max = window.max.min(exit);
            if window.is_empty() {
                return false;
            }
        }
        true
    }

    /// Copy with every axis widened to at least the minimum thickness.
    pub fn pad(&self) -> Aabb {
        let widen = |slab: Interval| {
            if slab.size().abs() < MIN_THICKNESS {
                slab.expand(MIN_THICKNESS)
            } else {
                slab
            }
        };
        Aabb {
            x: widen(self.x),
            y: widen(self.y),
            z: widen(self.z),
        }
    }

    /// Same box moved by `offset`.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.add_scalar(offset.x),
            self.y.add_scalar(offset.y),
            self.z.add_scalar(offset.z),
        )
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
