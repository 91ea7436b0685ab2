/// A closed range `[min, max]` on the real line.
///
/// Bounds the `t` values a ray query accepts, and forms one slab of an
/// [`Aabb`](crate::Aabb). An interval with `min > max` is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Contains nothing; the identity for [`Interval::surrounding`].
    pub const EMPTY: Interval = Interval::new(f32::INFINITY, f32::NEG_INFINITY);

    /// Contains every value.
    pub const UNIVERSE: Interval = Interval::new(f32::NEG_INFINITY, f32::INFINITY);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Smallest interval holding both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// `x` lies in the interval, endpoints included.
    pub fn contains(&self, x: f32) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// `x` lies strictly inside, so a hit exactly at `t_min` is rejected.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Nearest value to `x` inside the interval.
    pub fn clamp(&self, x: f32) -> f32 {
        x.max(self.min).min(self.max)
    }

    /// Grow by `delta` in total, half on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let half = 0.5 * delta;
        Interval::new(self.min - half, self.max + half)
    }

    /// Shift both ends by `displacement`.
    pub fn add_scalar(&self, displacement: f32) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_at_endpoints() {
        let unit = Interval::new(0.0, 1.0);
        for (x, inside, strictly) in [
            (-0.5, false, false),
            (0.0, true, false),
            (0.5, true, true),
            (1.0, true, false),
            (1.5, false, false),
        ] {
            assert_eq!(unit.contains(x), inside, "contains({x})");
            assert_eq!(unit.surrounds(x), strictly, "surrounds({x})");
        }
    }

    #[test]
    fn test_clamp_and_size() {
        let range = Interval::new(-2.0, 6.0);
        assert_eq!(range.size(), 8.0);
        assert_eq!(range.clamp(-9.0), -2.0);
        assert_eq!(range.clamp(3.0), 3.0);
        assert_eq!(range.clamp(9.0), 6.0);
    }

    #[test]
    fn test_expand_and_shift() {
        let padded = Interval::new(1.0, 2.0).expand(0.5);
        assert_eq!(padded, Interval::new(0.75, 2.25));
        assert_eq!(padded.add_scalar(-1.0), Interval::new(-0.25, 1.25));
    }

    #[test]
    fn test_surrounding_with_empty_is_identity() {
        let span = Interval::new(3.0, 4.0);
        assert_eq!(Interval::surrounding(&Interval::EMPTY, &span), span);
        assert_eq!(
            Interval::surrounding(&Interval::new(-1.0, 0.0), &span),
            Interval::new(-1.0, 4.0)
        );
    }

    #[test]
    fn test_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::default().is_empty());

        assert!(!Interval::UNIVERSE.is_empty());
        assert!(Interval::UNIVERSE.contains(-1e30));
        assert_eq!(Interval::UNIVERSE.size(), f32::INFINITY);
    }
}
