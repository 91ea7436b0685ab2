//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built by recursive median split along a randomly chosen
//! axis. Built once before rendering and shared read-only between workers.

use crate::{HitRecord, Hittable, HittableList, Ray};
use lux_math::{Aabb, Interval};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;

/// BVH node: a branch over two children, or nothing at all.
///
/// Leaves are the primitives themselves. A single primitive becomes a
/// branch whose children both point at it.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Arc<dyn Hittable>,
        right: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    ///
    /// `rng` picks the split axis at every level.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let count = objects.len();
        let node = Self::build(&mut objects, rng);
        log::debug!("Built BVH over {} objects", count);
        node
    }

    /// Create a BVH over the objects of a list. The list is left intact.
    pub fn from_list(list: &HittableList, rng: &mut dyn RngCore) -> Self {
        Self::new(list.objects().to_vec(), rng)
    }

    /// Recursive BVH construction over a non-empty slice.
    fn build(objects: &mut [Arc<dyn Hittable>], rng: &mut dyn RngCore) -> Self {
        let axis = rng.gen_range(0..3usize);
        let comparator = |a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>| box_compare(a, b, axis);

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects.len() {
            1 => (objects[0].clone(), objects[0].clone()),
            2 => {
                if comparator(&objects[0], &objects[1]) == Ordering::Greater {
                    (objects[1].clone(), objects[0].clone())
                } else {
                    (objects[0].clone(), objects[1].clone())
                }
            }
            _ => {
                objects.sort_unstable_by(comparator);

                // Split at midpoint
                let mid = objects.len() / 2;
                let (lower, upper) = objects.split_at_mut(mid);
                (Arc::new(Self::build(lower, rng)), Arc::new(Self::build(upper, rng)))
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch { left, right, bbox }
    }
}

/// Orders two hittables by the minimum of their boxes along `axis`.
fn box_compare(a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
