//! Axis-aligned box primitive.

use crate::hittable::{HitRecord, Hittable};
use crate::MaterialId;
use cubo_math::{Interval, Point3, Ray, Vec3};

/// An axis-aligned box between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaBox {
    min: Point3,
    max: Point3,
    material: MaterialId,
}

impl AaBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3, material: MaterialId) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    pub fn min(&self) -> Point3 {
        self.min
    }

    pub fn max(&self) -> Point3 {
        self.max
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Outward normal of the face closest to `p`.
    ///
    /// Picks the axis where `p` sits furthest out relative to the half
    /// extent; ties fall through to y, then z.
    fn face_normal(&self, p: Point3) -> Vec3 {
        let centered = p - (self.min + self.max) * 0.5;
        let half = (self.max - self.min) * 0.5;

        let rx = (centered.x / half.x).abs();
        let ry = (centered.y / half.y).abs();
        let rz = (centered.z / half.z).abs();

        if rx > ry && rx > rz {
            Vec3::new(sign(centered.x), 0.0, 0.0)
        } else if ry > rz {
            Vec3::new(0.0, sign(centered.y), 0.0)
        } else {
            Vec3::new(0.0, 0.0, sign(centered.z))
        }
    }
}

#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Slab test of a ray against `[min, max]`.
///
/// Returns the clipped entry parameter. Zero direction components divide to
/// infinity and flow through the comparisons unchanged.
pub(crate) fn slab_hit(
    min: Vec3,
    max: Vec3,
    origin: Point3,
    direction: Vec3,
    ray_t: Interval,
) -> Option<f64> {
    let mut t_min = ray_t.min;
    let mut t_max = ray_t.max;

    for axis in 0..3 {
        let inv_d = 1.0 / direction[axis];
        let mut t0 = (min[axis] - origin[axis]) * inv_d;
        let mut t1 = (max[axis] - origin[axis]) * inv_d;
        if inv_d < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_min {
            t_min = t0;
        }
        if t1 < t_max {
            t_max = t1;
        }

        if t_max <= t_min {
            return None;
        }
    }

    Some(t_min)
}

impl Hittable for AaBox {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let Some(t) = slab_hit(self.min, self.max, ray.origin(), ray.direction(), ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);
        let outward_normal = self.face_normal(rec.p);
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material;

        true
    }
}
