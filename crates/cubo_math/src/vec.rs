use crate::Vec3;

/// A location in space. Same representation as a direction.
pub type Point3 = Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO: f64 = 1e-8;

/// Extension trait for `Vec3` with the helpers glam doesn't provide.
pub trait Vec3Ext {
    /// True if every component magnitude is below `1e-8`.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }
}
