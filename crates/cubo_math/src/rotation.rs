//! Rotation used by rotated primitives.
//!
//! Wraps a glam DMat3 built from Euler angles. The matrix is orthonormal, so
//! the inverse rotation is the transpose.

use crate::{Mat3, Vec3};

/// A fixed 3x3 rotation composed from Euler angles.
///
/// The composite is `Rz * Ry * Rx`: a vector is rotated about X first,
/// then Y, then Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Mat3,
    inverse: Mat3,
}

impl Rotation {
    /// No rotation at all.
    pub const IDENTITY: Rotation = Rotation {
        matrix: Mat3::IDENTITY,
        inverse: Mat3::IDENTITY,
    };

    /// Build a rotation from Euler angles in radians.
    pub fn new(angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        let matrix = Mat3::from_rotation_z(angle_z)
            * Mat3::from_rotation_y(angle_y)
            * Mat3::from_rotation_x(angle_x);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// Build a rotation from Euler angles in degrees.
    pub fn from_degrees(angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        Self::new(angle_x.to_radians(), angle_y.to_radians(), angle_z.to_radians())
    }

    /// Local space to world space.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.matrix * v
    }

    /// World space to local space.
    #[inline]
    pub fn inverse_rotate(&self, v: Vec3) -> Vec3 {
        self.inverse * v
    }

    /// The forward rotation matrix.
    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
