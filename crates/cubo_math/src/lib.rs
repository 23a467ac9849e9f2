//! Cubo math - vectors, rays, intervals and rotations for the ray tracer.
//!
//! All geometry is `f64`: glam's double precision types are re-exported
//! under the short names used throughout the workspace.

// Re-export glam for convenience
pub use glam;
pub use glam::{DMat3 as Mat3, DVec3 as Vec3};

mod interval;
mod ray;
mod rotation;
mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use rotation::Rotation;
pub use vec::{Point3, Vec3Ext};
