//! Cubo renderer - CPU ray tracing.
//!
//! A Monte Carlo, Whitted-style ray tracer over analytic primitives
//! (spheres, axis-aligned boxes, rotated boxes) with lambertian, metal and
//! dielectric materials. Output is a plain-text PPM image.

mod aa_box;
mod camera;
mod hittable;
mod material;
mod output;
mod primitive;
mod progress;
mod renderer;
mod rotated_box;
mod sampling;
mod sphere;
mod world;

pub use aa_box::AaBox;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, reflectance, refract, Color, Material, MaterialId, Materials, ScatterResult,
};
pub use output::{save_png, write_color, write_ppm, write_ppm_header, RenderError};
pub use primitive::Primitive;
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, ray_color_with_buffer, sky_gradient, ImageBuffer,
    SHADOW_ACNE_EPSILON,
};
pub use rotated_box::RotatedBox;
pub use sampling::{
    random_f64, random_in_unit_disk, random_in_unit_sphere, random_range, random_unit_vector,
    scanline_rng, ScanlineRng,
};
pub use sphere::Sphere;
pub use world::World;

/// Re-export the math types used in the public API
pub use cubo_math::{Interval, Point3, Ray, Rotation, Vec3};
