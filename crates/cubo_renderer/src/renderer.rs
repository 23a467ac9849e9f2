//! Core ray tracing integrator.
//!
//! Implements Monte Carlo ray tracing with:
//! - Bounded scattering depth
//! - Sky gradient background
//! - Gamma correction and 8-bit quantization

use crate::{Color, HitRecord, Hittable, Materials};
use cubo_math::{Interval, Ray};
use rand::RngCore;

/// Minimum hit distance; keeps scattered rays from re-hitting their origin.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Equivalent to the recursive definition
/// `attenuation * ray_color(scattered, depth - 1)`: attenuations are
/// collected on the way out and applied innermost first, so results match
/// the recursion bit for bit without growing the call stack.
pub fn ray_color(
    ray: &Ray,
    depth: u32,
    world: &dyn Hittable,
    materials: &Materials,
    rng: &mut dyn RngCore,
) -> Color {
    let mut attenuations = Vec::with_capacity(depth.min(64) as usize);
    ray_color_with_buffer(ray, depth, world, materials, rng, &mut attenuations)
}

/// [`ray_color`] with a caller-owned attenuation buffer.
///
/// The buffer is cleared on entry. Reusing one buffer across samples keeps
/// the sample loop free of allocations once it has grown to the bounce depth.
pub fn ray_color_with_buffer(
    ray: &Ray,
    depth: u32,
    world: &dyn Hittable,
    materials: &Materials,
    rng: &mut dyn RngCore,
    attenuations: &mut Vec<Color>,
) -> Color {
    attenuations.clear();
    let mut current = *ray;

    for _ in 0..depth {
        let mut rec = HitRecord::default();

        if !world.hit(&current, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY), &mut rec) {
            let sky = sky_gradient(&current);
            return attenuations.iter().rev().fold(sky, |color, a| *a * color);
        }

        match materials[rec.material].scatter(&current, &rec, rng) {
            Some(result) => {
                attenuations.push(result.attenuation);
                current = result.scattered;
            }
            // Ray was absorbed
            None => return Color::ZERO,
        }
    }

    // Out of bounces: no more light is gathered
    Color::ZERO
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
///
/// Negative and NaN inputs map to zero.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.000, 0.999);
    let quantize = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Pixels of scanline `y`, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.offset(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
