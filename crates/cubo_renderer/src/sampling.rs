//! Random sampling helpers.
//!
//! Nothing here owns a generator: every function draws from the
//! `RngCore` it is handed, so renders are reproducible from a seed.

use cubo_math::Vec3;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator type used for one scanline of a render.
pub type ScanlineRng = ChaCha8Rng;

/// Uniform f64 in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with every component uniform in [min, max).
fn random_vec(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Normalizing a denormal-sized vector overflows
        if len_sq > 1e-160 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the xy plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Independent random stream for scanline `row` of a render seeded with `seed`.
///
/// Every row gets its own ChaCha stream, so rows can be traced in any order
/// (or in parallel) and still draw exactly the same numbers.
pub fn scanline_rng(seed: u64, row: u32) -> ScanlineRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(row));
    rng
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let x = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
        }
    }

    #[test]
    fn test_unit_sphere_and_disk() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);

            let d = random_in_unit_disk(&mut rng);
            assert!(d.length_squared() < 1.0);
            assert_eq!(d.z, 0.0);

            let u = random_unit_vector(&mut rng);
            assert!((u.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scanline_rng_reproducible() {
        let mut a = scanline_rng(7, 12);
        let mut b = scanline_rng(7, 12);
        for _ in 0..16 {
            assert_eq!(random_f64(&mut a), random_f64(&mut b));
        }
    }

    #[test]
    fn test_scanline_rng_rows_differ() {
        let mut a = scanline_rng(7, 0);
        let mut b = scanline_rng(7, 1);
        let first: Vec<f64> = (0..8).map(|_| random_f64(&mut a)).collect();
        let second: Vec<f64> = (0..8).map(|_| random_f64(&mut b)).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_scanline_rng_seeds_differ() {
        let mut a = scanline_rng(1, 3);
        let mut b = scanline_rng(2, 3);
        assert_ne!(a.next_u64(), b.next_u64());
    }
}
