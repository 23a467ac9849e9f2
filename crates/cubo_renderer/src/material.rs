//! Materials describing how light scatters off surfaces.

use crate::hittable::HitRecord;
use crate::sampling::{random_f64, random_in_unit_sphere, random_unit_vector};
use cubo_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;
use std::ops::Index;

/// Color type alias (linear RGB, nominally 0-1)
pub type Color = Vec3;

/// Result of a scatter operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color attenuation applied to light carried by the scattered ray
    pub attenuation: Color,
    /// The scattered ray
    pub scattered: Ray,
}

/// Surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` in [0, 1] perturbs the mirror direction.
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive surface such as glass or water.
    Dielectric { refraction_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with fuzz clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// - `refraction_index`: 1.0 = air, 1.33 = water, 1.5 = glass
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.near_zero() {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // Fuzz can push the ray below the surface: absorb it
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { refraction_index } => {
                let ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction =
                    if cannot_refract || reflectance(cos_theta, ratio) > random_f64(rng) {
                        reflect(unit_direction, rec.normal)
                    } else {
                        refract(unit_direction, rec.normal, ratio)
                    };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `etai_over_etat`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Handle to a material stored in a [`Materials`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MaterialId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena owning every material of a scene.
///
/// Primitives hold a [`MaterialId`] instead of a reference, so many shapes
/// can share one material without lifetimes or reference counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materials {
    materials: Vec<Material>,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.materials.iter()
    }
}

impl Index<MaterialId> for Materials {
    type Output = Material;

    fn index(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_facing_up() -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            material: MaterialId::default(),
            t: 1.0,
            front_face: true,
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let uv = Vec3::new(0.0, -1.0, 0.0);
        let out = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!((out - uv).length() < 1e-12);
    }

    #[test]
    fn test_reflectance_limits() {
        // Normal incidence on glass reflects about 4%
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-12);
        // Grazing incidence reflects everything
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 1.0
            }
        );
        assert_eq!(
            Material::metal(Color::ONE, -0.5),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let albedo = Color::new(0.8, 0.6, 0.2);
        let material = Material::lambertian(albedo);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = hit_facing_up();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("lambertian never absorbs");
            assert_eq!(result.attenuation, albedo);
            assert!(result.attenuation.max_element() <= 1.0);
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::metal(Color::new(0.7, 0.6, 0.5), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit_facing_up();
        let mut rng = StdRng::seed_from_u64(42);

        let result = material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-12);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_fuzzy_metal_never_scatters_below_surface() {
        let material = Material::metal(Color::splat(0.9), 1.0);
        // Grazing incidence: fuzz often pushes the reflection under the surface
        let ray = Ray::new(Vec3::new(-1.0, 0.05, 0.0), Vec3::new(1.0, -0.05, 0.0));
        let rec = hit_facing_up();
        let mut rng = StdRng::seed_from_u64(42);

        let mut absorbed = 0;
        for _ in 0..500 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => {
                    assert!(result.scattered.direction().dot(rec.normal) > 0.0);
                    assert!(result.attenuation.max_element() <= 1.0);
                }
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        // Leaving glass at a steep angle: must reflect
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), Vec3::new(1.0, 0.2, 0.0));
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: -Vec3::Y,
            material: MaterialId::default(),
            t: 1.0,
            front_face: false,
        };
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let result = material.scatter(&ray, &rec, &mut rng).expect("glass never absorbs");
            assert_eq!(result.attenuation, Color::ONE);
            assert!(result.scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_materials_arena() {
        let mut materials = Materials::new();
        assert!(materials.is_empty());

        let red = materials.add(Material::lambertian(Color::new(1.0, 0.0, 0.0)));
        let glass = materials.add(Material::dielectric(1.5));

        assert_eq!(materials.len(), 2);
        assert_eq!(red.index(), 0);
        assert_eq!(materials[glass], Material::dielectric(1.5));
        assert_eq!(materials.get(MaterialId::new(5)), None);
    }
}
