//! The renderable scene: shapes plus the materials they point at.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::{Material, MaterialId, Materials, Primitive};
use cubo_math::{Interval, Ray};

/// Everything the integrator needs to shade a ray.
///
/// Built once, then only read while rendering, so a `&World` can be shared
/// across worker threads.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub objects: HittableList,
    pub materials: Materials,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and get the handle primitives should use.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.add(material)
    }

    /// Add a shape to the scene.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.add(object);
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        self.objects.hit(ray, ray_t, rec)
    }
}
