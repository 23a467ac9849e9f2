//! Closed set of renderable shapes.

use crate::hittable::{HitRecord, Hittable};
use crate::{AaBox, MaterialId, RotatedBox, Sphere};
use cubo_math::{Interval, Ray};

/// Any shape the scene aggregate can hold.
///
/// Dispatch is a plain `match`, so the hot intersection loop never goes
/// through a vtable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    AaBox(AaBox),
    RotatedBox(RotatedBox),
}

impl Primitive {
    /// Material handle of the shape.
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(s) => s.material(),
            Primitive::AaBox(b) => b.material(),
            Primitive::RotatedBox(b) => b.material(),
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t, rec),
            Primitive::AaBox(b) => b.hit(ray, ray_t, rec),
            Primitive::RotatedBox(b) => b.hit(ray, ray_t, rec),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<AaBox> for Primitive {
    fn from(aa_box: AaBox) -> Self {
        Primitive::AaBox(aa_box)
    }
}

impl From<RotatedBox> for Primitive {
    fn from(rotated_box: RotatedBox) -> Self {
        Primitive::RotatedBox(rotated_box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubo_math::{Rotation, Vec3};

    #[test]
    fn test_primitive_dispatch() {
        let shapes: [Primitive; 3] = [
            Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, MaterialId::new(0)).into(),
            AaBox::new(
                Vec3::new(-1.0, -1.0, -4.0),
                Vec3::new(1.0, 1.0, -2.0),
                MaterialId::new(1),
            )
            .into(),
            RotatedBox::new(
                Vec3::new(0.0, 0.0, -3.0),
                1.0,
                MaterialId::new(2),
                Rotation::IDENTITY,
            )
            .into(),
        ];

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for (index, shape) in shapes.iter().enumerate() {
            let mut rec = HitRecord::default();
            assert!(shape.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
            assert!((rec.t - 2.0).abs() < 1e-12);
            assert_eq!(rec.material, MaterialId::new(index));
            assert_eq!(shape.material(), MaterialId::new(index));
        }
    }
}
