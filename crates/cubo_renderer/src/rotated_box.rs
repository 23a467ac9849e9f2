//! Oriented box primitive.
//!
//! The box is stored in its own local frame, centered at the origin with
//! half extent `half_size` on every axis. Rays are taken into that frame
//! with the inverse rotation, intersected with the slab test, and the face
//! normal is rotated back out.

use crate::aa_box::slab_hit;
use crate::hittable::{HitRecord, Hittable};
use crate::MaterialId;
use cubo_math::{Interval, Point3, Ray, Rotation, Vec3};

/// Distance from a face plane below which a local hit point counts as on it.
const FACE_EPSILON: f64 = 1e-8;

/// A cube rotated about its own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedBox {
    center: Point3,
    half_size: f64,
    material: MaterialId,
    rotation: Rotation,
}

impl RotatedBox {
    /// Create a rotated cube. `half_size` is half the edge length.
    pub fn new(center: Point3, half_size: f64, material: MaterialId, rotation: Rotation) -> Self {
        Self {
            center,
            half_size,
            material,
            rotation,
        }
    }

    /// Create a rotated cube from its full edge length.
    pub fn from_size(center: Point3, size: f64, material: MaterialId, rotation: Rotation) -> Self {
        Self::new(center, size / 2.0, material, rotation)
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn half_size(&self) -> f64 {
        self.half_size
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Local-frame axis of the face a local point lies on.
    fn local_face_axis(&self, p: Vec3) -> Vec3 {
        let h = self.half_size;
        if (p.x - h).abs() < FACE_EPSILON {
            Vec3::X
        } else if (p.x + h).abs() < FACE_EPSILON {
            -Vec3::X
        } else if (p.y - h).abs() < FACE_EPSILON {
            Vec3::Y
        } else if (p.y + h).abs() < FACE_EPSILON {
            -Vec3::Y
        } else if (p.z - h).abs() < FACE_EPSILON {
            Vec3::Z
        } else {
            -Vec3::Z
        }
    }
}

impl Hittable for RotatedBox {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let local_origin = self.rotation.inverse_rotate(ray.origin() - self.center);
        let local_direction = self.rotation.inverse_rotate(ray.direction());
        let half = Vec3::splat(self.half_size);

        let Some(t) = slab_hit(-half, half, local_origin, local_direction, ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);

        let local_p = self.rotation.inverse_rotate(rec.p - self.center);
        let outward_normal = self.rotation.rotate(self.local_face_axis(local_p));
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AaBox;

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_unrotated_matches_aa_box() {
        let material = MaterialId::new(2);
        let aa = AaBox::new(Vec3::splat(-1.0), Vec3::splat(1.0), material);
        let rotated = RotatedBox::new(Vec3::ZERO, 1.0, material, Rotation::new(0.0, 0.0, 0.0));

        let rays = [
            Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0)),
            Ray::new(Vec3::new(0.3, 0.2, -5.0), Vec3::new(0.01, 0.02, 1.0)),
            Ray::new(Vec3::new(4.0, 0.5, 0.25), Vec3::new(-1.0, 0.1, 0.0)),
            Ray::new(Vec3::new(0.1, 6.0, 0.2), Vec3::new(0.0, -3.0, 0.1)),
            Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, 1.0)),
        ];

        for ray in &rays {
            let mut expected = HitRecord::default();
            let mut actual = HitRecord::default();
            let hit_aa = aa.hit(ray, forward(), &mut expected);
            let hit_rot = rotated.hit(ray, forward(), &mut actual);

            assert_eq!(hit_aa, hit_rot, "ray {:?}", ray);
            assert_eq!(expected, actual, "ray {:?}", ray);
        }
    }

    #[test]
    fn test_rotated_box_normal_follows_rotation() {
        // 45 degrees about y: the corner (edge) faces +z now
        let rotated = RotatedBox::new(
            Vec3::ZERO,
            1.0,
            MaterialId::new(0),
            Rotation::from_degrees(0.0, 45.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(0.2, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(rotated.hit(&ray, forward(), &mut rec));
        // Edge sits at z = sqrt(2); offset x by 0.2 moves the hit in by 0.2
        assert!((rec.t - (5.0 - (2.0_f64.sqrt() - 0.2))).abs() < 1e-9);

        // Hit the face whose local normal is +z, rotated to (sin45, 0, cos45)
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((rec.normal - Vec3::new(s, 0.0, s)).length() < 1e-9);
        assert!(rec.front_face);
    }

    #[test]
    fn test_rotated_box_offset_center() {
        let rotated = RotatedBox::from_size(
            Vec3::new(4.0, 1.0, 0.0),
            2.0,
            MaterialId::new(0),
            Rotation::from_degrees(0.0, 90.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(4.0, 1.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(rotated.hit(&ray, forward(), &mut rec));
        assert!((rec.t - 9.0).abs() < 1e-9);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_rotated_box_miss() {
        let rotated = RotatedBox::new(
            Vec3::ZERO,
            0.5,
            MaterialId::new(0),
            Rotation::from_degrees(10.0, 20.0, 30.0),
        );
        let ray = Ray::new(Vec3::new(3.0, 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!rotated.hit(&ray, forward(), &mut rec));
        assert_eq!(rec, HitRecord::default());
    }

    #[test]
    fn test_face_fallback_is_negative_z() {
        let rotated = RotatedBox::new(Vec3::ZERO, 1.0, MaterialId::new(0), Rotation::IDENTITY);
        assert_eq!(rotated.local_face_axis(Vec3::new(0.2, 0.3, 0.4)), -Vec3::Z);
        assert_eq!(rotated.local_face_axis(Vec3::new(-1.0, 0.3, 1.0)), -Vec3::X);
    }
}
