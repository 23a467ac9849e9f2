//! Serializable scene descriptions.
//!
//! A scene file names its materials once and lets objects refer to them by
//! name:
//!
//! ```json
//! {
//!   "camera": { "aspect_ratio": 1.7777777777777777, "image_width": 400 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] }
//!   },
//!   "objects": [
//!     { "type": "sphere", "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" }
//!   ]
//! }
//! ```
//!
//! Omitted camera fields take the renderer's defaults.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use cubo_math::{Point3, Rotation, Vec3};
use cubo_renderer::{AaBox, Camera, Color, Material, MaterialId, RotatedBox, Sphere, World};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Camera and image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Defocus cone angle in degrees; 0 disables depth of field
    pub defocus_angle: f64,
    pub focus_dist: f64,
    pub seed: u64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        let camera = Camera::new();
        Self {
            aspect_ratio: camera.aspect_ratio,
            image_width: camera.image_width,
            samples_per_pixel: camera.samples_per_pixel,
            max_depth: camera.max_depth,
            vfov: camera.vfov,
            look_from: camera.look_from,
            look_at: camera.look_at,
            vup: camera.vup,
            defocus_angle: camera.defocus_angle,
            focus_dist: camera.focus_dist,
            seed: camera.seed,
        }
    }
}

impl CameraDescription {
    /// Build a renderer camera.
    pub fn build(&self) -> SceneResult<Camera> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SceneError::InvalidParameter(format!(
                "aspect_ratio must be positive and finite, got {}",
                self.aspect_ratio
            )));
        }

        Ok(Camera::new()
            .with_image(self.aspect_ratio, self.image_width)
            .with_quality(self.samples_per_pixel, self.max_depth)
            .with_position(self.look_from, self.look_at, self.vup)
            .with_lens(self.vfov, self.defocus_angle, self.focus_dist)
            .with_seed(self.seed))
    }
}

/// A named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        refraction_index: f64,
    },
}

impl MaterialDescription {
    pub fn build(&self) -> SceneResult<Material> {
        Ok(match *self {
            MaterialDescription::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDescription::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDescription::Dielectric { refraction_index } => {
                if !(refraction_index.is_finite() && refraction_index > 0.0) {
                    return Err(SceneError::InvalidParameter(format!(
                        "refraction_index must be positive, got {}",
                        refraction_index
                    )));
                }
                Material::dielectric(refraction_index)
            }
        })
    }
}

/// A shape and the name of its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: Point3,
        radius: f64,
        material: String,
    },
    /// Axis-aligned box between two corners.
    Box {
        min: Point3,
        max: Point3,
        material: String,
    },
    /// Cube rotated about its center by Euler angles in degrees.
    RotatedBox {
        center: Point3,
        half_size: f64,
        #[serde(default)]
        rotation_degrees: [f64; 3],
        material: String,
    },
}

impl ObjectDescription {
    /// Name of the material this object uses.
    pub fn material(&self) -> &str {
        match self {
            ObjectDescription::Sphere { material, .. }
            | ObjectDescription::Box { material, .. }
            | ObjectDescription::RotatedBox { material, .. } => material,
        }
    }
}

/// A complete scene: camera, materials and objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene as indented JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a named material, replacing any previous one with that name.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDescription) {
        self.materials.insert(name.into(), material);
    }

    pub fn add_object(&mut self, object: ObjectDescription) {
        self.objects.push(object);
    }

    /// Build the renderer camera and world.
    pub fn build(&self) -> SceneResult<(Camera, World)> {
        let camera = self.camera.build()?;
        let mut world = World::new();

        let mut ids: HashMap<&str, MaterialId> = HashMap::with_capacity(self.materials.len());
        for (name, material) in &self.materials {
            ids.insert(name.as_str(), world.add_material(material.build()?));
        }

        for (index, object) in self.objects.iter().enumerate() {
            let material = *ids
                .get(object.material())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    name: object.material().to_string(),
                    index,
                })?;

            match *object {
                ObjectDescription::Sphere { center, radius, .. } => {
                    if radius.is_nan() || radius <= 0.0 {
                        return Err(SceneError::InvalidParameter(format!(
                            "object {}: sphere radius must be positive, got {}",
                            index, radius
                        )));
                    }
                    world.add(Sphere::new(center, radius, material));
                }
                ObjectDescription::Box { min, max, .. } => {
                    world.add(AaBox::new(min, max, material));
                }
                ObjectDescription::RotatedBox {
                    center,
                    half_size,
                    rotation_degrees: [x, y, z],
                    ..
                } => {
                    if half_size.is_nan() || half_size <= 0.0 {
                        return Err(SceneError::InvalidParameter(format!(
                            "object {}: rotated box half_size must be positive, got {}",
                            index, half_size
                        )));
                    }
                    let rotation = Rotation::from_degrees(x, y, z);
                    world.add(RotatedBox::new(center, half_size, material, rotation));
                }
            }
        }

        log::debug!(
            "Built scene: {} materials, {} objects",
            world.materials.len(),
            world.len()
        );

        Ok((camera, world))
    }
}

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let scene = SceneDescription::from_json(&contents)?;

    log::info!(
        "Loaded scene {}: {} materials, {} objects",
        path.display(),
        scene.materials.len(),
        scene.objects.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX_SCENE: &str = r#"{
        "camera": {
            "aspect_ratio": 1.7777777777777777,
            "image_width": 400,
            "samples_per_pixel": 100,
            "max_depth": 50,
            "vfov": 20.0,
            "look_from": [0.0, 0.0, 1.0],
            "look_at": [0.0, 0.0, -1.0],
            "focus_dist": 10.0
        },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "cube": { "type": "lambertian", "albedo": [0.1, 0.2, 0.5] }
        },
        "objects": [
            { "type": "sphere", "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "type": "box", "min": [-0.5, -0.5, -1.7], "max": [0.5, 0.5, -0.7], "material": "cube" }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let scene = SceneDescription::from_json(BOX_SCENE).unwrap();
        assert_eq!(scene.materials.len(), 2);
        assert_eq!(scene.objects.len(), 2);
        // Omitted fields keep the defaults
        assert_eq!(scene.camera.vup, Vec3::Y);
        assert_eq!(scene.camera.defocus_angle, 0.0);

        let (mut camera, world) = scene.build().unwrap();
        camera.initialize();
        assert_eq!(camera.image_height(), 225);
        assert_eq!(camera.vfov, 20.0);
        assert_eq!(world.len(), 2);
        assert_eq!(world.materials.len(), 2);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let scene = SceneDescription::from_json("{}").unwrap();
        assert_eq!(scene.camera, CameraDescription::default());
        assert_eq!(scene.camera.image_width, 100);
        assert!(scene.objects.is_empty());

        let (_, world) = scene.build().unwrap();
        assert!(world.is_empty());
    }

    #[test]
    fn test_metal_fuzz_defaults_to_zero() {
        let material: MaterialDescription =
            serde_json::from_str(r#"{ "type": "metal", "albedo": [0.7, 0.6, 0.5] }"#).unwrap();
        assert_eq!(
            material.build().unwrap(),
            Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)
        );
    }

    #[test]
    fn test_rotated_box_parses() {
        let object: ObjectDescription = serde_json::from_str(
            r#"{ "type": "rotated_box", "center": [4.0, 1.0, 0.0], "half_size": 1.0,
                 "rotation_degrees": [0.0, 45.0, 0.0], "material": "steel" }"#,
        )
        .unwrap();
        assert_eq!(object.material(), "steel");
        assert!(matches!(
            object,
            ObjectDescription::RotatedBox { rotation_degrees, .. } if rotation_degrees == [0.0, 45.0, 0.0]
        ));
    }

    #[test]
    fn test_unknown_material() {
        let mut scene = SceneDescription::default();
        scene.add_object(ObjectDescription::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material: "missing".to_string(),
        });

        match scene.build() {
            Err(SceneError::UnknownMaterial { name, index }) => {
                assert_eq!(name, "missing");
                assert_eq!(index, 0);
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let mut scene = SceneDescription::default();
        scene.add_material(
            "grey",
            MaterialDescription::Lambertian {
                albedo: Color::splat(0.5),
            },
        );
        scene.add_object(ObjectDescription::Sphere {
            center: Vec3::ZERO,
            radius: -1.0,
            material: "grey".to_string(),
        });
        assert!(matches!(scene.build(), Err(SceneError::InvalidParameter(_))));

        let mut scene = SceneDescription::default();
        scene.camera.aspect_ratio = 0.0;
        assert!(matches!(scene.build(), Err(SceneError::InvalidParameter(_))));

        let glass = MaterialDescription::Dielectric {
            refraction_index: f64::NAN,
        };
        assert!(matches!(glass.build(), Err(SceneError::InvalidParameter(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json(r#"{ "objects": [ { "type": "torus" } ] }"#),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_load_scene_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/cubo/scene.json"),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let scene = SceneDescription::from_json(BOX_SCENE).unwrap();
        let json = scene.to_json_pretty().unwrap();
        assert_eq!(SceneDescription::from_json(&json).unwrap(), scene);
    }
}
