//! Built-in scenes.

use std::fmt;
use std::str::FromStr;

use cubo_math::{Point3, Vec3};
use cubo_renderer::{random_range, Color};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::description::{
    CameraDescription, MaterialDescription, ObjectDescription, SceneDescription,
};
use crate::error::SceneError;

/// Small cube colors, cycled by index.
const CUBE_COLORS: [[f64; 3]; 6] = [
    [1.0, 0.2, 0.2],
    [0.2, 1.0, 0.2],
    [0.2, 0.2, 1.0],
    [1.0, 1.0, 0.2],
    [1.0, 0.2, 1.0],
    [0.2, 1.0, 1.0],
];

/// Ground regions (x range, z range) the small cubes are scattered over,
/// cycled by index. The first one sits between the camera and the mirror.
const CUBE_ZONES: [((f64, f64), (f64, f64)); 5] = [
    ((2.0, 9.0), (1.0, 2.5)),
    ((-2.0, 2.0), (1.5, 5.0)),
    ((-6.0, -3.0), (1.0, 3.0)),
    ((3.0, 6.0), (1.0, 3.0)),
    ((-3.0, 3.0), (-0.5, 3.0)),
];

const SMALL_CUBE_COUNT: usize = 30;

/// A scene that ships with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Blue cube on a yellow ground sphere, seen head-on.
    BoxScene,
    /// A larger cube seen from above and to the right.
    CubeCorner,
    /// Mirror, glass and diffuse cubes among scattered colored cubes.
    RotatedCubes,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::BoxScene, Preset::CubeCorner, Preset::RotatedCubes];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::BoxScene => "box-scene",
            Preset::CubeCorner => "cube-corner",
            Preset::RotatedCubes => "rotated-cubes",
        }
    }

    /// Scene description for this preset.
    ///
    /// `seed` drives any random placement in the scene and becomes the
    /// camera's render seed.
    pub fn description(&self, seed: u64) -> SceneDescription {
        let mut scene = match self {
            Preset::BoxScene => box_scene(),
            Preset::CubeCorner => cube_corner(),
            Preset::RotatedCubes => rotated_cubes(seed),
        };
        scene.camera.seed = seed;
        scene
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| SceneError::UnknownPreset(s.to_string()))
    }
}

fn lambertian(albedo: Color) -> MaterialDescription {
    MaterialDescription::Lambertian { albedo }
}

/// Ground sphere plus one axis-aligned box, shared by the two box scenes.
fn ground_and_box(min: Point3, max: Point3) -> SceneDescription {
    let mut scene = SceneDescription::default();
    scene.add_material("ground", lambertian(Color::new(0.8, 0.8, 0.0)));
    scene.add_material("cube", lambertian(Color::new(0.1, 0.2, 0.5)));

    scene.add_object(ObjectDescription::Sphere {
        center: Point3::new(0.0, -100.5, -1.0),
        radius: 100.0,
        material: "ground".to_string(),
    });
    scene.add_object(ObjectDescription::Box {
        min,
        max,
        material: "cube".to_string(),
    });
    scene
}

fn box_scene() -> SceneDescription {
    let mut scene = ground_and_box(Point3::new(-0.5, -0.5, -1.7), Point3::new(0.5, 0.5, -0.7));
    scene.camera = CameraDescription {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(0.0, 0.0, 1.0),
        look_at: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 10.0,
        seed: 0,
    };
    scene
}

fn cube_corner() -> SceneDescription {
    let mut scene = ground_and_box(Point3::new(-1.0, -0.5, -2.0), Point3::new(1.0, 1.5, 0.0));
    scene.camera = CameraDescription {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 45.0,
        look_from: Point3::new(3.0, 2.0, 3.0),
        look_at: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 10.0,
        seed: 0,
    };
    scene
}

fn rotated_cubes(seed: u64) -> SceneDescription {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scene = SceneDescription::default();

    // Every cube is turned 45 degrees so two faces show to the camera
    let rotation_degrees = [0.0, 45.0, 0.0];

    scene.add_material("ground", lambertian(Color::splat(0.5)));
    scene.add_object(ObjectDescription::Sphere {
        center: Point3::new(0.0, -1000.0, 0.0),
        radius: 1000.0,
        material: "ground".to_string(),
    });

    for (index, color) in CUBE_COLORS.iter().enumerate() {
        scene.add_material(format!("cube_{}", index), lambertian(Color::from_array(*color)));
    }

    for i in 0..SMALL_CUBE_COUNT {
        let ((x_min, x_max), (z_min, z_max)) = CUBE_ZONES[i % CUBE_ZONES.len()];
        let x = random_range(&mut rng, x_min, x_max);
        let z = random_range(&mut rng, z_min, z_max);
        let size = random_range(&mut rng, 0.25, 0.4);

        scene.add_object(ObjectDescription::RotatedBox {
            center: Point3::new(x, 0.2, z),
            half_size: size / 2.0,
            rotation_degrees,
            material: format!("cube_{}", i % CUBE_COLORS.len()),
        });
    }

    scene.add_material(
        "mirror",
        MaterialDescription::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_material(
        "glass",
        MaterialDescription::Dielectric {
            refraction_index: 1.5,
        },
    );
    scene.add_material("clay", lambertian(Color::new(0.4, 0.2, 0.1)));

    for (x, material) in [(4.0, "mirror"), (0.0, "glass"), (-4.0, "clay")] {
        scene.add_object(ObjectDescription::RotatedBox {
            center: Point3::new(x, 1.0, 0.0),
            half_size: 1.0,
            rotation_degrees,
            material: material.to_string(),
        });
    }

    scene.camera = CameraDescription {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 20,
        max_depth: 10,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::new(0.0, 0.0, 0.0),
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        seed,
    };

    log::debug!("Generated {} rotated cubes from seed {}", scene.objects.len() - 1, seed);
    scene
}
