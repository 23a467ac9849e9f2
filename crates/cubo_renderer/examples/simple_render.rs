//! Simple ray tracer example.
//!
//! Renders spheres and cubes over a ground plane and saves a PNG.

use cubo_renderer::{
    save_png, AaBox, Camera, Color, Material, RotatedBox, Rotation, Sphere, Vec3, World,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = build_scene();

    let mut camera = Camera::new()
        .with_image(16.0 / 9.0, 400)
        .with_quality(50, 10)
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_lens(20.0, 0.6, 10.0);

    let image = camera.render_image_parallel(&world);

    let filename = "simple_render.png";
    save_png(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> World {
    let mut world = World::new();

    let ground = world.add_material(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    let glass = world.add_material(Material::dielectric(1.5));
    let brown = world.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let metal = world.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));

    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(AaBox::new(
        Vec3::new(-5.0, 0.0, -1.0),
        Vec3::new(-3.0, 2.0, 1.0),
        brown,
    ));
    world.add(RotatedBox::from_size(
        Vec3::new(4.0, 1.0, 0.0),
        2.0,
        metal,
        Rotation::from_degrees(0.0, 45.0, 0.0),
    ));

    world
}
