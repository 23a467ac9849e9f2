use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cubo_renderer::{save_png, write_ppm, Camera, World};
use cubo_scene::{load_scene, Preset, SceneDescription};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Resolve the scene the user asked for and apply command line overrides.
fn scene_description(args: &Args) -> Result<SceneDescription> {
    let mut scene = match &args.scene_file {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene file {}", path.display()))?,
        None => {
            let preset = Preset::from(args.scene);
            log::info!("Using preset scene '{}'", preset);
            preset.description(args.seed.unwrap_or(0))
        }
    };

    apply_overrides(&mut scene, args);
    Ok(scene)
}

fn apply_overrides(scene: &mut SceneDescription, args: &Args) {
    let camera = &mut scene.camera;
    if let Some(seed) = args.seed {
        camera.seed = seed;
    }
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        camera.max_depth = max_depth;
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Render to a PPM stream. The sequential path writes rows as they finish.
fn render_ppm<W: Write>(
    camera: &mut Camera,
    world: &World,
    parallel: bool,
    out: &mut W,
) -> Result<()> {
    if parallel {
        let image = camera.render_image_parallel(world);
        write_ppm(&image, out)?;
    } else {
        camera.render(world, out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let scene = scene_description(&args)?;

    if args.dump_scene {
        let json = scene.to_json_pretty().context("Failed to serialize scene")?;
        println!("{}", json);
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let (camera, world) = scene.build().context("Invalid scene")?;
    let mut camera = camera.with_progress(!args.quiet);
    let parallel = args.use_parallel();

    match &args.output {
        Some(path) if is_png(path) => {
            let image = if parallel {
                camera.render_image_parallel(&world)
            } else {
                camera.render_image(&world)
            };
            save_png(&image, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            render_ppm(&mut camera, &world, parallel, &mut out)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Saved to {}", path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            render_ppm(&mut camera, &world, parallel, &mut out)
                .context("Failed to write image to stdout")?;
        }
    }

    Ok(())
}
