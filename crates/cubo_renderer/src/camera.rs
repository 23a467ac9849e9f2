//! Camera: ray generation and the scanline render loops.

use crate::output::{write_color, write_ppm_header};
use crate::progress::ScanlineProgress;
use crate::renderer::{ray_color_with_buffer, ImageBuffer};
use crate::sampling::{random_f64, random_in_unit_disk, scanline_rng};
use crate::{Color, RenderError, World};
use cubo_math::{Point3, Ray, Vec3};
use rand::RngCore;
use rayon::prelude::*;
use std::io::Write;
use std::time::Instant;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,          // Vertical field of view in degrees
    pub defocus_angle: f64, // Variation angle of rays through each pixel
    pub focus_dist: f64,    // Distance from camera to plane of perfect focus

    /// Seed for the per-scanline random streams
    pub seed: u64,
    /// Print scanline progress to stderr
    pub show_progress: bool,

    // Cached computed values (set by initialize())
    image_height: u32,
    samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_radius: f64,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 1.0,
            seed: 0,
            show_progress: true,
            // Cached values (initialized to defaults)
            image_height: 1,
            samples_scale: 0.1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_radius: 0.0,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image width and aspect ratio; the height follows from both.
    pub fn with_image(mut self, aspect_ratio: f64, image_width: u32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. Angles are in degrees.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// The render methods call this themselves.
    pub fn initialize(&mut self) {
        if self.image_width == 0 {
            log::warn!("Image width is 0, the render will have no pixels");
        }

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        self.defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * self.defocus_radius;
        self.defocus_disk_v = self.v * self.defocus_radius;

        log::debug!(
            "Camera basis u={:?} v={:?} w={:?}, defocus radius {}",
            self.u,
            self.v,
            self.w,
            self.defocus_radius
        );
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Trace scanline `j`, returning averaged linear colors left to right.
    ///
    /// Every row draws from its own `scanline_rng`, so the result depends
    /// only on the seed and the row, never on render order.
    pub fn render_row(&self, world: &World, j: u32) -> Vec<Color> {
        let mut rng = scanline_rng(self.seed, j);
        let mut attenuations = Vec::new();

        (0..self.image_width)
            .map(|i| {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let ray = self.get_ray(i, j, &mut rng);
                    pixel_color += ray_color_with_buffer(
                        &ray,
                        self.max_depth,
                        &world.objects,
                        &world.materials,
                        &mut rng,
                        &mut attenuations,
                    );
                }
                pixel_color * self.samples_scale
            })
            .collect()
    }

    /// Render the scene single-threaded, streaming a PPM image to `out`.
    pub fn render<W: Write + ?Sized>(
        &mut self,
        world: &World,
        out: &mut W,
    ) -> Result<(), RenderError> {
        self.initialize();
        self.log_start(world, "sequential");

        let start = Instant::now();
        let progress = ScanlineProgress::new(self.image_height, self.show_progress);

        write_ppm_header(out, self.image_width, self.image_height)?;
        for j in 0..self.image_height {
            progress.report();
            for color in self.render_row(world, j) {
                write_color(out, color)?;
            }
            progress.row_done_quiet();
        }
        out.flush()?;

        progress.finish();
        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Render the scene single-threaded into an image buffer.
    pub fn render_image(&mut self, world: &World) -> ImageBuffer {
        self.initialize();
        self.log_start(world, "sequential");

        let start = Instant::now();
        let progress = ScanlineProgress::new(self.image_height, self.show_progress);
        let mut image = ImageBuffer::new(self.image_width, self.image_height);

        for j in 0..self.image_height {
            progress.report();
            let row = self.render_row(world, j);
            for (i, color) in row.into_iter().enumerate() {
                image.set(i as u32, j, color);
            }
            progress.row_done_quiet();
        }

        progress.finish();
        log::info!("Render finished in {:.2?}", start.elapsed());
        image
    }

    /// Render the scene with one rayon task per scanline.
    ///
    /// Produces exactly the same pixels as [`Camera::render_image`] for the
    /// same seed.
    pub fn render_image_parallel(&mut self, world: &World) -> ImageBuffer {
        self.initialize();
        self.log_start(world, "parallel");

        let start = Instant::now();
        let progress = ScanlineProgress::new(self.image_height, self.show_progress);
        let mut image = ImageBuffer::new(self.image_width, self.image_height);

        if self.image_width > 0 {
            let camera: &Camera = self;
            image
                .pixels
                .par_chunks_mut(self.image_width as usize)
                .enumerate()
                .for_each(|(j, row)| {
                    row.copy_from_slice(&camera.render_row(world, j as u32));
                    progress.row_done();
                });
        }

        progress.finish();
        log::info!(
            "Render finished in {:.2?} on {} threads",
            start.elapsed(),
            rayon::current_num_threads()
        );
        image
    }

    fn log_start(&self, world: &World, mode: &str) {
        log::info!(
            "Rendering {}x{} ({}), {} spp, max depth {}, {} objects, seed {}",
            self.image_width,
            self.image_height,
            mode,
            self.samples_per_pixel,
            self.max_depth,
            world.len(),
            self.seed
        );
    }

    /// Image height in pixels (valid after `initialize`).
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera center (valid after `initialize`).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius of the defocus disk (valid after `initialize`).
    pub fn defocus_radius(&self) -> f64 {
        self.defocus_radius
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}
