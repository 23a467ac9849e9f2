//! Image output: plain-text PPM and PNG.

use crate::renderer::{color_to_rgb8, ImageBuffer};
use crate::Color;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Write the `P3` header for a `width` x `height` image.
pub fn write_ppm_header<W: Write + ?Sized>(
    out: &mut W,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    write!(out, "P3\n{} {}\n255\n", width, height)?;
    Ok(())
}

/// Write one averaged pixel as an `R G B` line.
pub fn write_color<W: Write + ?Sized>(out: &mut W, color: Color) -> Result<(), RenderError> {
    let [r, g, b] = color_to_rgb8(color);
    writeln!(out, "{} {} {}", r, g, b)?;
    Ok(())
}

/// Serialize a whole image as plain-text PPM.
pub fn write_ppm<W: Write + ?Sized>(image: &ImageBuffer, out: &mut W) -> Result<(), RenderError> {
    write_ppm_header(out, image.width, image.height)?;
    for color in &image.pixels {
        write_color(out, *color)?;
    }
    out.flush()?;
    Ok(())
}

/// Save an image as PNG.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )?;
    log::info!("Saved {}x{} PNG to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 255\n");
    }

    #[test]
    fn test_empty_image_has_header_only() {
        let image = ImageBuffer::new(0, 1);
        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        assert_eq!(out, b"P3\n0 1\n255\n");
    }

    #[test]
    fn test_save_png() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(1, 1, Color::new(1.0, 0.0, 0.0));

        let path = std::env::temp_dir().join(format!("cubo_output_{}.png", std::process::id()));
        save_png(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0]);
        std::fs::remove_file(&path).unwrap();
    }
}
