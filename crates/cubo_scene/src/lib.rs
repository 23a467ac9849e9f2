//! Cubo scene - scene descriptions for the cubo ray tracer.
//!
//! This crate provides:
//!
//! - **Scene files**: a serde data model of camera, named materials and
//!   objects, read from and written to JSON
//! - **Presets**: the built-in scenes the renderer ships with
//!
//! # Example
//!
//! ```no_run
//! use cubo_scene::{load_scene, Preset};
//!
//! // Load a scene file, or start from a preset
//! let description = load_scene("scene.json")?;
//! let (_camera, _world) = description.build()?;
//!
//! let preset = Preset::RotatedCubes.description(7);
//! println!("{} objects", preset.objects.len());
//! # Ok::<(), cubo_scene::SceneError>(())
//! ```

pub mod description;
pub mod error;
pub mod preset;

// Re-export commonly used types
pub use description::{
    load_scene, CameraDescription, MaterialDescription, ObjectDescription, SceneDescription,
};
pub use error::{SceneError, SceneResult};
pub use preset::Preset;
