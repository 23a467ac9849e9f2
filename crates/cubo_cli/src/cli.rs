use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cubo_scene::Preset;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Blue cube on a ground sphere, seen head-on
    BoxScene,
    /// Larger cube seen from above and to the right
    CubeCorner,
    /// Mirror, glass and diffuse cubes among scattered colored cubes
    RotatedCubes,
}

impl From<ScenePreset> for Preset {
    fn from(preset: ScenePreset) -> Self {
        match preset {
            ScenePreset::BoxScene => Preset::BoxScene,
            ScenePreset::CubeCorner => Preset::CubeCorner,
            ScenePreset::RotatedCubes => Preset::RotatedCubes,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "cubo")]
#[command(version, about = "Render cubes and spheres with a CPU ray tracer")]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "box-scene")]
    pub scene: ScenePreset,

    /// Load the scene from a JSON file instead of a preset
    #[arg(long, value_name = "FILE", conflicts_with = "scene")]
    pub scene_file: Option<PathBuf>,

    /// Output file (.png writes PNG, anything else PPM); stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for scene generation and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(short = 's', long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Render scanlines on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel rendering (implies --parallel)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Do not print scanline progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the scene description as JSON and exit
    #[arg(long)]
    pub dump_scene: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn use_parallel(&self) -> bool {
        self.parallel || self.threads.is_some()
    }
}
