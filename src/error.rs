use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("grid dimensions must be between 1 and u32::MAX, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("no iteration counts requested")]
    EmptyIterations,

    #[error("{axis} axis must satisfy min < max with finite bounds, got [{min}, {max}]")]
    InvalidAxis { axis: &'static str, min: f64, max: f64 },

    #[error("{name} must be a positive finite number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{points} reference points but only {colors} base colors")]
    PaletteTooSmall { points: usize, colors: usize },

    #[error("failed to create output directory {path:?}: {source}")]
    OutputDir { path: PathBuf, source: io::Error },

    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to write {path:?}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}
