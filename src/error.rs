use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::band::RowBand;

/// Width and height of an image, displayed as `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Every fault the blend can hit. None of them are recoverable: the tool
/// reports the error and exits without writing any output.
#[derive(Debug, Error)]
pub enum BlendError {
    #[error("Couldn't locate source and help images: {}", display_paths(.paths))]
    MissingInput { paths: Vec<PathBuf> },

    #[error("Images to blend don't have the same size: source is {source_size}, help is {help_size}")]
    DimensionMismatch {
        source_size: Dimensions,
        help_size: Dimensions,
    },

    #[error("Help image has {found} color channels, but the source needs {expected}")]
    ChannelMismatch { expected: usize, found: usize },

    #[error("Couldn't allocate memory for the destination image ({samples} samples)")]
    Allocation { samples: usize },

    #[error("Planar buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image of {dimensions} has no pixels")]
    Empty { dimensions: Dimensions },

    #[error("Image of {dimensions} is too large to encode")]
    TooLarge { dimensions: Dimensions },

    #[error("Failed to decode image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to spawn worker for {band}: {source}")]
    Spawn { band: RowBand, source: io::Error },

    #[error("Worker for {band} panicked")]
    WorkerPanicked { band: RowBand },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("'{}'", path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
