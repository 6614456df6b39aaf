//! Core types for image loading.

use image::DynamicImage;
use thiserror::Error;

/// Error types for image loading operations.
///
/// A load failure never carries a partially initialised surface.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The URI uses a scheme this loader cannot resolve.
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),

    /// A `data:` URI is malformed or its base64 payload is invalid.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The remote fetch failed before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote server answered with a non-success status.
    #[error("Failed to load image from {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The bytes are not in a recognised image format.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image is corrupted or incomplete.
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// How a decoded raster must be turned to reach its display orientation,
/// from the EXIF `Orientation` tag (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    /// Mirror across the main diagonal.
    Transpose,
    Rotate90CW,
    /// Mirror across the anti-diagonal.
    Transverse,
    Rotate270CW,
}

impl Orientation {
    /// Turn a decoded image upright, the way browsers do for `<img>`.
    pub(crate) fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => img,
            Orientation::FlipHorizontal => img.fliph(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::FlipVertical => img.flipv(),
            Orientation::Transpose => img.rotate90().fliph(),
            Orientation::Rotate90CW => img.rotate90(),
            Orientation::Transverse => img.rotate270().fliph(),
            Orientation::Rotate270CW => img.rotate270(),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
