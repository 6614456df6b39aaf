//! Geometric transforms applied by the action pipeline.
//!
//! Each transform is a pure function from a borrowed [`Surface`] and its
//! parameters to a new `Surface`. None of them share state, and degenerate
//! inputs (empty crops, zero-degree rotations, flips with no axis) produce
//! well-defined results rather than errors.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Crop and extent coordinates are in source pixels
//! - Rotation angles are in degrees, positive = clockwise

mod crop;
mod extent;
mod flip;
mod resize;
mod rotate;

pub use crop::apply_crop;
pub use extent::apply_extent;
pub use flip::apply_flip;
pub use resize::{apply_resize, resize_dimensions};
pub use rotate::{apply_rotate, compute_rotated_bounds};

use thiserror::Error;

use crate::surface::Surface;

/// Errors raised by transforms for parameters they cannot honour.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A numeric parameter is negative, NaN or infinite where that is not allowed.
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The background colour is not a parseable CSS colour.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// The output would exceed `MAX_DIMENSION` or `MAX_PIXELS`.
    #[error("Surface of {width}x{height} pixels exceeds the maximum canvas size")]
    SurfaceTooLarge { width: f64, height: f64 },
}

/// Reject NaN and infinities.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, TransformError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TransformError::InvalidParameter { name, value })
    }
}

/// Reject NaN, infinities and negative values.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, TransformError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TransformError::InvalidParameter { name, value })
    }
}

/// Convert a whole-pixel output size to `u32`, rejecting sizes no surface
/// may have.
pub(crate) fn canvas_size(width: f64, height: f64) -> Result<(u32, u32), TransformError> {
    if Surface::fits(width, height) {
        Ok((width as u32, height as u32))
    } else {
        Err(TransformError::SurfaceTooLarge { width, height })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::Surface;

    /// A surface where each pixel encodes its own position:
    /// R = x, G = y, B = (y * width + x) % 256, A = 255.
    pub fn position_surface(width: u32, height: u32) -> Surface {
        let mut surface = Surface::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                surface.put_pixel(x, y, [x as u8, y as u8, v, 255]);
            }
        }
        surface
    }
}
