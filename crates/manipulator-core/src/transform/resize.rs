//! Resize the surface, filling in an omitted side from the aspect ratio.
//!
//! Resampling uses the `image` crate's triangle (bilinear) filter.

use image::imageops::{self, FilterType};

use super::{canvas_size, non_negative, TransformError};
use crate::action::ResizeParams;
use crate::surface::Surface;

/// Resize `surface` according to `params`.
///
/// # Behavior
///
/// - Only `width` given: height follows the aspect ratio
/// - Only `height` given: width follows the aspect ratio
/// - Both given: exact size, aspect ratio is not preserved
/// - Neither given, or a side rounding to zero: an empty surface
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for negative or non-finite sizes
/// and `TransformError::SurfaceTooLarge` when the result is over the size limit.
pub fn apply_resize(surface: &Surface, params: &ResizeParams) -> Result<Surface, TransformError> {
    let (width, height) = resize_dimensions(surface.width, surface.height, params)?;

    // Fast path: if dimensions match, just clone
    if width == surface.width && height == surface.height {
        return Ok(surface.clone());
    }

    if width == 0 || height == 0 || surface.is_empty() {
        return Ok(Surface::new(width, height));
    }

    let resized = imageops::resize(&surface.to_rgba_image(), width, height, FilterType::Triangle);
    Ok(Surface::from_rgba_image(resized))
}

/// Compute the output size for a resize of a `width` x `height` surface.
pub fn resize_dimensions(
    width: u32,
    height: u32,
    params: &ResizeParams,
) -> Result<(u32, u32), TransformError> {
    let ratio = width as f64 / height as f64;

    let mut target_w = 0.0;
    let mut target_h = 0.0;

    if let Some(w) = params.width {
        target_w = non_negative("resize.width", w)?;
        target_h = target_w / ratio;
    }
    if let Some(h) = params.height {
        target_h = non_negative("resize.height", h)?;
        if params.width.is_none() {
            target_w = target_h * ratio;
        }
    }

    canvas_size(to_pixels(target_w), to_pixels(target_h))
}

/// Round to whole pixels. NaN and infinity (from an empty source) become 0.
fn to_pixels(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.round()
    } else {
        0.0
    }
}
