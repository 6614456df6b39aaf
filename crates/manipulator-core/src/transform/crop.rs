//! Crop to a sub-rectangle given in source pixels.
//!
//! # Behavior
//!
//! - Each of origin/width/height is first clamped into `[0, dimension]`
//! - The region is then shortened so it ends at the surface edge
//! - Fractional values are truncated to whole pixels
//! - A region with zero width or height yields an empty surface

use crate::action::CropParams;
use crate::surface::{Surface, CHANNELS};

/// Crop `surface` to the region described by `params`.
///
/// # Example
///
/// ```ignore
/// let params = CropParams { origin_x: 10.0, origin_y: 10.0, width: 50.0, height: 50.0 };
/// let cropped = apply_crop(&surface, &params);
/// ```
pub fn apply_crop(surface: &Surface, params: &CropParams) -> Surface {
    let src_w = surface.width as f64;
    let src_h = surface.height as f64;

    let origin_x = clamp_to(params.origin_x, src_w);
    let origin_y = clamp_to(params.origin_y, src_h);
    let width = clamp_to(params.width, src_w);
    let height = clamp_to(params.height, src_h);

    // Lock the far edge inside the surface
    let width = (origin_x + width).min(src_w) - origin_x;
    let height = (origin_y + height).min(src_h) - origin_y;

    let px_left = origin_x as u32;
    let px_top = origin_y as u32;
    let out_width = width as u32;
    let out_height = height as u32;

    // Fast path: full crop returns a clone
    if px_left == 0 && px_top == 0 && out_width == surface.width && out_height == surface.height
    {
        return surface.clone();
    }

    let mut output = Surface::new(out_width, out_height);
    let row_bytes = out_width as usize * CHANNELS;

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_start = surface.index(px_left, px_top + y);
        let dst_start = output.index(0, y);
        output.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&surface.pixels[src_start..src_start + row_bytes]);
    }

    output
}

/// Clamp into `[0, max]`, treating NaN as 0.
fn clamp_to(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
