//! Extent: place the image on a new canvas, padding with a background colour.
//!
//! The output pixel at (x, y) shows the source pixel at
//! (x + originX, y + originY), composited over the background. Where that
//! source position is outside the image only the background remains.

use super::{canvas_size, finite, non_negative, TransformError};
use crate::action::ExtentParams;
use crate::surface::{Surface, CHANNELS};

/// Apply an extent operation.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for negative or non-finite
/// target dimensions or non-finite origins, `TransformError::SurfaceTooLarge`
/// when the target canvas is over the size limit, and
/// `TransformError::InvalidColor` when `background_color` is not a CSS colour.
pub fn apply_extent(surface: &Surface, params: &ExtentParams) -> Result<Surface, TransformError> {
    let (width, height) = canvas_size(
        non_negative("extent.width", params.width)?.trunc(),
        non_negative("extent.height", params.height)?.trunc(),
    )?;

    // Any origin past the combined extents shows only background, so clamping
    // keeps the offsets well inside i64 without changing the output.
    let reach_x = width as f64 + surface.width as f64;
    let reach_y = height as f64 + surface.height as f64;
    let origin_x = finite("extent.originX", params.origin_x)?
        .round()
        .clamp(-reach_x, reach_x) as i64;
    let origin_y = finite("extent.originY", params.origin_y)?
        .round()
        .clamp(-reach_y, reach_y) as i64;

    let background = match params.background_color.as_deref() {
        Some(color) => parse_color(color)?,
        None => [0, 0, 0, 0],
    };

    let mut output = Surface::filled(width, height, background);

    // Destination columns whose source column lies inside the image
    let x_start = (-origin_x).clamp(0, width as i64);
    let x_end = (surface.width as i64 - origin_x).clamp(x_start, width as i64);

    for y in 0..height {
        let src_y = y as i64 + origin_y;
        if src_y < 0 || src_y >= surface.height as i64 {
            continue;
        }
        for x in x_start..x_end {
            let src_idx = surface.index((x + origin_x) as u32, src_y as u32);
            let dst_idx = output.index(x as u32, y);

            let src = &surface.pixels[src_idx..src_idx + CHANNELS];
            let dst = &mut output.pixels[dst_idx..dst_idx + CHANNELS];
            source_over([src[0], src[1], src[2], src[3]], dst);
        }
    }

    Ok(output)
}

/// Parse a CSS colour string into straight RGBA8.
fn parse_color(color: &str) -> Result<[u8; 4], TransformError> {
    csscolorparser::parse(color)
        .map(|c| c.to_rgba8())
        .map_err(|e| TransformError::InvalidColor(format!("{}: {}", color, e)))
}

/// Porter-Duff source-over in straight alpha, written into `dst`.
fn source_over(src: [u8; 4], dst: &mut [u8]) {
    let sa = src[3] as f64 / 255.0;
    if sa >= 1.0 {
        dst.copy_from_slice(&src);
        return;
    }
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.copy_from_slice(&[0, 0, 0, 0]);
        return;
    }
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}
