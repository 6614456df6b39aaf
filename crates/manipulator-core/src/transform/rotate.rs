//! Rotation around the image centre.
//!
//! Quarter turns are exact pixel permutations. Any other angle uses inverse
//! mapping: for each pixel in the output image we find where its centre lands
//! in the source and interpolate the four nearest source pixels.
//!
//! For a clockwise rotation by θ (y pointing down), the inverse transform is:
//! ```text
//! src_x =  (dst_x - dst_cx) * cos(θ) + (dst_y - dst_cy) * sin(θ) + src_cx
//! src_y = -(dst_x - dst_cx) * sin(θ) + (dst_y - dst_cy) * cos(θ) + src_cy
//! ```
//!
//! Output regions not covered by the source are transparent.

use image::imageops;

use super::{canvas_size, finite, TransformError};
use crate::surface::{Surface, CHANNELS};

/// Angles within this many degrees of a quarter turn are treated as exact.
const ANGLE_EPSILON: f64 = 0.001;

/// Compute the bounding box of a `width` x `height` rectangle rotated by
/// `angle_degrees`.
///
/// The result is rounded to whole pixels.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w, new_h)
}

/// Rotate `surface` clockwise by `angle_degrees`.
///
/// The output canvas is the bounding box of the rotated image, so nothing is
/// clipped.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` when the angle is NaN or
/// infinite, and `TransformError::SurfaceTooLarge` when the bounding box is
/// over the size limit.
pub fn apply_rotate(surface: &Surface, angle_degrees: f64) -> Result<Surface, TransformError> {
    let angle_degrees = finite("rotate", angle_degrees)?;

    if let Some(turns) = quarter_turns(angle_degrees) {
        return Ok(rotate_quarter_turns(surface, turns));
    }

    let (dst_w, dst_h) = compute_rotated_bounds(surface.width, surface.height, angle_degrees);
    let (dst_w, dst_h) = canvas_size(dst_w as f64, dst_h as f64)?;
    let mut output = Surface::new(dst_w, dst_h);
    if surface.is_empty() {
        return Ok(output);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = surface.width as f64 / 2.0;
    let src_cy = surface.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work with pixel centres
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let pixel = sample_bilinear(surface, src_x - 0.5, src_y - 0.5);
            let dst_idx = output.index(dst_x, dst_y);
            output.pixels[dst_idx..dst_idx + CHANNELS].copy_from_slice(&pixel);
        }
    }

    Ok(output)
}

/// Number of clockwise quarter turns (0-3) if the angle is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < ANGLE_EPSILON {
        Some(turns as u32 % 4)
    } else {
        None
    }
}

fn rotate_quarter_turns(surface: &Surface, turns: u32) -> Surface {
    if turns == 0 {
        return surface.clone();
    }
    let img = surface.to_rgba_image();
    let rotated = match turns {
        1 => imageops::rotate90(&img),
        2 => imageops::rotate180(&img),
        _ => imageops::rotate270(&img),
    };
    Surface::from_rgba_image(rotated)
}

/// Sample a pixel using bilinear interpolation in premultiplied alpha.
///
/// `(x, y)` is in pixel-index space, so integer coordinates hit pixel centres
/// exactly. Taps falling outside the source count as transparent, which
/// gives the rotated edges a one-pixel antialiased border.
fn sample_bilinear(surface: &Surface, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut premul = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (px, py, weight) in taps {
        if weight <= 0.0
            || px < 0
            || py < 0
            || px >= surface.width as i64
            || py >= surface.height as i64
        {
            continue;
        }
        let idx = surface.index(px as u32, py as u32);
        let a = surface.pixels[idx + 3] as f64 * weight;
        for (c, acc) in premul.iter_mut().enumerate() {
            *acc += surface.pixels[idx + c] as f64 * a;
        }
        alpha += a;
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    [
        (premul[0] / alpha).round().clamp(0.0, 255.0) as u8,
        (premul[1] / alpha).round().clamp(0.0, 255.0) as u8,
        (premul[2] / alpha).round().clamp(0.0, 255.0) as u8,
        alpha.round().clamp(0.0, 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::position_surface;

    #[test]
    fn test_bounds_no_rotation() {
        assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 360.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_bounds_quarter_turns_swap() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
    }

    #[test]
    fn test_bounds_45_degrees() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0);
        // 100 * sqrt(2) ≈ 141.42
        assert_eq!(w, 141);
        assert_eq!(h, 141);
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(90.0), Some(1));
        assert_eq!(quarter_turns(-90.0), Some(3));
        assert_eq!(quarter_turns(720.0), Some(0));
        assert_eq!(quarter_turns(89.9995), Some(1));
        assert_eq!(quarter_turns(359.9999), Some(0));
        assert_eq!(quarter_turns(45.0), None);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let img = position_surface(7, 3);
        assert_eq!(apply_rotate(&img, 0.0).unwrap(), img);
        assert_eq!(apply_rotate(&img, 360.0).unwrap(), img);
    }

    #[test]
    fn test_rotate_90_clockwise() {
        let img = position_surface(3, 2);
        let result = apply_rotate(&img, 90.0).unwrap();

        assert_eq!((result.width, result.height), (2, 3));
        // Bottom-left of the source becomes top-left
        assert_eq!(result.pixel(0, 0), img.pixel(0, 1));
        // Top-left of the source becomes top-right
        assert_eq!(result.pixel(1, 0), img.pixel(0, 0));
        // Top-right of the source becomes bottom-right
        assert_eq!(result.pixel(1, 2), img.pixel(2, 0));
    }

    #[test]
    fn test_rotate_negative_90_counter_clockwise() {
        let img = position_surface(3, 2);
        let result = apply_rotate(&img, -90.0).unwrap();

        assert_eq!((result.width, result.height), (2, 3));
        // Top-right of the source becomes top-left
        assert_eq!(result.pixel(0, 0), img.pixel(2, 0));
        assert_eq!(result, apply_rotate(&img, 270.0).unwrap());
    }

    #[test]
    fn test_rotate_180() {
        let img = position_surface(4, 3);
        let result = apply_rotate(&img, 180.0).unwrap();
        assert_eq!(result.pixel(0, 0), img.pixel(3, 2));
        assert_eq!(result.pixel(3, 2), img.pixel(0, 0));
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        let img = position_surface(5, 8);
        let mut result = img.clone();
        for _ in 0..4 {
            result = apply_rotate(&result, 90.0).unwrap();
        }
        assert_eq!(result, img);
    }

    #[test]
    fn test_rotate_45_expands_with_transparent_corners() {
        let img = Surface::filled(20, 20, [200, 100, 50, 255]);
        let result = apply_rotate(&img, 45.0).unwrap();

        assert_eq!((result.width, result.height), (28, 28));
        // Corners fall outside the rotated square
        assert_eq!(result.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(result.pixel(27, 27), Some([0, 0, 0, 0]));
        // Centre is fully inside
        assert_eq!(result.pixel(14, 14), Some([200, 100, 50, 255]));
    }

    #[test]
    fn test_rotate_arbitrary_preserves_uniform_color() {
        let img = Surface::filled(30, 10, [10, 20, 30, 255]);
        let result = apply_rotate(&img, 17.0).unwrap();

        // Every covered pixel keeps the colour, whatever its coverage
        for px in result.pixels.chunks(4) {
            if px[3] > 0 {
                assert_eq!(&px[..3], &[10, 20, 30]);
            }
        }
    }

    #[test]
    fn test_rotate_empty_surface() {
        let img = Surface::new(0, 5);
        let result = apply_rotate(&img, 90.0).unwrap();
        assert_eq!((result.width, result.height), (5, 0));

        let result = apply_rotate(&img, 30.0).unwrap();
        assert!(result.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rotate_rejects_non_finite() {
        let img = position_surface(2, 2);
        assert!(apply_rotate(&img, f64::NAN).is_err());
        assert!(apply_rotate(&img, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rotate_bounding_box_over_limit() {
        // A thin strip whose 45° bounding box is about 21213 x 21213
        let strip = Surface::new(30_000, 1);
        assert!(matches!(
            apply_rotate(&strip, 45.0),
            Err(TransformError::SurfaceTooLarge { .. })
        ));
        // Quarter turns never grow the area
        let rotated = apply_rotate(&strip, 90.0).unwrap();
        assert_eq!((rotated.width, rotated.height), (1, 30_000));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::transform::test_support::position_surface;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output buffer always matches the rotated bounds.
        #[test]
        fn prop_output_matches_bounds(
            (width, height) in (1u32..=40, 1u32..=40),
            angle in -720.0f64..720.0,
        ) {
            let img = position_surface(width, height);
            let result = apply_rotate(&img, angle).unwrap();

            prop_assert_eq!(
                (result.width, result.height),
                compute_rotated_bounds(width, height, angle)
            );
            let expected_len = result.width as usize * result.height as usize * 4;
            prop_assert_eq!(result.pixels.len(), expected_len);
        }

        /// Property: Rotation and its inverse restore quarter-turn images exactly.
        #[test]
        fn prop_quarter_turn_inverse(
            (width, height) in (1u32..=30, 1u32..=30),
            turns in 0i32..4,
        ) {
            let img = position_surface(width, height);
            let angle = turns as f64 * 90.0;
            let there = apply_rotate(&img, angle).unwrap();
            let back = apply_rotate(&there, -angle).unwrap();
            prop_assert_eq!(back, img);
        }

        /// Property: Rotation is deterministic.
        #[test]
        fn prop_rotation_is_deterministic(
            (width, height) in (1u32..=30, 1u32..=30),
            angle in -180.0f64..180.0,
        ) {
            let img = position_surface(width, height);
            prop_assert_eq!(apply_rotate(&img, angle).unwrap(), apply_rotate(&img, angle).unwrap());
        }
    }
}
