//! Surface-to-bytes encoding using the `image` crate's encoders.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use super::{SaveFormat, DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
use crate::surface::Surface;

/// Errors that can occur while encoding a surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: SaveFormat, message: String },
}

/// Encode `surface` in `format`.
///
/// `quality` is a fraction in [0, 1] for the lossy formats. JPEG maps it to
/// the encoder's 1-100 scale and, having no alpha channel, composites pixels
/// over black first. WebP maps it to libwebp's 0-100 scale and keeps alpha;
/// wasm32 builds have no libwebp and write WebP losslessly.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty surface and
/// `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_bytes(
    surface: &Surface,
    format: SaveFormat,
    quality: Option<f64>,
) -> Result<Vec<u8>, EncodeError> {
    if surface.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: surface.width,
            height: surface.height,
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let (width, height) = (surface.width, surface.height);

    let result = match format {
        SaveFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &surface.pixels,
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        SaveFormat::Jpeg => {
            let quality = jpeg_quality(quality.unwrap_or(DEFAULT_JPEG_QUALITY));
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                &flatten_over_black(&surface.pixels),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        SaveFormat::Webp => {
            return encode_webp(surface, quality.unwrap_or(DEFAULT_WEBP_QUALITY));
        }
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_webp(surface: &Surface, quality: f64) -> Result<Vec<u8>, EncodeError> {
    let quality = (quality * 100.0).clamp(0.0, 100.0) as f32;
    webp::Encoder::from_rgba(&surface.pixels, surface.width, surface.height)
        .encode_simple(false, quality)
        .map(|memory| memory.to_vec())
        .map_err(|e| EncodeError::EncodingFailed {
            format: SaveFormat::Webp,
            message: format!("{e:?}"),
        })
}

#[cfg(target_arch = "wasm32")]
fn encode_webp(surface: &Surface, _quality: f64) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;

    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: SaveFormat::Webp,
            message: e.to_string(),
        })?;
    Ok(buffer.into_inner())
}

/// Map a [0, 1] quality fraction onto the JPEG encoder's 1-100 scale.
fn jpeg_quality(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Drop alpha by compositing RGBA over opaque black.
fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            rgb.push(((channel as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
