//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{LoadError, Orientation};
use crate::surface::Surface;

/// Decode encoded image bytes into an RGBA surface.
///
/// The format is detected from the content rather than from a file name or
/// MIME type. EXIF orientation is applied, so the surface has the image's
/// natural display size.
///
/// # Errors
///
/// Returns `LoadError::UnsupportedFormat` if the bytes are not a recognised
/// image format and `LoadError::Decode` if the image is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<Surface, LoadError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(LoadError::UnsupportedFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| LoadError::Decode(e.to_string()))?;

    Ok(Surface::from_rgba_image(orientation.apply(img).into_rgba8()))
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}
