//! Data URI encoding and the final manipulation result.

use std::sync::LazyLock;

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{encode_bytes, EncodeError, SaveFormat, SaveOptions};
use crate::surface::Surface;

static DATA_URI_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("valid data URI regex"));

/// What a zero-area canvas serialises to.
const EMPTY_DATA_URI: &str = "data:,";

/// The encoded output of a manipulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// `data:image/<format>;base64,<payload>`
    pub uri: String,
    /// Width of the encoded surface in pixels.
    pub width: u32,
    /// Height of the encoded surface in pixels.
    pub height: u32,
    /// `uri` with its `data:image/<format>;base64,` header removed.
    pub base64: String,
}

/// Encode `surface` into an [`ImageResult`].
///
/// Without options the output is lossless PNG with no quality parameter.
/// With options, the format defaults to PNG and the quality to 1. Asking for
/// a lossless format together with a `compress` value logs a warning and
/// still produces that format.
///
/// A surface with no pixels encodes as the bare `data:,` URI.
pub fn encode(
    surface: &Surface,
    options: Option<&SaveOptions>,
) -> Result<ImageResult, EncodeError> {
    let (format, quality) = match options {
        Some(options) => {
            let format = options.resolved_format();
            if options.compress_ignored() {
                log::warn!("compress is not supported with {format} format.");
            }
            (format, Some(options.quality()))
        }
        None => (SaveFormat::Png, None),
    };

    let uri = if surface.is_empty() {
        EMPTY_DATA_URI.to_string()
    } else {
        let bytes = encode_bytes(surface, format, quality)?;
        to_data_uri(format, &bytes)
    };

    let base64 = strip_data_uri_prefix(&uri);
    Ok(ImageResult {
        width: surface.width,
        height: surface.height,
        base64,
        uri,
    })
}

/// Wrap encoded bytes in a base64 data URI.
pub fn to_data_uri(format: SaveFormat, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Remove a leading `data:image/<format>;base64,` header, if present.
pub fn strip_data_uri_prefix(uri: &str) -> String {
    DATA_URI_PREFIX.replace(uri, "").into_owned()
}
