//! Image loading for the manipulation pipeline.
//!
//! This module provides functionality for:
//! - Resolving a source URI to encoded bytes (`data:` URIs, HTTP(S) URLs,
//!   local files)
//! - Decoding those bytes into an RGBA [`Surface`](crate::Surface), applying
//!   EXIF orientation the way a browser does for `<img>` elements
//!
//! # Architecture
//!
//! Loading is the only asynchronous step of a manipulation. It is a single
//! attempt with no retry and no timeout: a stalled remote fetch stalls the
//! caller. Remote fetches go through `reqwest`, which uses the browser's
//! `fetch` on `wasm32` and requires a Tokio runtime elsewhere.
//!
//! # Examples
//!
//! ```ignore
//! use manipulator_core::load::load_image;
//!
//! let surface = load_image("https://example.com/photo.jpg").await?;
//! println!("Loaded {}x{} image", surface.width, surface.height);
//! ```

mod decode;
mod source;
mod types;

pub use decode::decode_image;
pub use source::{has_scheme, read_source};
pub use types::LoadError;

use types::Orientation;

use crate::surface::Surface;

/// Load the image at `uri` into a surface of its natural (oriented) size.
///
/// # Errors
///
/// Returns a [`LoadError`] when the source cannot be read or fetched, or when
/// its bytes are not a decodable image. No partial surface is produced.
pub async fn load_image(uri: &str) -> Result<Surface, LoadError> {
    let bytes = read_source(uri).await?;
    let surface = decode_image(&bytes)?;
    log::debug!(
        "Loaded {}x{} image ({} bytes)",
        surface.width,
        surface.height,
        bytes.len()
    );
    Ok(surface)
}
