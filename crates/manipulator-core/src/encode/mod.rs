//! Result encoding for the manipulation pipeline.
//!
//! This module provides functionality for:
//! - Resolving [`SaveOptions`] into a format and quality
//! - Encoding a surface to PNG, JPEG or WebP bytes
//! - Wrapping those bytes in a `data:` URI and building the [`ImageResult`]
//!
//! # Examples
//!
//! ```ignore
//! use manipulator_core::encode::{encode, SaveFormat, SaveOptions};
//!
//! let options = SaveOptions {
//!     format: Some(SaveFormat::Jpeg),
//!     compress: Some(0.8),
//!     ..Default::default()
//! };
//! let result = encode(&surface, Some(&options))?;
//! println!("{}x{} -> {} base64 chars", result.width, result.height, result.base64.len());
//! ```

mod codec;
mod data_uri;
mod options;

pub use codec::{encode_bytes, EncodeError};
pub use data_uri::{encode, strip_data_uri_prefix, to_data_uri, ImageResult};
pub use options::{SaveFormat, SaveOptions, DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
