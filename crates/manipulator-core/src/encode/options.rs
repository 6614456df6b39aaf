//! Output options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// JPEG quality when none is resolved from options.
pub const DEFAULT_JPEG_QUALITY: f64 = 0.92;

/// WebP quality when none is resolved from options.
pub const DEFAULT_WEBP_QUALITY: f64 = 0.8;

/// Whether this build encodes WebP with libwebp's lossy encoder. Without it
/// WebP falls back to the `image` crate's lossless encoder.
pub(crate) const LOSSY_WEBP: bool = cfg!(not(target_arch = "wasm32"));

/// Output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// Lossless; quality does not apply.
    #[default]
    Png,
    /// Lossy with quality.
    #[serde(alias = "jpg")]
    Jpeg,
    /// Lossy with quality (lossless in wasm32 builds).
    Webp,
}

impl SaveFormat {
    /// MIME subtype used in the data URI (`image/<subtype>`).
    pub fn subtype(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpeg",
            SaveFormat::Webp => "webp",
        }
    }

    /// Full MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            SaveFormat::Png => "image/png",
            SaveFormat::Jpeg => "image/jpeg",
            SaveFormat::Webp => "image/webp",
        }
    }

    /// True for formats where `compress` has no effect in this build.
    pub fn is_lossless(self) -> bool {
        match self {
            SaveFormat::Png => true,
            SaveFormat::Jpeg => false,
            SaveFormat::Webp => !LOSSY_WEBP,
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subtype())
    }
}

/// Options controlling how the final surface is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOptions {
    /// Output format, PNG when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SaveFormat>,
    /// Quality fraction for lossy formats, 1 when omitted. Clamped to [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<f64>,
    /// Accepted for API compatibility; results always include base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<bool>,
}

impl SaveOptions {
    /// The format to encode with.
    pub fn resolved_format(&self) -> SaveFormat {
        self.format.unwrap_or_default()
    }

    /// `compress` clamped into [0, 1], defaulting to 1.
    ///
    /// NaN is treated as absent.
    pub fn quality(&self) -> f64 {
        match self.compress {
            Some(q) if !q.is_nan() => q.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// True when a lossless format was requested explicitly together with a
    /// `compress` value, which then has no effect.
    pub fn compress_ignored(&self) -> bool {
        self.compress.is_some() && self.format.is_some_and(SaveFormat::is_lossless)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_compress(compress: f64) -> SaveOptions {
        SaveOptions {
            compress: Some(compress),
            ..Default::default()
        }
    }

    #[test]
    fn test_quality_clamping() {
        let cases = [(-1.0, 0.0), (0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (2.0, 1.0)];
        for (compress, expected) in cases {
            assert_eq!(with_compress(compress).quality(), expected, "compress = {compress}");
        }
    }

    #[test]
    fn test_quality_defaults() {
        assert_eq!(SaveOptions::default().quality(), 1.0);
        assert_eq!(with_compress(f64::NAN).quality(), 1.0);
        assert_eq!(with_compress(f64::NEG_INFINITY).quality(), 0.0);
    }

    #[test]
    fn test_format_defaults_to_png() {
        assert_eq!(SaveOptions::default().resolved_format(), SaveFormat::Png);
        assert!(SaveFormat::Png.is_lossless());
        assert!(!SaveFormat::Jpeg.is_lossless());
        assert_eq!(SaveFormat::Webp.is_lossless(), !LOSSY_WEBP);
    }

    #[test]
    fn test_compress_ignored() {
        let png = SaveOptions {
            format: Some(SaveFormat::Png),
            compress: Some(0.5),
            ..Default::default()
        };
        assert!(png.compress_ignored());

        let jpeg = SaveOptions {
            format: Some(SaveFormat::Jpeg),
            compress: Some(0.5),
            ..Default::default()
        };
        assert!(!jpeg.compress_ignored());

        let webp = SaveOptions {
            format: Some(SaveFormat::Webp),
            compress: Some(0.5),
            ..Default::default()
        };
        assert_eq!(webp.compress_ignored(), !LOSSY_WEBP);

        // Only an explicit lossless request triggers the diagnostic
        assert!(!with_compress(0.5).compress_ignored());
    }

    #[test]
    fn test_deserialize_options() {
        let options: SaveOptions =
            serde_json::from_str(r#"{"format": "jpeg", "compress": 0.7, "base64": true}"#).unwrap();
        assert_eq!(options.format, Some(SaveFormat::Jpeg));
        assert_eq!(options.compress, Some(0.7));
        assert_eq!(options.base64, Some(true));

        let options: SaveOptions = serde_json::from_str(r#"{"format": "jpg"}"#).unwrap();
        assert_eq!(options.format, Some(SaveFormat::Jpeg));

        let options: SaveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SaveOptions::default());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<SaveOptions, _> = serde_json::from_str(r#"{"format": "gif"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(SaveFormat::Png.mime_type(), "image/png");
        assert_eq!(SaveFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(SaveFormat::Webp.to_string(), "webp");
    }
}
