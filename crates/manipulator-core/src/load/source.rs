//! Resolve an image URI to its encoded bytes.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;

use super::LoadError;

/// A URI scheme. Single-letter schemes are left out so Windows drive paths
/// (`C:\...`) are treated as files.
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]+):").expect("valid scheme regex"));

/// Whether `uri` starts with a URI scheme (`data:`, `https:`, `blob:`...).
///
/// URIs without one are paths. A single letter before the colon is read as a
/// Windows drive, not a scheme.
pub fn has_scheme(uri: &str) -> bool {
    SCHEME.is_match(uri.trim())
}

/// Where the bytes of an image come from.
#[derive(Debug, PartialEq, Eq)]
enum Source<'a> {
    Data(&'a str),
    Remote(&'a str),
    File(PathBuf),
}

fn classify(uri: &str) -> Result<Source<'_>, LoadError> {
    let uri = uri.trim();
    let Some(captures) = SCHEME.captures(uri) else {
        return Ok(Source::File(PathBuf::from(uri)));
    };

    let scheme = captures[1].to_ascii_lowercase();
    match scheme.as_str() {
        "data" => Ok(Source::Data(uri)),
        "http" | "https" => Ok(Source::Remote(uri)),
        // Object URLs only resolve inside the page that created them
        "blob" if cfg!(target_arch = "wasm32") => Ok(Source::Remote(uri)),
        "file" => {
            let path = &uri["file:".len()..];
            Ok(Source::File(PathBuf::from(
                path.strip_prefix("//").unwrap_or(path),
            )))
        }
        _ => Err(LoadError::UnsupportedSource(format!("{scheme}: URIs"))),
    }
}

/// Read the encoded bytes behind `uri`.
///
/// Supports `data:` URIs, `http(s)://` URLs, `file://` URLs and bare paths.
pub async fn read_source(uri: &str) -> Result<Vec<u8>, LoadError> {
    match classify(uri)? {
        Source::Data(data) => {
            log::debug!("Resolving data URI ({} chars)", data.len());
            decode_data_uri(data)
        }
        Source::Remote(url) => {
            log::debug!("Fetching image: {url}");
            fetch_remote(url).await
        }
        Source::File(path) => {
            log::debug!("Reading image file: {}", path.display());
            read_file(&path)
        }
    }
}

/// Decode the payload of a `data:[<mediatype>][;base64],<data>` URI.
///
/// Without the `;base64` marker the payload is taken as literal bytes.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = &uri["data:".len()..];
    let comma = rest
        .find(',')
        .ok_or_else(|| LoadError::InvalidDataUri("missing ',' separator".to_string()))?;
    let (header, payload) = (&rest[..comma], &rest[comma + 1..]);

    if header.to_ascii_lowercase().ends_with(";base64") {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| LoadError::InvalidDataUri(e.to_string()))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

async fn fetch_remote(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Failed to load image from url {url} with status code {status}");
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    Ok(bytes.to_vec())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(target_arch = "wasm32")]
fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    Err(LoadError::UnsupportedSource(format!(
        "local file paths are not readable in the browser ({})",
        path.display()
    )))
}
