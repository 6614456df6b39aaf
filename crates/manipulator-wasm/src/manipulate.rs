//! The `manipulateAsync` binding.
//!
//! # Example
//!
//! ```typescript
//! import init, { manipulateAsync } from '@image-manipulator/wasm';
//!
//! await init();
//!
//! const result = await manipulateAsync(
//!   'https://example.com/photo.jpg',
//!   [{ crop: { originX: 0, originY: 0, width: 200, height: 200 } }, { rotate: 90 }],
//!   { format: 'jpeg', compress: 0.8 },
//! );
//! img.src = result.uri;
//! ```

use manipulator_core::load::has_scheme;
use manipulator_core::{manipulate, SaveOptions};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::types::actions_from_values;

/// Load an image, apply actions in order and encode the result.
///
/// # Arguments
///
/// * `uri` - `data:`, `blob:` or `http(s):` URI, or a path relative to the page
/// * `actions` - Array of single-key action objects (`undefined` = none)
/// * `options` - `{ format?, compress?, base64? }` (`undefined` = lossless PNG)
///
/// # Returns
///
/// A Promise resolving to `{ uri, width, height, base64 }`. It rejects with an
/// `Error` if loading, a transform or encoding fails.
#[wasm_bindgen(js_name = manipulateAsync)]
pub async fn manipulate_async(
    uri: String,
    actions: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let actions: Option<Vec<Value>> = serde_wasm_bindgen::from_value(actions)
        .map_err(|e| js_error(&format!("Invalid actions: {e}")))?;
    let actions = actions_from_values(actions).map_err(|e| js_error(&e.to_string()))?;

    let options: Option<SaveOptions> = serde_wasm_bindgen::from_value(options)
        .map_err(|e| js_error(&format!("Invalid save options: {e}")))?;

    let uri = resolve_against_page(&uri)?;
    let result = manipulate(&uri, &actions, options.as_ref())
        .await
        .map_err(|e| js_error(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&result).map_err(|e| js_error(&e.to_string()))
}

/// Resolve a relative URI against `window.location`.
///
/// Outside a window (workers, tests) relative URIs are passed through as-is.
fn resolve_against_page(uri: &str) -> Result<String, JsValue> {
    if has_scheme(uri) {
        return Ok(uri.to_string());
    }
    let Some(window) = web_sys::window() else {
        return Ok(uri.to_string());
    };

    let base = window.location().href()?;
    let url = web_sys::Url::new_with_base(uri, &base)?;
    log::debug!("Resolved {uri} to {}", url.href());
    Ok(url.href())
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
