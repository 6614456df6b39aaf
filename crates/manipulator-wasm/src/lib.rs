//! Manipulator WASM - WebAssembly bindings for the image manipulator
//!
//! This crate exposes manipulator-core to JavaScript/TypeScript. Images are
//! loaded from `data:`, `blob:` or `http(s):` URIs (or page-relative paths),
//! transformed and returned as data URIs.
//!
//! # Module Structure
//!
//! - `manipulate` - The `manipulateAsync` entry point
//! - `types` - Conversions from JavaScript arguments to core types
//! - `logger` - `log` backend for the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { manipulateAsync } from '@image-manipulator/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const { uri, width, height } = await manipulateAsync(src, [{ flip: 'horizontal' }]);
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod manipulate;
mod types;

pub use manipulate::manipulate_async;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logger::init(level);
}

/// Name of the module as registered with the host.
#[wasm_bindgen]
pub fn name() -> String {
    "ExpoImageManipulator".to_string()
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
