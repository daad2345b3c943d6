//! Mosaic WASM - WebAssembly bindings for Mosaic
//!
//! This crate exposes the mosaic-core engines to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `compositor` - Image-in-frame compositor (`JsCompositor`)
//! - `editor` - 32x32 pixel editor (`JsPixelEditor`)
//! - `catalog` - Frame format presets (`JsFormatCatalog`)
//! - `decode` / `encode` - Standalone upload decoding and bitmap encoding
//! - `types` - Shared wrapper types (bitmaps, export artifacts, client rects)
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCompositor, JsClientRect } from '@mosaic/wasm';
//!
//! await init();
//! const compositor = new JsCompositor();
//! compositor.load_image(file.type, new Uint8Array(await file.arrayBuffer()));
//! const artifact = compositor.export_png(Date.now());
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod compositor;
mod decode;
mod editor;
mod encode;
mod logger;
mod types;

pub use catalog::JsFormatCatalog;
pub use compositor::{JsCompositor, JsLoadTicket};
pub use decode::{decode_upload, is_image_mime, resize_to_fit};
pub use editor::{palette, JsPixelEditor};
pub use encode::{encode_jpeg, encode_png};
pub use logger::set_log_level;
pub use types::{JsBitmap, JsClientRect, JsExportArtifact};

/// Initialize the WASM module (called automatically on load).
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
    log::debug!("mosaic-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
