//! Image decoding WASM bindings.
//!
//! The engines decode uploads themselves; these standalone functions let
//! the host preview or inspect a file before handing it over.
//!
//! # Example
//!
//! ```typescript
//! import { is_image_mime, decode_upload } from '@mosaic/wasm';
//!
//! if (is_image_mime(file.type)) {
//!   const bitmap = decode_upload(file.type, new Uint8Array(await file.arrayBuffer()));
//!   console.log(`Decoded ${bitmap.width}x${bitmap.height}`);
//! }
//! ```

use crate::types::{filter_from_u8, js_error, JsBitmap};
use mosaic_core::decode;
use wasm_bindgen::prelude::*;

/// Whether a browser-reported MIME type is accepted as an upload.
#[wasm_bindgen]
pub fn is_image_mime(mime: &str) -> bool {
    decode::is_image_mime(mime)
}

/// Validate the MIME type, decode, apply EXIF orientation and cap the size.
#[wasm_bindgen]
pub fn decode_upload(mime: &str, bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_upload(mime, bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Resize a bitmap to fit within `max_edge`, preserving aspect ratio.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize_to_fit(image: &JsBitmap, max_edge: u32, filter: u8) -> Result<JsBitmap, JsValue> {
    decode::resize_to_fit(image.bitmap(), max_edge, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}
