//! WASM-compatible wrapper types shared by the engine bindings.
//!
//! Conversions between core types and their JavaScript-facing counterparts
//! live here so every binding module maps errors and data the same way.

use std::fmt::Display;

use mosaic_core::decode::{Bitmap, FilterType};
use mosaic_core::export::ExportArtifact;
use mosaic_core::gesture::ClientRect;
use mosaic_core::notify::Notification;
use wasm_bindgen::prelude::*;

/// Convert any displayable error into a JavaScript error string.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize drained notifications as an array of
/// `{ title, description?, severity }` objects.
pub(crate) fn notifications_to_js(notes: &[Notification]) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(notes).map_err(js_error)
}

/// An RGBA bitmap living in WASM memory.
///
/// `pixels()` copies the buffer into a `Uint8Array`, laid out exactly like
/// `ImageData.data`, so it can be handed to `new ImageData(...)` directly.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from RGBA bytes (4 per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(js_error(format!(
                "Invalid pixel data: expected {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            inner: Bitmap::new(width, height, pixels),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as a Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// A finished export: suggested file name, MIME type and encoded bytes.
#[wasm_bindgen]
pub struct JsExportArtifact {
    inner: ExportArtifact,
}

#[wasm_bindgen]
impl JsExportArtifact {
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Encoded file contents as a Uint8Array (copied), ready for a `Blob`.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<ExportArtifact> for JsExportArtifact {
    fn from(inner: ExportArtifact) -> Self {
        Self { inner }
    }
}

/// The canvas element's `getBoundingClientRect()`.
///
/// Pointer events arrive in client coordinates; the engines use this rect to
/// map them onto the canvas backing store.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsClientRect {
    inner: ClientRect,
}

#[wasm_bindgen]
impl JsClientRect {
    #[wasm_bindgen(constructor)]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> JsClientRect {
        Self {
            inner: ClientRect::new(left, top, width, height),
        }
    }

    pub fn contains(&self, client_x: f64, client_y: f64) -> bool {
        self.inner.contains(client_x, client_y)
    }
}

impl JsClientRect {
    pub(crate) fn rect(&self) -> &ClientRect {
        &self.inner
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3; anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Milliseconds from `Date.now()` as an integer timestamp.
pub(crate) fn timestamp_from_js(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        ms as u64
    } else {
        0
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_bitmap_rejects_wrong_length() {
        assert!(JsBitmap::new(2, 2, vec![0u8; 15]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_notifications_serialize_to_array() {
        let notes = vec![Notification::success("Image saved")];
        let value = notifications_to_js(&notes).unwrap();
        assert!(js_sys::Array::is_array(&value));
        assert_eq!(js_sys::Array::from(&value).length(), 1);
    }
}
