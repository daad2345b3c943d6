//! Compositor WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const compositor = new JsCompositor();
//! compositor.set_frame('landscape', 'a4');
//!
//! const ticket = compositor.begin_load(file.type);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! compositor.complete_load(ticket, bytes); // false if a newer upload won
//!
//! canvas.onwheel = (e) => {
//!   if (compositor.scale_by_wheel(e.deltaY, e.clientX, e.clientY, rectOf(canvas))) {
//!     e.preventDefault();
//!   }
//! };
//!
//! const frame = compositor.render();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.pixels()), frame.width), 0, 0);
//! ```

use crate::catalog::{parse_orientation, JsFormatCatalog};
use crate::types::{js_error, notifications_to_js, timestamp_from_js, JsBitmap, JsClientRect, JsExportArtifact};
use mosaic_core::compositor::{Compositor, InterpolationFilter, LoadOutcome, LoadTicket};
use mosaic_core::encode::ExportEncoding;
use mosaic_core::format::FormatCatalog;
use wasm_bindgen::prelude::*;

/// Handle for one in-flight upload; pass it back to `complete_load`.
#[wasm_bindgen]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

#[wasm_bindgen]
impl JsLoadTicket {
    #[wasm_bindgen(getter)]
    pub fn seq(&self) -> f64 {
        self.inner.seq() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().to_string()
    }
}

#[wasm_bindgen]
pub struct JsCompositor {
    inner: Compositor,
}

impl Default for JsCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsCompositor {
    /// A compositor over the built-in format catalog.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCompositor {
        Self {
            inner: Compositor::new(FormatCatalog::builtin()),
        }
    }

    pub fn with_catalog(catalog: &JsFormatCatalog) -> JsCompositor {
        Self {
            inner: Compositor::new(catalog.catalog().clone()),
        }
    }

    // ----- state -----

    #[wasm_bindgen(getter)]
    pub fn frame_width(&self) -> u32 {
        self.inner.frame().width
    }

    #[wasm_bindgen(getter)]
    pub fn frame_height(&self) -> u32 {
        self.inner.frame().height
    }

    #[wasm_bindgen(getter)]
    pub fn frame_orientation(&self) -> String {
        self.inner.frame().orientation.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn frame_key(&self) -> String {
        self.inner.frame().key.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn scale_percent(&self) -> f64 {
        self.inner.transform().scale_percent
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.inner.transform().rotation.degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// `{ scalePercent, offset: { x, y }, rotation, flipHorizontal, flipVertical }`
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.transform()).map_err(js_error)
    }

    /// `nearest` or `bilinear`.
    pub fn set_interpolation(&mut self, filter: &str) -> Result<(), JsValue> {
        let filter = match filter.trim().to_ascii_lowercase().as_str() {
            "nearest" => InterpolationFilter::Nearest,
            "bilinear" => InterpolationFilter::Bilinear,
            other => return Err(js_error(format!("Unknown interpolation filter: {other}"))),
        };
        self.inner.set_interpolation(filter);
        Ok(())
    }

    // ----- loading -----

    /// Accept an upload by MIME type; call before reading the file.
    pub fn begin_load(&mut self, mime: &str) -> Result<JsLoadTicket, JsValue> {
        self.inner
            .begin_load(mime)
            .map(|inner| JsLoadTicket { inner })
            .map_err(js_error)
    }

    /// Decode and install the file. Returns `false` when a newer upload was
    /// already applied and this one was dropped.
    pub fn complete_load(&mut self, ticket: JsLoadTicket, bytes: &[u8]) -> Result<bool, JsValue> {
        self.inner
            .complete_load(ticket.inner, bytes)
            .map(|outcome| outcome == LoadOutcome::Applied)
            .map_err(js_error)
    }

    /// `begin_load` + `complete_load` for bytes already in hand.
    pub fn load_image(&mut self, mime: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_image(mime, bytes).map_err(js_error)
    }

    // ----- frame & transform -----

    pub fn set_frame(&mut self, orientation: &str, key: &str) -> Result<(), JsValue> {
        let orientation = parse_orientation(orientation)?;
        self.inner.set_frame(orientation, key).map_err(js_error)
    }

    pub fn center_and_fit(&mut self) {
        self.inner.center_and_fit();
    }

    pub fn set_scale(&mut self, percent: f64) -> bool {
        self.inner.set_scale(percent)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        self.inner.translate(dx, dy)
    }

    /// Returns `true` when the event was consumed; call `preventDefault()`.
    pub fn scale_by_wheel(
        &mut self,
        delta_y: f64,
        client_x: f64,
        client_y: f64,
        canvas: &JsClientRect,
    ) -> bool {
        self.inner
            .scale_by_wheel(delta_y, client_x, client_y, canvas.rect())
    }

    pub fn rotate_90(&mut self) -> bool {
        self.inner.rotate_90()
    }

    pub fn flip_horizontal(&mut self) -> bool {
        self.inner.flip_horizontal()
    }

    pub fn flip_vertical(&mut self) -> bool {
        self.inner.flip_vertical()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    // ----- pointer -----

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, canvas: &JsClientRect) {
        self.inner.pointer_down(client_x, client_y, canvas.rect());
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, canvas: &JsClientRect) -> bool {
        self.inner.pointer_move(client_x, client_y, canvas.rect())
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    // ----- output -----

    pub fn render(&self) -> JsBitmap {
        JsBitmap::from_bitmap(self.inner.render())
    }

    /// The pure placement description behind `render()`.
    pub fn render_plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.render_plan()).map_err(js_error)
    }

    /// `timestamp_ms` is usually `Date.now()`.
    pub fn export_png(&mut self, timestamp_ms: f64) -> Result<JsExportArtifact, JsValue> {
        self.inner
            .export(ExportEncoding::Png, timestamp_from_js(timestamp_ms))
            .map(JsExportArtifact::from)
            .map_err(js_error)
    }

    pub fn export_jpeg(&mut self, timestamp_ms: f64, quality: u8) -> Result<JsExportArtifact, JsValue> {
        self.inner
            .export(ExportEncoding::Jpeg { quality }, timestamp_from_js(timestamp_ms))
            .map(JsExportArtifact::from)
            .map_err(js_error)
    }

    /// Notifications queued since the last call, oldest first.
    pub fn drain_notifications(&mut self) -> Result<JsValue, JsValue> {
        notifications_to_js(&self.inner.drain_notifications())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_export_without_image_errors_and_notifies() {
        let mut c = JsCompositor::new();
        assert!(c.export_png(1.0).is_err());
        let notes = js_sys::Array::from(&c.drain_notifications().unwrap());
        assert_eq!(notes.length(), 1);
    }

    #[wasm_bindgen_test]
    fn test_begin_load_rejects_non_image() {
        let mut c = JsCompositor::new();
        assert!(c.begin_load("text/plain").is_err());
        assert!(!c.has_image());
    }

    #[wasm_bindgen_test]
    fn test_set_frame_unknown() {
        let mut c = JsCompositor::new();
        assert!(c.set_frame("portrait", "nope").is_err());
        assert!(c.set_frame("diagonal", "a4").is_err());
    }

    #[wasm_bindgen_test]
    fn test_transform_serializes() {
        let c = JsCompositor::new();
        let value = c.transform().unwrap();
        let scale = js_sys::Reflect::get(&value, &JsValue::from_str("scalePercent")).unwrap();
        assert_eq!(scale.as_f64(), Some(100.0));
    }
}
