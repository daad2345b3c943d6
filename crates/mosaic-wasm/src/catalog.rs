//! Format catalog WASM bindings.
//!
//! The host may supply its own frame presets as plain JS objects:
//!
//! ```typescript
//! const catalog = new JsFormatCatalog([
//!   { orientation: 'portrait', key: 'a4', label: 'A4', width: 794, height: 1123 },
//! ]);
//! const compositor = JsCompositor.with_catalog(catalog);
//! ```

use crate::types::js_error;
use mosaic_core::format::{FormatCatalog, FormatPreset, FrameOrientation};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// A preset as supplied from JavaScript. `label` falls back to `key`.
#[derive(Deserialize)]
struct JsPreset {
    orientation: FrameOrientation,
    key: String,
    #[serde(default)]
    label: Option<String>,
    width: u32,
    height: u32,
}

impl From<JsPreset> for FormatPreset {
    fn from(p: JsPreset) -> Self {
        let label = p.label.unwrap_or_else(|| p.key.clone());
        FormatPreset::new(p.orientation, p.key, label, p.width, p.height)
    }
}

#[wasm_bindgen]
pub struct JsFormatCatalog {
    inner: FormatCatalog,
}

#[wasm_bindgen]
impl JsFormatCatalog {
    /// Build a validated catalog from an array of preset objects.
    #[wasm_bindgen(constructor)]
    pub fn new(presets: JsValue) -> Result<JsFormatCatalog, JsValue> {
        let presets: Vec<JsPreset> = serde_wasm_bindgen::from_value(presets).map_err(js_error)?;
        FormatCatalog::new(presets.into_iter().map(FormatPreset::from).collect())
            .map(|inner| Self { inner })
            .map_err(js_error)
    }

    /// The presets that ship with the app.
    pub fn builtin() -> JsFormatCatalog {
        Self {
            inner: FormatCatalog::builtin(),
        }
    }

    /// Parse a JSON array of presets.
    pub fn from_json(json: &str) -> Result<JsFormatCatalog, JsValue> {
        FormatCatalog::from_json(json)
            .map(|inner| Self { inner })
            .map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.presets().len()
    }

    /// All presets, in catalog order.
    pub fn presets(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.presets()).map_err(js_error)
    }

    /// Presets for one orientation (`landscape`, `portrait` or `square`).
    pub fn presets_for(&self, orientation: &str) -> Result<JsValue, JsValue> {
        let orientation = parse_orientation(orientation)?;
        let presets: Vec<&FormatPreset> = self.inner.by_orientation(orientation).collect();
        serde_wasm_bindgen::to_value(&presets).map_err(js_error)
    }

    /// Whether `(orientation, key)` names a preset.
    pub fn contains(&self, orientation: &str, key: &str) -> bool {
        FrameOrientation::parse(orientation)
            .is_some_and(|o| self.inner.lookup(o, key).is_some())
    }
}

impl JsFormatCatalog {
    pub(crate) fn catalog(&self) -> &FormatCatalog {
        &self.inner
    }
}

pub(crate) fn parse_orientation(value: &str) -> Result<FrameOrientation, JsValue> {
    FrameOrientation::parse(value)
        .ok_or_else(|| js_error(format!("Unknown frame orientation: {value}")))
}
