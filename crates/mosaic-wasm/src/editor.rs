//! Pixel editor WASM bindings.
//!
//! ```typescript
//! const editor = new JsPixelEditor();
//! editor.set_tool('fill');
//! editor.set_color('#0EA5E9');
//! canvas.onpointerdown = (e) => editor.pointer_down(e.clientX, e.clientY, rectOf(canvas));
//! ```

use crate::types::{js_error, notifications_to_js, timestamp_from_js, JsBitmap, JsClientRect, JsExportArtifact};
use mosaic_core::grid::{PixelEditor, Rgb, Tool, CANVAS_SIZE, GRID_SIZE, PALETTE};
use wasm_bindgen::prelude::*;

/// The swatch colors as `#RRGGBB` strings.
#[wasm_bindgen]
pub fn palette() -> Vec<String> {
    PALETTE.iter().map(|c| c.to_hex()).collect()
}

#[wasm_bindgen]
pub struct JsPixelEditor {
    inner: PixelEditor,
}

impl Default for JsPixelEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsPixelEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsPixelEditor {
        Self {
            inner: PixelEditor::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> usize {
        GRID_SIZE
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_size(&self) -> u32 {
        CANVAS_SIZE
    }

    #[wasm_bindgen(getter)]
    pub fn selected_color(&self) -> String {
        self.inner.selected_color().to_hex()
    }

    /// Accepts `#RRGGBB` or `RRGGBB`; the color must be one of `palette()`.
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = Rgb::from_hex(hex).ok_or_else(|| js_error(format!("Invalid color: {hex}")))?;
        if !self.inner.set_color(color) {
            return Err(js_error(format!("Color not in palette: {color}")));
        }
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.inner.tool().as_str().to_string()
    }

    /// `draw` (or `pencil`), `erase` or `fill`.
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool = Tool::parse(tool).ok_or_else(|| js_error(format!("Unknown tool: {tool}")))?;
        self.inner.set_tool(tool);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Cell color as `#RRGGBB`, or `undefined` for empty or out-of-range cells.
    pub fn cell(&self, col: usize, row: usize) -> Option<String> {
        self.inner.grid().get(col, row).flatten().map(Rgb::to_hex)
    }

    // ----- editing -----

    pub fn draw(&mut self, col: usize, row: usize) -> bool {
        self.inner.draw(col, row)
    }

    /// Returns the number of cells recolored.
    pub fn fill(&mut self, col: usize, row: usize) -> usize {
        self.inner.fill(col, row)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    // ----- pointer -----

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, canvas: &JsClientRect) -> bool {
        self.inner.pointer_down(client_x, client_y, canvas.rect())
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

    /// Ordered draw list: cell fills first, then grid lines.
    pub fn render_plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.render_plan()).map_err(js_error)
    }

    pub fn export_png(&mut self, timestamp_ms: f64) -> Result<JsExportArtifact, JsValue> {
        self.inner
            .export(timestamp_from_js(timestamp_ms))
            .map(JsExportArtifact::from)
            .map_err(js_error)
    }

    pub fn drain_notifications(&mut self) -> Result<JsValue, JsValue> {
        notifications_to_js(&self.inner.drain_notifications())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        let colors = palette();
        assert_eq!(colors.len(), 30);
        assert_eq!(colors[0], "#9B87F5");
        assert_eq!(colors[29], "#1F2937");
    }

    #[test]
    fn test_editor_basics() {
        let mut editor = JsPixelEditor::default();
        assert_eq!(editor.grid_size(), 32);
        assert_eq!(editor.canvas_size(), 512);
        assert_eq!(editor.tool(), "draw");
        assert_eq!(editor.selected_color(), "#9B87F5");

        editor.set_color("#0ea5e9").unwrap();
        assert!(editor.draw(2, 3));
        assert_eq!(editor.cell(2, 3).as_deref(), Some("#0EA5E9"));
        assert_eq!(editor.cell(3, 2), None);
        assert_eq!(editor.cell(40, 2), None);
    }

    #[test]
    fn test_fill_via_pointer() {
        let mut editor = JsPixelEditor::new();
        editor.set_tool("fill").unwrap();
        let rect = JsClientRect::new(0.0, 0.0, 512.0, 512.0);
        assert!(editor.pointer_down(100.0, 100.0, &rect));
        assert!(!editor.is_dragging());
        assert_eq!(editor.fill(0, 0), 0);
    }

    #[test]
    fn test_erase_stroke() {
        let mut editor = JsPixelEditor::new();
        editor.fill(0, 0);
        editor.set_tool("erase").unwrap();
        let rect = JsClientRect::new(0.0, 0.0, 256.0, 256.0);
        assert!(editor.pointer_down(1.0, 1.0, &rect));
        assert!(editor.pointer_move(9.0, 1.0, &rect));
        editor.pointer_up();
        // Client x 9 on a half-size canvas is canvas x 18, cell 1.
        assert_eq!(editor.cell(0, 0), None);
        assert_eq!(editor.cell(1, 0), None);
        assert!(editor.cell(2, 0).is_some());
    }

    #[test]
    fn test_render_and_export() {
        let mut editor = JsPixelEditor::new();
        editor.draw(0, 0);
        let bitmap = editor.render();
        assert_eq!((bitmap.width(), bitmap.height()), (512, 512));

        let artifact = editor.export_png(99.0).unwrap();
        assert_eq!(artifact.file_name(), "pixel-art-99.png");
        assert_eq!(artifact.mime_type(), "image/png");
    }
}
