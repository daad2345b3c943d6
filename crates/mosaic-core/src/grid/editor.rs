//! The pixel editor session: tool selection, pointer input and export.

use serde::{Deserialize, Serialize};

use super::cells::{PixelGrid, GRID_SIZE};
use super::palette::{in_palette, Rgb, DEFAULT_COLOR};
use super::render::{rasterize_grid, GridPlan, CANVAS_SIZE, CELL_SIZE};
use crate::decode::Bitmap;
use crate::encode::{encode_png, EncodeError};
use crate::export::{export_file_name, ExportArtifact};
use crate::gesture::{ClientRect, Gesture, Point};
use crate::notify::{Notification, Outbox};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint single cells with the selected color.
    #[default]
    Draw,
    /// Clear single cells.
    Erase,
    /// Flood fill the clicked region with the selected color.
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Draw, Tool::Erase, Tool::Fill];

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Draw => "draw",
            Tool::Erase => "erase",
            Tool::Fill => "fill",
        }
    }

    /// Case-insensitive; `pencil` is accepted for Draw.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("pencil") {
            return Some(Tool::Draw);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

/// Map a canvas-space point to `(col, row)`, or `None` outside the grid.
pub fn point_to_cell(p: Point) -> Option<(usize, usize)> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return None;
    }
    let col = (p.x / CELL_SIZE as f64).floor();
    let row = (p.y / CELL_SIZE as f64).floor();
    let range = 0.0..GRID_SIZE as f64;
    (range.contains(&col) && range.contains(&row)).then_some((col as usize, row as usize))
}

/// Grid Pixel Editor.
#[derive(Debug)]
pub struct PixelEditor {
    grid: PixelGrid,
    selected: Rgb,
    tool: Tool,
    gesture: Gesture,
    outbox: Outbox,
}

impl Default for PixelEditor {
    fn default() -> Self {
        Self {
            grid: PixelGrid::new(),
            selected: DEFAULT_COLOR,
            tool: Tool::default(),
            gesture: Gesture::Idle,
            outbox: Outbox::new(),
        }
    }
}

impl PixelEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn selected_color(&self) -> Rgb {
        self.selected
    }

    /// Select a palette color. Colors outside the palette are refused and
    /// leave the selection unchanged.
    pub fn set_color(&mut self, color: Rgb) -> bool {
        if !in_palette(color) {
            log::warn!("rejected off-palette color {color}");
            return false;
        }
        self.selected = color;
        true
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    // ----- editing -----

    /// Apply Draw or Erase to one cell. Fill is not a per-cell tool and does
    /// nothing here. Returns whether the grid changed.
    pub fn draw(&mut self, col: usize, row: usize) -> bool {
        match self.tool {
            Tool::Draw => self.grid.set(col, row, Some(self.selected)),
            Tool::Erase => self.grid.set(col, row, None),
            Tool::Fill => false,
        }
    }

    /// Flood fill from `(col, row)` with the selected color. Returns the
    /// number of cells recolored.
    pub fn fill(&mut self, col: usize, row: usize) -> usize {
        let changed = self.grid.flood_fill(col, row, Some(self.selected));
        if changed > 0 {
            log::debug!("filled {changed} cells from ({col}, {row}) with {}", self.selected);
        }
        changed
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.gesture.release();
        log::debug!("grid cleared");
        self.outbox.push(
            Notification::success("Canvas cleared")
                .with_description("All pixels have been erased"),
        );
    }

    // ----- pointer gestures -----

    /// Start a stroke. Draw and Erase paint the cell under the pointer and
    /// keep painting on move; Fill fires once and starts no stroke.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, canvas: &ClientRect) -> bool {
        let at = canvas.to_canvas(client_x, client_y, CANVAS_SIZE, CANVAS_SIZE);
        match self.tool {
            Tool::Fill => {
                self.gesture.release();
                point_to_cell(at).is_some_and(|(col, row)| self.fill(col, row) > 0)
            }
            Tool::Draw | Tool::Erase => {
                self.gesture.press(at);
                point_to_cell(at).is_some_and(|(col, row)| self.draw(col, row))
            }
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, canvas: &ClientRect) -> bool {
        let at = canvas.to_canvas(client_x, client_y, CANVAS_SIZE, CANVAS_SIZE);
        if self.gesture.drag_to(at).is_none() {
            return false;
        }
        point_to_cell(at).is_some_and(|(col, row)| self.draw(col, row))
    }

    pub fn pointer_up(&mut self) {
        self.gesture.release();
    }

    pub fn pointer_leave(&mut self) {
        self.gesture.release();
    }

    // ----- output -----

    pub fn render_plan(&self) -> GridPlan {
        GridPlan::new(&self.grid)
    }

    pub fn render(&self) -> Bitmap {
        rasterize_grid(&self.render_plan())
    }

    /// Encode the canvas as a PNG download.
    pub fn export(&mut self, timestamp_ms: u64) -> Result<ExportArtifact, EncodeError> {
        let canvas = self.render();
        self.export_bitmap(&canvas, timestamp_ms)
    }

    fn export_bitmap(
        &mut self,
        canvas: &Bitmap,
        timestamp_ms: u64,
    ) -> Result<ExportArtifact, EncodeError> {
        let bytes = match encode_png(canvas) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("pixel art export failed: {err}");
                self.outbox.push(
                    Notification::error("Export failed").with_description(err.to_string()),
                );
                return Err(err);
            }
        };
        let file_name = export_file_name("pixel-art", timestamp_ms, "png");
        log::debug!("exported {file_name} ({} bytes)", bytes.len());
        self.outbox.push(
            Notification::success("Image saved")
                .with_description("Your pixel art has been downloaded"),
        );
        Ok(ExportArtifact {
            file_name,
            mime_type: "image/png".to_string(),
            bytes,
        })
    }
}
