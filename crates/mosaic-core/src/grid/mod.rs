//! Grid pixel editor.
//!
//! A fixed 32x32 board of cells painted with Draw, Erase and 4-connected
//! Fill tools, rendered to a 512x512 transparent canvas with a grid overlay
//! and exported as PNG.

mod cells;
mod editor;
mod palette;
mod render;

pub use cells::{Cell, PixelGrid, GRID_SIZE};
pub use editor::{point_to_cell, PixelEditor, Tool};
pub use palette::{in_palette, Rgb, DEFAULT_COLOR, PALETTE};
pub use render::{
    rasterize_grid, DrawOp, GridPlan, LineAxis, CANVAS_SIZE, CELL_SIZE, GRID_LINE_COLOR,
    GRID_LINE_WIDTH,
};
