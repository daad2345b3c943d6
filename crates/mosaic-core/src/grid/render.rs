//! Grid rendering: a pure draw list plus its rasterizer.
//!
//! Fills are always listed before grid lines so the lines stay visible on
//! top of painted cells.

use serde::{Deserialize, Serialize};

use super::cells::{PixelGrid, GRID_SIZE};
use super::palette::Rgb;
use crate::decode::Bitmap;

/// Cell edge in canvas pixels.
pub const CELL_SIZE: u32 = 16;
/// Canvas edge in pixels.
pub const CANVAS_SIZE: u32 = GRID_SIZE as u32 * CELL_SIZE;
pub const GRID_LINE_COLOR: Rgb = Rgb::new(0x37, 0x41, 0x51);
/// Nominal stroke width of a grid line.
pub const GRID_LINE_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAxis {
    /// Constant x, spans the full height.
    Vertical,
    /// Constant y, spans the full width.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    FillRect {
        x: u32,
        y: u32,
        size: u32,
        color: Rgb,
    },
    Line {
        axis: LineAxis,
        position: u32,
        width: f64,
        color: Rgb,
    },
}

/// Ordered draw list for one grid frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlan {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl GridPlan {
    pub fn new(grid: &PixelGrid) -> Self {
        let mut ops = Vec::with_capacity(grid.filled_count() + 2 * (GRID_SIZE + 1));

        for (col, row, color) in grid.filled() {
            ops.push(DrawOp::FillRect {
                x: col as u32 * CELL_SIZE,
                y: row as u32 * CELL_SIZE,
                size: CELL_SIZE,
                color,
            });
        }

        for axis in [LineAxis::Vertical, LineAxis::Horizontal] {
            for i in 0..=GRID_SIZE as u32 {
                ops.push(DrawOp::Line {
                    axis,
                    position: i * CELL_SIZE,
                    width: GRID_LINE_WIDTH,
                    color: GRID_LINE_COLOR,
                });
            }
        }

        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            ops,
        }
    }
}

/// Paint a plan onto a transparent canvas.
///
/// A line of width `w` covers a one-pixel column or row with alpha `w`,
/// which is what an antialiased half-pixel stroke averages to. Lines on the
/// far edge are pulled inside the canvas.
pub fn rasterize_grid(plan: &GridPlan) -> Bitmap {
    let mut canvas = Bitmap::filled(plan.width, plan.height, [0, 0, 0, 0]);

    for op in &plan.ops {
        match *op {
            DrawOp::FillRect { x, y, size, color } => {
                let rgba = color.to_rgba(255);
                for py in y..(y + size).min(plan.height) {
                    for px in x..(x + size).min(plan.width) {
                        canvas.put_pixel(px, py, rgba);
                    }
                }
            }
            DrawOp::Line {
                axis,
                position,
                width,
                color,
            } => {
                let alpha = (width.clamp(0.0, 1.0) * 255.0).round() as u8;
                let rgba = color.to_rgba(alpha);
                match axis {
                    LineAxis::Vertical if plan.width > 0 => {
                        let x = position.min(plan.width - 1);
                        for y in 0..plan.height {
                            canvas.blend_pixel(x, y, rgba);
                        }
                    }
                    LineAxis::Horizontal if plan.height > 0 => {
                        let y = position.min(plan.height - 1);
                        for x in 0..plan.width {
                            canvas.blend_pixel(x, y, rgba);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::palette::PALETTE;

    #[test]
    fn test_blank_plan_has_only_lines() {
        let plan = GridPlan::new(&PixelGrid::new());
        assert_eq!((plan.width, plan.height), (512, 512));
        assert_eq!(plan.ops.len(), 66);
        let vertical = plan
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { axis: LineAxis::Vertical, .. }))
            .count();
        assert_eq!(vertical, 33);
    }

    #[test]
    fn test_fills_precede_lines() {
        let mut grid = PixelGrid::new();
        grid.set(31, 31, Some(PALETTE[3]));
        grid.set(0, 0, Some(PALETTE[4]));
        let plan = GridPlan::new(&grid);

        let first_line = plan
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Line { .. }))
            .unwrap();
        assert_eq!(first_line, 2);
        assert!(plan.ops[first_line..]
            .iter()
            .all(|op| matches!(op, DrawOp::Line { .. })));
        assert_eq!(
            plan.ops[1],
            DrawOp::FillRect {
                x: 496,
                y: 496,
                size: 16,
                color: PALETTE[3]
            }
        );
    }

    #[test]
    fn test_rasterize_blank_grid() {
        let canvas = rasterize_grid(&GridPlan::new(&PixelGrid::new()));
        assert_eq!((canvas.width, canvas.height), (512, 512));
        // Cell interior is transparent.
        assert_eq!(canvas.pixel(8, 8), [0, 0, 0, 0]);
        // Line pixels carry the grid color at half opacity.
        assert_eq!(canvas.pixel(16, 8), [0x37, 0x41, 0x51, 128]);
        assert_eq!(canvas.pixel(8, 511), [0x37, 0x41, 0x51, 128]);
    }

    #[test]
    fn test_rasterize_filled_cell_under_lines() {
        let color = PALETTE[0];
        let mut grid = PixelGrid::new();
        grid.set(1, 1, Some(color));
        let canvas = rasterize_grid(&GridPlan::new(&grid));

        assert_eq!(canvas.pixel(20, 20), color.to_rgba(255));
        // Cell edge is covered by a half-opaque line, still fully opaque.
        let edge = canvas.pixel(16, 20);
        assert_eq!(edge[3], 255);
        assert_ne!(edge, color.to_rgba(255));
        // Neighbor cell stays empty.
        assert_eq!(canvas.pixel(40, 20), [0, 0, 0, 0]);
    }

    #[test]
    fn test_plan_serializes_with_op_tags() {
        let plan = GridPlan::new(&PixelGrid::new());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["ops"][0]["op"], "line");
        assert_eq!(json["ops"][0]["axis"], "vertical");
        assert_eq!(json["ops"][0]["color"], "#374151");
    }
}
