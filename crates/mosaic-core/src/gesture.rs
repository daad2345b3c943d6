//! Pointer gesture tracking shared by both engines.
//!
//! ```text
//! Idle --press--> Dragging --drag_to--> Dragging --release--> Idle
//! ```
//!
//! `release` covers both pointer-up and pointer-leave.

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas element's bounding box in client (CSS pixel) coordinates,
/// as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether a client-space point lies on or inside the rect.
    pub fn contains(&self, client_x: f64, client_y: f64) -> bool {
        client_x >= self.left
            && client_x <= self.left + self.width
            && client_y >= self.top
            && client_y <= self.top + self.height
    }

    /// Map a client-space point into canvas pixels for a canvas whose
    /// backing store is `canvas_width` x `canvas_height`.
    ///
    /// CSS may display the canvas at a different size than its backing store;
    /// a zero-sized rect maps 1:1.
    pub fn to_canvas(
        &self,
        client_x: f64,
        client_y: f64,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Point {
        let sx = if self.width > 0.0 {
            canvas_width as f64 / self.width
        } else {
            1.0
        };
        let sy = if self.height > 0.0 {
            canvas_height as f64 / self.height
        } else {
            1.0
        };
        Point::new((client_x - self.left) * sx, (client_y - self.top) * sy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
}

impl Gesture {
    pub fn press(&mut self, at: Point) {
        *self = Gesture::Dragging { last: at };
    }

    /// Advance an active drag to `at`, returning the movement since the
    /// previous position. Returns `None` while idle.
    pub fn drag_to(&mut self, at: Point) -> Option<Point> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { last } => {
                let delta = Point::new(at.x - last.x, at.y - last.y);
                *last = at;
                Some(delta)
            }
        }
    }

    pub fn release(&mut self) {
        *self = Gesture::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }
}
