//! Pure description of a rendered frame.
//!
//! [`RenderPlan`] says *what* the frame looks like without touching pixels,
//! so placement math can be tested without a drawing surface. The matrices
//! follow the 2D canvas convention and are composed in canvas call order:
//!
//! ```text
//! translate(offset + scaled/2) -> rotate(rotation) -> scale(±1, ±1) -> draw centered
//! ```
//!
//! Changing that order changes the output.

use serde::{Deserialize, Serialize};

use super::transform::{Rotation, Transform};
use crate::gesture::Point;

/// Neutral fill behind the image.
pub const BACKGROUND: [u8; 4] = [0xF3, 0xF4, 0xF6, 0xFF];
/// Frame outline color.
pub const BORDER_COLOR: [u8; 4] = [0x37, 0x41, 0x51, 0xFF];
/// Frame outline width in pixels.
pub const BORDER_WIDTH: u32 = 1;

/// 2D affine matrix in canvas layout:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Affine {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self · rhs`: `rhs` applies to points first.
    pub fn multiply(&self, rhs: &Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    /// Like `ctx.translate`.
    pub fn translated(&self, tx: f64, ty: f64) -> Affine {
        self.multiply(&Affine::translation(tx, ty))
    }

    /// Like `ctx.rotate` for a quarter turn.
    pub fn rotated(&self, rotation: Rotation) -> Affine {
        let (cos, sin) = rotation.cos_sin();
        self.multiply(&Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        })
    }

    /// Like `ctx.scale`.
    pub fn scaled(&self, sx: f64, sy: f64) -> Affine {
        self.multiply(&Affine {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `None` for singular matrices (zero-sized draws).
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }
}

/// Where and how the source image lands in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePlacement {
    /// Frame-space pivot: `offset + scaled_size / 2`.
    pub center: Point,
    pub rotation: Rotation,
    pub mirror_x: f64,
    pub mirror_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
    pub source_width: u32,
    pub source_height: u32,
}

impl ImagePlacement {
    pub fn new(transform: &Transform, source_width: u32, source_height: u32) -> Self {
        let (draw_width, draw_height) = transform.scaled_size(source_width, source_height);
        Self {
            center: Point::new(
                transform.offset.x + draw_width / 2.0,
                transform.offset.y + draw_height / 2.0,
            ),
            rotation: transform.rotation,
            mirror_x: if transform.flip_horizontal { -1.0 } else { 1.0 },
            mirror_y: if transform.flip_vertical { -1.0 } else { 1.0 },
            draw_width,
            draw_height,
            source_width,
            source_height,
        }
    }

    /// Maps the centered draw space (origin at the image center) to frame space.
    pub fn local_to_frame(&self) -> Affine {
        Affine::translation(self.center.x, self.center.y)
            .rotated(self.rotation)
            .scaled(self.mirror_x, self.mirror_y)
    }

    /// Maps source pixel coordinates to frame space.
    pub fn image_to_frame(&self) -> Affine {
        let sx = self.draw_width / self.source_width.max(1) as f64;
        let sy = self.draw_height / self.source_height.max(1) as f64;
        self.local_to_frame()
            .translated(-self.draw_width / 2.0, -self.draw_height / 2.0)
            .scaled(sx, sy)
    }

    /// Frame-space corners of the drawn image, clockwise from the source's
    /// top-left.
    pub fn corners(&self) -> [Point; 4] {
        let m = self.image_to_frame();
        let (w, h) = (self.source_width as f64, self.source_height as f64);
        [
            m.apply(Point::new(0.0, 0.0)),
            m.apply(Point::new(w, 0.0)),
            m.apply(Point::new(w, h)),
            m.apply(Point::new(0.0, h)),
        ]
    }

    /// Axis-aligned frame-space bounds `(min, max)` of the drawn image.
    pub fn bounds(&self) -> (Point, Point) {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub frame_width: u32,
    pub frame_height: u32,
    pub background: [u8; 4],
    pub image: Option<ImagePlacement>,
    pub border_color: [u8; 4],
    pub border_width: u32,
}

impl RenderPlan {
    /// Plan a frame; `source` is the loaded image's `(width, height)`.
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        source: Option<(u32, u32)>,
        transform: &Transform,
    ) -> Self {
        Self {
            frame_width,
            frame_height,
            background: BACKGROUND,
            image: source.map(|(w, h)| ImagePlacement::new(transform, w, h)),
            border_color: BORDER_COLOR,
            border_width: BORDER_WIDTH,
        }
    }
}
