//! Placement state of the source image inside the frame.
//!
//! # Coordinate System
//!
//! - Offsets are in frame pixels, origin at the frame's top-left corner
//! - `offset` is the top-left corner of the *unrotated* scaled image box
//! - Rotation is clockwise on screen (y grows downward)

use serde::{Deserialize, Serialize};

use crate::gesture::Point;

pub const SCALE_MIN: f64 = 10.0;
pub const SCALE_MAX: f64 = 300.0;
/// Scale change per wheel notch, in percent points.
pub const WHEEL_STEP: f64 = 5.0;

/// Clamp a scale percentage into `[SCALE_MIN, SCALE_MAX]`.
///
/// NaN clamps to the minimum so the invariant holds for any input.
pub fn clamp_scale(percent: f64) -> f64 {
    if percent.is_nan() {
        return SCALE_MIN;
    }
    percent.clamp(SCALE_MIN, SCALE_MAX)
}

/// Quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Accepts any multiple of 90, including negative ones.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    /// The next orientation, 90 degrees clockwise.
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Exact `(cos, sin)` of the angle.
    pub(crate) fn cos_sin(self) -> (f64, f64) {
        match self {
            Rotation::Deg0 => (1.0, 0.0),
            Rotation::Deg90 => (0.0, 1.0),
            Rotation::Deg180 => (-1.0, 0.0),
            Rotation::Deg270 => (0.0, -1.0),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 | 90 | 180 | 270 => Ok(Rotation::from_degrees(value as i32).unwrap_or_default()),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

/// Scale, position, rotation and mirroring of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Always within `[SCALE_MIN, SCALE_MAX]`.
    pub scale_percent: f64,
    pub offset: Point,
    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale_percent: 100.0,
            offset: Point::default(),
            rotation: Rotation::Deg0,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }
}

impl Transform {
    pub fn scale_factor(&self) -> f64 {
        self.scale_percent / 100.0
    }

    /// Size of the image box after scaling, before rotation.
    pub fn scaled_size(&self, image_width: u32, image_height: u32) -> (f64, f64) {
        let s = self.scale_factor();
        (image_width as f64 * s, image_height as f64 * s)
    }

    pub fn set_scale(&mut self, percent: f64) {
        self.scale_percent = clamp_scale(percent);
    }

    /// One wheel notch: a negative `delta_y` (scrolling up) zooms in.
    pub fn step_scale(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.set_scale(self.scale_percent + WHEEL_STEP);
        } else if delta_y > 0.0 {
            self.set_scale(self.scale_percent - WHEEL_STEP);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    pub fn rotate_90(&mut self) {
        self.rotation = self.rotation.next();
    }
}

/// Fit an image into a frame, preserving aspect ratio, and center it.
///
/// The fitted scale is clamped into the allowed range; the offset is derived
/// from the clamped scale, so the image is always exactly centered even when
/// clamping makes it overflow or underfill the frame.
pub fn center_and_fit(
    image_width: u32,
    image_height: u32,
    frame_width: u32,
    frame_height: u32,
) -> Transform {
    let mut transform = Transform::default();
    if image_width == 0 || image_height == 0 {
        return transform;
    }

    let factor = (frame_width as f64 / image_width as f64)
        .min(frame_height as f64 / image_height as f64);
    transform.set_scale(factor * 100.0);

    let (w, h) = transform.scaled_size(image_width, image_height);
    transform.offset = Point::new(
        (frame_width as f64 - w) / 2.0,
        (frame_height as f64 - h) / 2.0,
    );
    transform
}
