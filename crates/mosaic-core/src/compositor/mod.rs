//! Raster transform compositor.
//!
//! Places one uploaded image inside a fixed-size output frame with scale,
//! offset, quarter-turn rotation and mirroring, then renders or exports the
//! frame. The frame clips anything outside it.
//!
//! # Architecture
//!
//! - [`transform`]: the placement state and the fit/center rule
//! - [`plan`]: affine math and the pure [`RenderPlan`] description
//! - [`raster`]: painting a plan into a [`Bitmap`](crate::decode::Bitmap)
//! - [`engine`]: the [`Compositor`] session tying input, loading and export
//!   together

pub mod engine;
pub mod plan;
pub mod raster;
pub mod transform;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::format::FrameOrientation;

pub use engine::{Compositor, LoadOutcome, LoadTicket};
pub use plan::{Affine, ImagePlacement, RenderPlan, BACKGROUND, BORDER_COLOR, BORDER_WIDTH};
pub use raster::{rasterize, InterpolationFilter};
pub use transform::{
    center_and_fit, clamp_scale, Rotation, Transform, SCALE_MAX, SCALE_MIN, WHEEL_STEP,
};

#[derive(Debug, Error)]
pub enum CompositorError {
    #[error("Invalid file type: {0} is not an image")]
    InvalidFileType(String),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Unknown format {orientation}/{key}")]
    UnknownFormat {
        orientation: FrameOrientation,
        key: String,
    },

    #[error(transparent)]
    Decode(DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
