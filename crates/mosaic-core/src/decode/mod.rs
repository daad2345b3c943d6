//! Upload validation and image decoding.
//!
//! This module provides functionality for:
//! - Rejecting uploads whose MIME type is not an image type
//! - Decoding PNG, JPEG, GIF, WebP and BMP into RGBA bitmaps
//! - Applying EXIF orientation the way browsers display photos
//! - Capping oversized uploads to a maximum edge length
//!
//! # Architecture
//!
//! Reading the file happens in the host; decoding is synchronous and
//! single-threaded within WASM. The compositor decides whether a finished
//! decode is still current (see `compositor::LoadTicket`).

mod resize;
mod source;
mod types;

pub use resize::{resize, resize_to_fit};
pub use source::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{Bitmap, DecodeError, FilterType, Orientation};

/// Longest edge, in pixels, kept for an uploaded source.
pub const MAX_SOURCE_EDGE: u32 = 4096;

/// Whether a browser-reported MIME type denotes an image.
pub fn is_image_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or("").trim();
    essence
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && essence.len() > 6
}

/// Validate and decode an uploaded file.
///
/// # Errors
///
/// - `DecodeError::InvalidFileType` when `mime` is not `image/*`; the bytes
///   are not inspected in that case.
/// - `DecodeError::InvalidFormat` / `DecodeError::CorruptedFile` when the
///   bytes cannot be decoded.
pub fn decode_upload(mime: &str, bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    if !is_image_mime(mime) {
        return Err(DecodeError::InvalidFileType(mime.to_string()));
    }

    let bitmap = decode_image(bytes)?;
    if bitmap.width > MAX_SOURCE_EDGE || bitmap.height > MAX_SOURCE_EDGE {
        log::debug!(
            "downscaling {}x{} upload to fit {}px",
            bitmap.width,
            bitmap.height,
            MAX_SOURCE_EDGE
        );
        return resize_to_fit(&bitmap, MAX_SOURCE_EDGE, FilterType::Lanczos3);
    }
    Ok(bitmap)
}
