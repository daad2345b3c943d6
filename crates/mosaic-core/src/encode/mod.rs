//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to PNG (default export encoding)
//! - Encoding to JPEG with configurable quality, flattening alpha first
//!
//! All operations are synchronous and single-threaded within WASM.

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jpeg::{encode_jpeg, encode_jpeg_bitmap};
pub use png::encode_png;

use crate::decode::Bitmap;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output encoding for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExportEncoding {
    #[default]
    Png,
    Jpeg {
        /// 1-100, clamped.
        quality: u8,
    },
}

impl ExportEncoding {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportEncoding::Png => "image/png",
            ExportEncoding::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportEncoding::Png => "png",
            ExportEncoding::Jpeg { .. } => "jpg",
        }
    }

    /// Encode `bitmap`; JPEG output is flattened onto `background`.
    pub fn encode(self, bitmap: &Bitmap, background: [u8; 3]) -> Result<Vec<u8>, EncodeError> {
        match self {
            ExportEncoding::Png => encode_png(bitmap),
            ExportEncoding::Jpeg { quality } => encode_jpeg_bitmap(bitmap, background, quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_encoding_metadata() {
        assert_eq!(ExportEncoding::Png.mime_type(), "image/png");
        assert_eq!(ExportEncoding::Png.extension(), "png");
        let jpeg = ExportEncoding::Jpeg { quality: 90 };
        assert_eq!(jpeg.mime_type(), "image/jpeg");
        assert_eq!(jpeg.extension(), "jpg");
    }

    #[test]
    fn test_export_encoding_dispatch() {
        let bmp = Bitmap::filled(4, 4, [10, 20, 30, 255]);
        let png = ExportEncoding::Png.encode(&bmp, [0, 0, 0]).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let jpeg = ExportEncoding::Jpeg { quality: 80 }
            .encode(&bmp, [0, 0, 0])
            .unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_export_encoding_serde_shape() {
        let json = serde_json::to_string(&ExportEncoding::Jpeg { quality: 85 }).unwrap();
        assert_eq!(json, r#"{"kind":"jpeg","quality":85}"#);
        let back: ExportEncoding = serde_json::from_str(r#"{"kind":"png"}"#).unwrap();
        assert_eq!(back, ExportEncoding::Png);
    }
}
