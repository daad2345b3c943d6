//! PNG encoding for export.
//!
//! PNG is the default export encoding: it is lossless and keeps the alpha
//! channel, which matters for pixel-art exports with empty cells.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::decode::Bitmap;

/// Encode an RGBA bitmap to PNG bytes.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty bitmap and
/// `EncodeError::InvalidPixelData` if the buffer length does not match.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (bitmap.width, bitmap.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(&bitmap.pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&Bitmap::filled(10, 10, [1, 2, 3, 255])).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        let empty = Bitmap {
            width: 0,
            height: 4,
            pixels: vec![],
        };
        assert!(matches!(
            encode_png(&empty),
            Err(EncodeError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_encode_png_mismatched_buffer() {
        let bad = Bitmap {
            width: 2,
            height: 2,
            pixels: vec![0; 12],
        };
        assert!(matches!(
            encode_png(&bad),
            Err(EncodeError::InvalidPixelData {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_encode_png_is_deterministic() {
        let bmp = Bitmap::filled(7, 5, [40, 80, 120, 200]);
        assert_eq!(encode_png(&bmp).unwrap(), encode_png(&bmp).unwrap());
    }
}

