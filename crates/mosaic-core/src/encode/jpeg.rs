//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so bitmaps are flattened onto an opaque
//! background before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::decode::Bitmap;

/// Encode packed RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Flatten an RGBA bitmap onto `background` and encode it as JPEG.
pub fn encode_jpeg_bitmap(
    bitmap: &Bitmap,
    background: [u8; 3],
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let expected = (bitmap.width as usize) * (bitmap.height as usize) * 4;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }
    encode_jpeg(
        &bitmap.to_rgb_on(background),
        bitmap.width,
        bitmap.height,
        quality,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_jpeg_markers(bytes: &[u8]) {
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8], "missing SOI marker");
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9], "missing EOI marker");
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();
        assert_jpeg_markers(&jpeg);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3];
        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_bitmap_flattens_alpha() {
        let bmp = Bitmap::filled(16, 16, [0, 0, 0, 0]);
        let jpeg = encode_jpeg_bitmap(&bmp, [255, 255, 255], 95).unwrap();
        assert_jpeg_markers(&jpeg);

        let decoded = crate::decode::decode_image(&jpeg).unwrap();
        let px = decoded.pixel(8, 8);
        assert!(px[0] > 245 && px[1] > 245 && px[2] > 245, "got {:?}", px);
    }

    #[test]
    fn test_encode_jpeg_bitmap_rejects_bad_buffer() {
        let bad = Bitmap {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        assert!(matches!(
            encode_jpeg_bitmap(&bad, [0, 0, 0], 90),
            Err(EncodeError::InvalidPixelData { expected: 64, actual: 10 })
        ));
    }
}
