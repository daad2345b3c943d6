//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image upload and decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The upload's MIME type is not an image type.
    #[error("Invalid file type: {0} is not an image")]
    InvalidFileType(String),

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, keeps hard pixel edges).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An RGBA raster, used both for decoded sources and rendered frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a bitmap where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Bitmap from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }

    /// Read one pixel. Panics in debug builds when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrite one pixel, ignoring coordinates outside the bitmap.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Composite `rgba` over the existing pixel (source-over, straight alpha).
    pub fn blend_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        match rgba[3] {
            0 => {}
            255 => self.put_pixel(x, y, rgba),
            _ => {
                let dst = self.pixel(x, y);
                let sa = rgba[3] as f32 / 255.0;
                let da = dst[3] as f32 / 255.0;
                let out_a = sa + da * (1.0 - sa);
                let mut out = [0u8; 4];
                for c in 0..3 {
                    let s = rgba[c] as f32 * sa;
                    let d = dst[c] as f32 * da * (1.0 - sa);
                    out[c] = ((s + d) / out_a).round().clamp(0.0, 255.0) as u8;
                }
                out[3] = (out_a * 255.0).round() as u8;
                self.put_pixel(x, y, out);
            }
        }
    }

    /// Flatten onto an opaque background, producing packed RGB bytes.
    pub fn to_rgb_on(&self, background: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() as usize * 3);
        for px in self.pixels.chunks_exact(4) {
            let a = px[3] as u32;
            for c in 0..3 {
                let v = (px[c] as u32 * a + background[c] as u32 * (255 - a) + 127) / 255;
                out.push(v as u8);
            }
        }
        out
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(42), Orientation::Normal);
    }

    #[test]
    fn test_bitmap_filled() {
        let bmp = Bitmap::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(bmp.pixel_count(), 6);
        assert_eq!(bmp.byte_size(), 24);
        assert_eq!(bmp.pixel(2, 1), [1, 2, 3, 4]);
        assert!(!bmp.is_empty());
    }

    #[test]
    fn test_put_pixel_out_of_bounds_is_ignored() {
        let mut bmp = Bitmap::filled(2, 2, [0, 0, 0, 255]);
        let before = bmp.clone();
        bmp.put_pixel(2, 0, [255, 255, 255, 255]);
        bmp.put_pixel(0, 5, [255, 255, 255, 255]);
        assert_eq!(bmp, before);
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        let mut bmp = Bitmap::filled(1, 1, [10, 20, 30, 255]);
        bmp.blend_pixel(0, 0, [200, 200, 200, 0]);
        assert_eq!(bmp.pixel(0, 0), [10, 20, 30, 255]);

        bmp.blend_pixel(0, 0, [200, 100, 50, 255]);
        assert_eq!(bmp.pixel(0, 0), [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let mut bmp = Bitmap::filled(1, 1, [0, 0, 0, 255]);
        bmp.blend_pixel(0, 0, [255, 255, 255, 128]);
        let px = bmp.pixel(0, 0);
        assert_eq!(px[3], 255);
        assert!((127..=129).contains(&px[0]), "got {:?}", px);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let mut bmp = Bitmap::filled(1, 1, [0, 0, 0, 0]);
        bmp.blend_pixel(0, 0, [55, 65, 81, 128]);
        assert_eq!(bmp.pixel(0, 0), [55, 65, 81, 128]);
    }

    #[test]
    fn test_to_rgb_on_background() {
        let bmp = Bitmap::new(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(bmp.to_rgb_on([9, 9, 9]), vec![255, 0, 0, 9, 9, 9]);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let bmp = Bitmap::filled(4, 3, [7, 8, 9, 10]);
        let img = bmp.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(Bitmap::from_rgba_image(img), bmp);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidFileType("text/plain".to_string());
        assert_eq!(err.to_string(), "Invalid file type: text/plain is not an image");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
