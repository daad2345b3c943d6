//! Resizing of uploaded sources.
//!
//! Uploads are capped to a maximum edge length before they enter the
//! compositor so that per-frame rendering stays bounded.

use super::{Bitmap, DecodeError, FilterType};

/// Resize a bitmap to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match its size.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());
    Ok(Bitmap::from_rgba_image(resized))
}

/// Shrink a bitmap so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Smaller images are returned unchanged (never upscaled).
pub fn resize_to_fit(
    image: &Bitmap,
    max_edge: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (w, h) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, w, h, filter)
}

fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    if width >= height {
        let h = (max_edge as f64 / ratio).round() as u32;
        (max_edge, h.max(1))
    } else {
        let w = (max_edge as f64 * ratio).round() as u32;
        (w.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let resized = resize(&gradient(100, 50), 50, 25, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(10, 10);
        assert!(resize(&img, 0, 5, FilterType::Nearest).is_err());
        assert!(resize(&img, 5, 0, FilterType::Nearest).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let resized = resize_to_fit(&gradient(600, 400), 300, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width, resized.height), (300, 200));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let resized = resize_to_fit(&gradient(300, 600), 200, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (100, 200));
    }

    #[test]
    fn test_resize_to_fit_never_upscales() {
        let resized = resize_to_fit(&gradient(100, 50), 4096, FilterType::Bilinear).unwrap();
        assert_eq!((resized.width, resized.height), (100, 50));
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        assert!(resize_to_fit(&gradient(4, 4), 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(10000, 1, 100), (100, 1));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
    }
}
