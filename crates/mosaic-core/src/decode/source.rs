//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{Bitmap, DecodeError, Orientation};

/// Decode an image (any enabled format) from bytes, applying EXIF orientation.
///
/// The format is sniffed from the content, not the file name, so a JPEG that
/// arrives labelled `image/png` still decodes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be guessed.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or damaged.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    Ok(Bitmap::from_rgba_image(
        apply_orientation(img, orientation).into_rgba8(),
    ))
}

/// Decode an image without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(Bitmap::from_rgba_image(img.into_rgba8()))
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::CorruptedFile("empty file".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` when no EXIF block or tag is present.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract the EXIF orientation of an encoded image.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
