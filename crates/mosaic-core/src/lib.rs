//! Mosaic Core - image composition and pixel editing library
//!
//! This crate provides the engines behind the Mosaic web app: a raster
//! compositor that places an uploaded image inside a print-format frame, and
//! a 32x32 pixel-art editor. Both produce downloadable PNG (or JPEG) files.
//!
//! Nothing here touches the DOM; the `mosaic-wasm` crate wraps these types
//! for JavaScript.

pub mod compositor;
pub mod decode;
pub mod encode;
pub mod export;
pub mod format;
pub mod gesture;
pub mod grid;
pub mod notify;

pub use compositor::{Compositor, CompositorError, InterpolationFilter, Rotation, Transform};
pub use decode::{Bitmap, DecodeError};
pub use encode::{EncodeError, ExportEncoding};
pub use export::ExportArtifact;
pub use format::{CatalogError, FormatCatalog, FormatPreset, FrameOrientation};
pub use gesture::{ClientRect, Point};
pub use grid::{PixelEditor, Rgb, Tool};
pub use notify::{Notification, Severity};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engines_are_independent() {
        let mut compositor = Compositor::default();
        let mut editor = PixelEditor::new();

        editor.draw(0, 0);
        editor.clear();
        assert!(compositor.drain_notifications().is_empty());
        assert_eq!(editor.drain_notifications().len(), 1);
    }

    #[test]
    fn test_default_frame_is_builtin_first_preset() {
        let compositor = Compositor::default();
        let catalog = FormatCatalog::builtin();
        assert_eq!(compositor.frame(), catalog.default_preset());
        assert_eq!(compositor.frame().tag(), "portrait-a4");
    }

    #[test]
    fn test_compositor_error_messages() {
        let err = CompositorError::UnknownFormat {
            orientation: FrameOrientation::Square,
            key: "a4".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown format square/a4");
        assert_eq!(CompositorError::NoImageLoaded.to_string(), "No image loaded");

        let wrapped: CompositorError = EncodeError::EncodingFailed("boom".into()).into();
        assert_eq!(wrapped.to_string(), "Encoding failed: boom");
    }
}
