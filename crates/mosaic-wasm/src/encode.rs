//! Image encoding WASM bindings.
//!
//! The engines' `export_*` methods are the usual way to produce files; these
//! functions encode an arbitrary bitmap, e.g. a `render()` result the host
//! has post-processed.
//!
//! ```typescript
//! const png = encode_png(compositor.render());
//! const jpeg = encode_jpeg(compositor.render(), 90);
//! ```

use crate::types::{js_error, JsBitmap};
use mosaic_core::compositor::BACKGROUND;
use mosaic_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap as PNG, keeping its alpha channel.
#[wasm_bindgen]
pub fn encode_png(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.bitmap()).map_err(js_error)
}

/// Encode a bitmap as JPEG (quality 1-100). Transparent pixels are
/// flattened onto the compositor background color.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    let background = [BACKGROUND[0], BACKGROUND[1], BACKGROUND[2]];
    encode::encode_jpeg_bitmap(image.bitmap(), background, quality).map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use mosaic_core::decode::Bitmap;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_empty_errors() {
        let empty = JsBitmap::from_bitmap(Bitmap::new(0, 0, Vec::new()));
        assert!(encode_png(&empty).is_err());
    }
}
