//! Painting a [`RenderPlan`] into a bitmap.
//!
//! # Algorithm
//!
//! Inverse mapping: for each frame pixel inside the image's bounding box, the
//! pixel center is mapped back through the inverse placement matrix into
//! source coordinates. Points that land inside the source are sampled and
//! composited source-over onto the background; everything else keeps the
//! background, which is how the frame clips an image dragged off its edges.

use super::plan::RenderPlan;
use crate::decode::Bitmap;
use crate::gesture::Point;

/// Sampling filter used when painting the source into the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Hard pixel edges; right for pixel art.
    Nearest,
    /// Smooth interpolation between the 4 nearest texels.
    #[default]
    Bilinear,
}

/// Paint `plan` into a new frame-sized bitmap.
///
/// `source` must be the image the plan was computed for; when either the
/// plan has no placement or no source is supplied, only the background and
/// border are painted.
pub fn rasterize(plan: &RenderPlan, source: Option<&Bitmap>, filter: InterpolationFilter) -> Bitmap {
    let mut frame = Bitmap::filled(plan.frame_width, plan.frame_height, plan.background);

    if let (Some(placement), Some(src)) = (plan.image.as_ref(), source) {
        if !src.is_empty() {
            if let Some(inverse) = placement.image_to_frame().invert() {
                let (min, max) = placement.bounds();
                let x0 = min.x.floor().max(0.0) as u32;
                let y0 = min.y.floor().max(0.0) as u32;
                let x1 = (max.x.ceil().max(0.0) as u32).min(plan.frame_width);
                let y1 = (max.y.ceil().max(0.0) as u32).min(plan.frame_height);

                let (sw, sh) = (src.width as f64, src.height as f64);
                for y in y0..y1 {
                    for x in x0..x1 {
                        let p = inverse.apply(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                        if p.x < 0.0 || p.y < 0.0 || p.x >= sw || p.y >= sh {
                            continue;
                        }
                        let texel = match filter {
                            InterpolationFilter::Nearest => sample_nearest(src, p.x, p.y),
                            InterpolationFilter::Bilinear => sample_bilinear(src, p.x, p.y),
                        };
                        frame.blend_pixel(x, y, texel);
                    }
                }
            }
        }
    }

    stroke_border(&mut frame, plan.border_width, plan.border_color);
    frame
}

fn stroke_border(frame: &mut Bitmap, width: u32, color: [u8; 4]) {
    let (w, h) = (frame.width, frame.height);
    for i in 0..width.min(w).min(h) {
        for x in 0..w {
            frame.blend_pixel(x, i, color);
            frame.blend_pixel(x, h - 1 - i, color);
        }
        for y in 0..h {
            frame.blend_pixel(i, y, color);
            frame.blend_pixel(w - 1 - i, y, color);
        }
    }
}

#[inline]
fn sample_nearest(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let px = (x.floor() as u32).min(image.width - 1);
    let py = (y.floor() as u32).min(image.height - 1);
    image.pixel(px, py)
}

/// Bilinear sample with texel centers at half-integers and edge clamping,
/// interpolated in premultiplied alpha so transparent texels don't bleed
/// their color into neighbors.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let fx = (x - 0.5).clamp(0.0, max_x);
    let fy = (y - 0.5).clamp(0.0, max_y);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let taps = [
        (image.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
        (image.pixel(x1, y0), tx * (1.0 - ty)),
        (image.pixel(x0, y1), (1.0 - tx) * ty),
        (image.pixel(x1, y1), tx * ty),
    ];

    let mut premul = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (px, weight) in taps {
        let a = px[3] as f64 / 255.0 * weight;
        alpha += a;
        for c in 0..3 {
            premul[c] += px[c] as f64 * a;
        }
    }

    if alpha <= f64::EPSILON {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = (premul[c] / alpha).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}
