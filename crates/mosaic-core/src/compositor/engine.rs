//! The compositor session: owns the source, frame and transform, and turns
//! user input into state changes.

use super::plan::{RenderPlan, BACKGROUND};
use super::raster::{rasterize, InterpolationFilter};
use super::transform::{center_and_fit, Transform};
use super::CompositorError;
use crate::decode::{self, Bitmap, DecodeError};
use crate::encode::ExportEncoding;
use crate::export::{export_file_name, ExportArtifact};
use crate::format::{FormatCatalog, FormatPreset, FrameOrientation};
use crate::gesture::{ClientRect, Gesture};
use crate::notify::{Notification, Outbox};

/// Issued by [`Compositor::begin_load`]; identifies one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    mime: String,
}

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image replaced the current source.
    Applied,
    /// A newer upload was already applied; this one was dropped.
    Stale,
}

/// Raster Transform Compositor.
#[derive(Debug)]
pub struct Compositor {
    catalog: FormatCatalog,
    frame: FormatPreset,
    source: Option<Bitmap>,
    transform: Transform,
    filter: InterpolationFilter,
    gesture: Gesture,
    issued_seq: u64,
    applied_seq: u64,
    outbox: Outbox,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(FormatCatalog::builtin())
    }
}

impl Compositor {
    /// Start with the catalog's first preset and no image.
    pub fn new(catalog: FormatCatalog) -> Self {
        let frame = catalog.default_preset().clone();
        Self {
            catalog,
            frame,
            source: None,
            transform: Transform::default(),
            filter: InterpolationFilter::default(),
            gesture: Gesture::Idle,
            issued_seq: 0,
            applied_seq: 0,
            outbox: Outbox::new(),
        }
    }

    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    pub fn frame(&self) -> &FormatPreset {
        &self.frame
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    pub fn source(&self) -> Option<&Bitmap> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn interpolation(&self) -> InterpolationFilter {
        self.filter
    }

    pub fn set_interpolation(&mut self, filter: InterpolationFilter) {
        self.filter = filter;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Hand every pending notification to the host.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    // ----- loading -----

    /// Accept or reject an upload by MIME type before its bytes are read.
    ///
    /// Rejection leaves all state untouched and queues an error notification.
    pub fn begin_load(&mut self, mime: &str) -> Result<LoadTicket, CompositorError> {
        if !decode::is_image_mime(mime) {
            log::warn!("rejected upload with MIME type {mime:?}");
            self.outbox.push(
                Notification::error("Invalid file type")
                    .with_description("Please choose an image file"),
            );
            return Err(CompositorError::InvalidFileType(mime.to_string()));
        }

        self.issued_seq += 1;
        log::debug!("load #{} started ({mime})", self.issued_seq);
        Ok(LoadTicket {
            seq: self.issued_seq,
            mime: mime.to_string(),
        })
    }

    /// Finish an upload started with [`begin_load`](Self::begin_load).
    ///
    /// Completions older than the last applied one are dropped without
    /// decoding, so a slow earlier upload can never overwrite a newer image.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: &[u8],
    ) -> Result<LoadOutcome, CompositorError> {
        if ticket.seq <= self.applied_seq {
            log::warn!(
                "dropping stale load #{} (already showing #{})",
                ticket.seq,
                self.applied_seq
            );
            return Ok(LoadOutcome::Stale);
        }

        let bitmap = match decode::decode_upload(&ticket.mime, bytes) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                log::warn!("load #{} failed: {err}", ticket.seq);
                self.outbox.push(
                    Notification::error("Could not read image").with_description(err.to_string()),
                );
                return Err(match err {
                    DecodeError::InvalidFileType(mime) => CompositorError::InvalidFileType(mime),
                    other => CompositorError::Decode(other),
                });
            }
        };

        self.applied_seq = ticket.seq;
        self.install_source(bitmap);
        Ok(LoadOutcome::Applied)
    }

    /// Validate, decode and install an upload in one step.
    pub fn load_image(&mut self, mime: &str, bytes: &[u8]) -> Result<(), CompositorError> {
        let ticket = self.begin_load(mime)?;
        self.complete_load(ticket, bytes).map(|_| ())
    }

    /// Install an already-decoded bitmap as the source.
    pub fn load_bitmap(&mut self, bitmap: Bitmap) {
        self.issued_seq += 1;
        self.applied_seq = self.issued_seq;
        self.install_source(bitmap);
    }

    fn install_source(&mut self, bitmap: Bitmap) {
        log::debug!(
            "source replaced: {}x{} into {} frame",
            bitmap.width,
            bitmap.height,
            self.frame.tag()
        );
        self.outbox.push(
            Notification::success("Image loaded")
                .with_description(format!("{} × {}", bitmap.width, bitmap.height)),
        );
        self.source = Some(bitmap);
        self.gesture.release();
        self.center_and_fit();
    }

    // ----- frame -----

    /// Switch the output frame. With an image loaded the previous transform
    /// is discarded and the image is fitted to the new frame.
    pub fn set_frame(
        &mut self,
        orientation: FrameOrientation,
        key: &str,
    ) -> Result<(), CompositorError> {
        let preset = self
            .catalog
            .lookup(orientation, key)
            .cloned()
            .ok_or_else(|| CompositorError::UnknownFormat {
                orientation,
                key: key.to_string(),
            })?;

        log::debug!("frame -> {} ({}x{})", preset.tag(), preset.width, preset.height);
        self.frame = preset;
        // Offsets are frame-relative; a drag spanning the switch would jump.
        self.gesture.release();
        self.center_and_fit();
        Ok(())
    }

    // ----- transform -----

    /// Fit and center the current image in the current frame, clearing
    /// rotation and flips. No-op without an image.
    pub fn center_and_fit(&mut self) {
        if let Some(src) = &self.source {
            self.transform = center_and_fit(src.width, src.height, self.frame.width, self.frame.height);
        }
    }

    /// Returns `false` (and does nothing) when no image is loaded.
    pub fn set_scale(&mut self, percent: f64) -> bool {
        if !self.has_image() {
            return false;
        }
        self.transform.set_scale(percent);
        true
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        if !self.has_image() {
            return false;
        }
        self.transform.translate(dx, dy);
        true
    }

    /// Zoom by one wheel notch if the pointer is over the canvas.
    ///
    /// Returns `true` when the event was consumed; the host should then
    /// suppress page scrolling. Events outside `canvas` never change scale.
    pub fn scale_by_wheel(
        &mut self,
        delta_y: f64,
        client_x: f64,
        client_y: f64,
        canvas: &ClientRect,
    ) -> bool {
        if !self.has_image() || !canvas.contains(client_x, client_y) {
            return false;
        }
        self.transform.step_scale(delta_y);
        true
    }

    pub fn rotate_90(&mut self) -> bool {
        if !self.has_image() {
            return false;
        }
        self.transform.rotate_90();
        true
    }

    pub fn flip_horizontal(&mut self) -> bool {
        if !self.has_image() {
            return false;
        }
        self.transform.flip_horizontal = !self.transform.flip_horizontal;
        true
    }

    pub fn flip_vertical(&mut self) -> bool {
        if !self.has_image() {
            return false;
        }
        self.transform.flip_vertical = !self.transform.flip_vertical;
        true
    }

    /// Back to the fitted, unrotated, unflipped placement.
    pub fn reset(&mut self) {
        self.center_and_fit();
    }

    // ----- pointer gestures -----

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, canvas: &ClientRect) {
        if !self.has_image() {
            return;
        }
        let at = canvas.to_canvas(client_x, client_y, self.frame.width, self.frame.height);
        self.gesture.press(at);
    }

    /// Drag the image while a gesture is active. Returns whether it moved.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, canvas: &ClientRect) -> bool {
        let at = canvas.to_canvas(client_x, client_y, self.frame.width, self.frame.height);
        match self.gesture.drag_to(at) {
            Some(delta) => self.translate(delta.x, delta.y),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.release();
    }

    pub fn pointer_leave(&mut self) {
        self.gesture.release();
    }

    // ----- output -----

    /// Describe the current frame without painting it.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::new(
            self.frame.width,
            self.frame.height,
            self.source.as_ref().map(|s| (s.width, s.height)),
            &self.transform,
        )
    }

    /// Paint the current frame.
    pub fn render(&self) -> Bitmap {
        rasterize(&self.render_plan(), self.source.as_ref(), self.filter)
    }

    /// Encode the rendered frame for download.
    ///
    /// Fails with `NoImageLoaded` (and queues an error notification) when
    /// there is nothing to export; no artifact is produced in that case.
    pub fn export(
        &mut self,
        encoding: ExportEncoding,
        timestamp_ms: u64,
    ) -> Result<ExportArtifact, CompositorError> {
        if !self.has_image() {
            self.outbox.push(
                Notification::error("No image loaded")
                    .with_description("Upload an image before exporting"),
            );
            return Err(CompositorError::NoImageLoaded);
        }

        let frame = self.render();
        let background = [BACKGROUND[0], BACKGROUND[1], BACKGROUND[2]];
        let bytes = match encoding.encode(&frame, background) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.outbox.push(
                    Notification::error("Export failed").with_description(err.to_string()),
                );
                return Err(err.into());
            }
        };

        let file_name = export_file_name(
            &format!("frame-{}", self.frame.tag()),
            timestamp_ms,
            encoding.extension(),
        );
        log::debug!("exported {file_name} ({} bytes)", bytes.len());
        self.outbox
            .push(Notification::success("Image saved").with_description(file_name.clone()));

        Ok(ExportArtifact {
            file_name,
            mime_type: encoding.mime_type().to_string(),
            bytes,
        })
    }
}
