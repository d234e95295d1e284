//! A rendered glyph and its lifecycle

use std::sync::Arc;

use types::{Fixed, GlyphRect, MaskFormat, PackedGlyphId, Point};

use crate::arena::GlyphArena;
use crate::drawable::{self, Drawable, DrawableRegistry};
use crate::error::{AttachError, WriteError};
use crate::image::{self, GlyphImage};
use crate::metrics::GlyphMetrics;
use crate::path::{self, GlyphPath};
use crate::read::{ReadBuffer, ReadError, WireRead};
use crate::write::{WireWrite, WriteBuffer};

/// The kinds of payload a glyph can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Image,
    Path,
    Drawable,
}

impl PayloadKind {
    /// Step over a block of this kind without decoding it.
    ///
    /// Only the framing is validated. On error `buf` is marked invalid.
    pub fn skip(self, buf: &mut ReadBuffer) -> Result<(), ReadError> {
        buf.guarded(|buf| match self {
            PayloadKind::Image => image::skip_image(buf),
            PayloadKind::Path => path::skip_path(buf),
            PayloadKind::Drawable => drawable::skip_drawable(buf),
        })
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PayloadKind::Image => "image",
            PayloadKind::Path => "path",
            PayloadKind::Drawable => "drawable",
        };
        f.write_str(name)
    }
}

/// The representation attached to a glyph, if any.
#[derive(Clone, Debug, Default)]
pub enum Payload<'a> {
    #[default]
    None,
    Image(GlyphImage<'a>),
    Path(GlyphPath),
    Drawable(Arc<dyn Drawable>),
}

impl Payload<'_> {
    pub fn kind(&self) -> Option<PayloadKind> {
        match self {
            Payload::None => None,
            Payload::Image(_) => Some(PayloadKind::Image),
            Payload::Path(_) => Some(PayloadKind::Path),
            Payload::Drawable(_) => Some(PayloadKind::Drawable),
        }
    }
}

/// Where a glyph is in its lifecycle.
///
/// A glyph starts with only its identifier, gains metrics exactly once, and
/// then at most one payload. Every payload state is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphState {
    IdentityOnly,
    MetricsSet,
    ImageSet,
    PathSet,
    DrawableSet,
}

/// A rasterized glyph: its identifier, metrics, and optional payload.
///
/// Image pixels are borrowed from an arena for `'a`; outlines and drawables
/// own their data.
#[derive(Clone, Debug)]
pub struct Glyph<'a> {
    id: PackedGlyphId,
    metrics: GlyphMetrics,
    has_metrics: bool,
    payload: Payload<'a>,
}

impl<'a> Glyph<'a> {
    /// The encoded size of the identifier and metrics record.
    pub const METRICS_BYTE_LEN: usize = 4 + GlyphMetrics::RAW_BYTE_LEN;

    /// A glyph with an identifier and nothing else.
    pub fn new(id: PackedGlyphId) -> Self {
        Glyph {
            id,
            metrics: GlyphMetrics::default(),
            has_metrics: false,
            payload: Payload::None,
        }
    }

    /// A glyph with its metrics already set.
    pub fn with_metrics(id: PackedGlyphId, metrics: GlyphMetrics) -> Result<Self, AttachError> {
        let mut glyph = Glyph::new(id);
        glyph.set_metrics(metrics)?;
        Ok(glyph)
    }

    /// Set the glyph's metrics. This may only be done once.
    ///
    /// Dimensions above `i32::MAX` are rejected, since they cannot be encoded.
    pub fn set_metrics(&mut self, metrics: GlyphMetrics) -> Result<(), AttachError> {
        if self.has_metrics {
            return Err(AttachError::MetricsAlreadySet);
        }
        metrics.check_wire_range()?;
        self.metrics = metrics;
        self.has_metrics = true;
        Ok(())
    }

    /// Attach a tightly packed image, copying `pixels` into `arena`.
    pub fn set_image(
        &mut self,
        arena: &mut impl GlyphArena<'a>,
        pixels: &[u8],
    ) -> Result<(), AttachError> {
        self.check_can_attach()?;
        let row_bytes = self
            .metrics
            .min_row_bytes()
            .ok_or(AttachError::NoPixelLayout(self.metrics.mask_format))?;
        self.set_image_with_row_bytes(arena, pixels, row_bytes)
    }

    /// Attach an image whose rows are `row_bytes` apart, copying `pixels`
    /// into `arena`.
    ///
    /// The image takes its dimensions and format from the glyph's metrics.
    pub fn set_image_with_row_bytes(
        &mut self,
        arena: &mut impl GlyphArena<'a>,
        pixels: &[u8],
        row_bytes: usize,
    ) -> Result<(), AttachError> {
        self.check_can_attach()?;
        let image = GlyphImage::copy_into(arena, &self.metrics, pixels, row_bytes)?;
        self.payload = Payload::Image(image);
        Ok(())
    }

    pub fn set_path(&mut self, path: GlyphPath) -> Result<(), AttachError> {
        self.check_can_attach()?;
        self.payload = Payload::Path(path);
        Ok(())
    }

    pub fn set_drawable(&mut self, drawable: Arc<dyn Drawable>) -> Result<(), AttachError> {
        self.check_can_attach()?;
        self.payload = Payload::Drawable(drawable);
        Ok(())
    }

    fn check_can_attach(&self) -> Result<(), AttachError> {
        if !self.has_metrics {
            return Err(AttachError::MetricsNotSet);
        }
        match self.payload.kind() {
            Some(kind) => Err(AttachError::PayloadAlreadySet(kind)),
            None => Ok(()),
        }
    }

    pub fn id(&self) -> PackedGlyphId {
        self.id
    }

    /// The glyph's metrics, or `None` if they have not been set.
    pub fn metrics(&self) -> Option<&GlyphMetrics> {
        self.has_metrics.then_some(&self.metrics)
    }

    pub fn advance(&self) -> Point<Fixed> {
        self.metrics.advance
    }

    pub fn rect(&self) -> GlyphRect {
        self.metrics.rect()
    }

    pub fn mask_format(&self) -> MaskFormat {
        self.metrics.mask_format
    }

    pub fn width(&self) -> u32 {
        self.metrics.width
    }

    pub fn height(&self) -> u32 {
        self.metrics.height
    }

    pub fn left(&self) -> i32 {
        self.metrics.left
    }

    pub fn top(&self) -> i32 {
        self.metrics.top
    }

    /// `true` if the glyph covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// The row stride of the attached image, or of a tightly packed image
    /// if none is attached.
    pub fn row_bytes(&self) -> usize {
        match &self.payload {
            Payload::Image(image) => image.row_bytes(),
            _ => self.metrics.min_row_bytes().unwrap_or(0),
        }
    }

    /// The number of pixel bytes of the attached image, or of a tightly
    /// packed image if none is attached.
    pub fn image_size(&self) -> usize {
        match &self.payload {
            Payload::Image(image) => image.pixels().len(),
            _ => self.metrics.image_size().unwrap_or(0),
        }
    }

    pub fn state(&self) -> GlyphState {
        match (&self.payload, self.has_metrics) {
            (Payload::Image(_), _) => GlyphState::ImageSet,
            (Payload::Path(_), _) => GlyphState::PathSet,
            (Payload::Drawable(_), _) => GlyphState::DrawableSet,
            (Payload::None, true) => GlyphState::MetricsSet,
            (Payload::None, false) => GlyphState::IdentityOnly,
        }
    }

    pub fn payload(&self) -> &Payload<'a> {
        &self.payload
    }

    pub fn image(&self) -> Option<&GlyphImage<'a>> {
        match &self.payload {
            Payload::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&GlyphPath> {
        match &self.payload {
            Payload::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn drawable(&self) -> Option<&Arc<dyn Drawable>> {
        match &self.payload {
            Payload::Drawable(drawable) => Some(drawable),
            _ => None,
        }
    }

    pub fn image_is_set(&self) -> bool {
        self.image().is_some()
    }

    pub fn path_is_set(&self) -> bool {
        self.path().is_some()
    }

    pub fn drawable_is_set(&self) -> bool {
        self.drawable().is_some()
    }

    /// Write the identifier and metrics record.
    pub fn write_metrics(&self, writer: &mut WriteBuffer) {
        self.id.write_into(writer);
        self.metrics.write_into(writer);
    }

    /// Write the image block.
    pub fn write_image(&self, writer: &mut WriteBuffer) -> Result<(), WriteError> {
        let image = self
            .image()
            .ok_or(WriteError::PayloadNotSet(PayloadKind::Image))?;
        image.write_into(writer);
        Ok(())
    }

    /// Write the path block.
    pub fn write_path(&self, writer: &mut WriteBuffer) -> Result<(), WriteError> {
        let path = self
            .path()
            .ok_or(WriteError::PayloadNotSet(PayloadKind::Path))?;
        path.write_into(writer);
        Ok(())
    }

    /// Write the drawable block.
    pub fn write_drawable(&self, writer: &mut WriteBuffer) -> Result<(), WriteError> {
        let drawable = self
            .drawable()
            .ok_or(WriteError::PayloadNotSet(PayloadKind::Drawable))?;
        if !drawable::write_drawable(drawable.as_ref(), writer) {
            return Err(WriteError::BlockTooLarge(PayloadKind::Drawable));
        }
        Ok(())
    }

    /// Read a glyph identifier and metrics record.
    ///
    /// The returned glyph has metrics and no payload.
    pub fn from_buffer(buf: &mut ReadBuffer) -> Result<Self, ReadError> {
        let result = buf.guarded(|buf| {
            buf.ensure_remaining(Self::METRICS_BYTE_LEN)?;
            let id = buf.read::<PackedGlyphId>()?;
            let metrics = GlyphMetrics::read(buf)?;
            Ok(Glyph {
                id,
                metrics,
                has_metrics: true,
                payload: Payload::None,
            })
        });
        if let Err(e) = &result {
            log::debug!("failed to decode glyph metrics: {e}");
        }
        result
    }

    /// Read an image block, storing its pixels in `arena`.
    ///
    /// The image must agree with the glyph's metrics. On failure the glyph
    /// keeps no image, `buf` is marked invalid, and its position is
    /// unspecified.
    pub fn add_image_from_buffer(
        &mut self,
        buf: &mut ReadBuffer,
        arena: &mut impl GlyphArena<'a>,
    ) -> Result<(), ReadError> {
        self.check_can_decode()?;
        let metrics = self.metrics;
        let image = self.log_failure(
            PayloadKind::Image,
            buf.guarded(|buf| image::read_image(buf, &metrics, arena)),
        )?;
        self.payload = Payload::Image(image);
        Ok(())
    }

    /// Read a path block.
    ///
    /// On failure the glyph keeps no path, `buf` is marked invalid, and its
    /// position is unspecified.
    pub fn add_path_from_buffer(&mut self, buf: &mut ReadBuffer) -> Result<(), ReadError> {
        self.check_can_decode()?;
        let path = self.log_failure(PayloadKind::Path, buf.guarded(GlyphPath::read))?;
        self.payload = Payload::Path(path);
        Ok(())
    }

    /// Read a drawable block, decoding its body with the matching decoder
    /// in `registry`.
    ///
    /// On failure the glyph keeps no drawable, `buf` is marked invalid, and
    /// its position is unspecified.
    pub fn add_drawable_from_buffer(
        &mut self,
        buf: &mut ReadBuffer,
        registry: &DrawableRegistry,
    ) -> Result<(), ReadError> {
        self.check_can_decode()?;
        let drawable = self.log_failure(
            PayloadKind::Drawable,
            buf.guarded(|buf| drawable::read_drawable(buf, registry)),
        )?;
        self.payload = Payload::Drawable(drawable);
        Ok(())
    }

    /// Step over an image block.
    pub fn skip_image(buf: &mut ReadBuffer) -> Result<(), ReadError> {
        PayloadKind::Image.skip(buf)
    }

    /// Step over a path block.
    pub fn skip_path(buf: &mut ReadBuffer) -> Result<(), ReadError> {
        PayloadKind::Path.skip(buf)
    }

    /// Step over a drawable block.
    pub fn skip_drawable(buf: &mut ReadBuffer) -> Result<(), ReadError> {
        PayloadKind::Drawable.skip(buf)
    }

    // checked before touching the buffer, so failures here leave it valid
    fn check_can_decode(&self) -> Result<(), ReadError> {
        if let Some(kind) = self.payload.kind() {
            return Err(ReadError::PayloadAlreadySet(kind));
        }
        if !self.has_metrics {
            return Err(ReadError::MetricsNotSet);
        }
        Ok(())
    }

    fn log_failure<T>(
        &self,
        kind: PayloadKind,
        result: Result<T, ReadError>,
    ) -> Result<T, ReadError> {
        if let Err(e) = &result {
            log::debug!("failed to decode {kind} for glyph {}: {e}", self.id);
        }
        result
    }
}
