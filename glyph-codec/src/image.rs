//! Bitmap glyph payloads
//!
//! Block layout:
//!
//! | type  | name       |
//! |-------|------------|
//! | i32   | width      |
//! | i32   | height     |
//! | i32   | row_bytes  |
//! | u8    | format     |
//! | [u8]  | pixels, `height * row_bytes` bytes |

use types::MaskFormat;

use crate::arena::GlyphArena;
use crate::error::AttachError;
use crate::metrics::{check_wire_range, read_dimension, read_mask_format, GlyphMetrics};
use crate::read::{ReadBuffer, ReadError};
use crate::write::{WireWrite, WriteBuffer};

/// The size of the image block header.
const HEADER_LEN: usize = 4 * 3 + 1;

/// Pixel data for a glyph, stored in an arena.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GlyphImage<'a> {
    width: u32,
    height: u32,
    row_bytes: usize,
    format: MaskFormat,
    pixels: &'a [u8],
}

impl<'a> GlyphImage<'a> {
    /// Copy `pixels` with stride `row_bytes` into `arena`, validating them
    /// against `metrics`.
    pub(crate) fn copy_into(
        arena: &mut impl GlyphArena<'a>,
        metrics: &GlyphMetrics,
        pixels: &[u8],
        row_bytes: usize,
    ) -> Result<Self, AttachError> {
        if metrics.image_too_large() {
            return Err(AttachError::ImageTooLarge {
                width: metrics.width,
                height: metrics.height,
            });
        }
        let min = metrics
            .min_row_bytes()
            .ok_or(AttachError::NoPixelLayout(metrics.mask_format))?;
        if row_bytes < min {
            return Err(AttachError::RowBytesTooSmall { row_bytes, min });
        }
        check_wire_range("row bytes", row_bytes as u64)?;
        let expected = row_bytes
            .checked_mul(metrics.height as usize)
            .ok_or(AttachError::ImageTooLarge {
                width: metrics.width,
                height: metrics.height,
            })?;
        let source = pixels
            .get(..expected)
            .ok_or(AttachError::ImageDataTooShort {
                expected,
                actual: pixels.len(),
            })?;
        let storage = arena.allocate(expected)?;
        storage.copy_from_slice(source);
        Ok(GlyphImage {
            width: metrics.width,
            height: metrics.height,
            row_bytes,
            format: metrics.mask_format,
            pixels: storage,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The distance in bytes between the starts of consecutive rows.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    pub fn format(&self) -> MaskFormat {
        self.format
    }

    /// All pixel bytes, including any row padding.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// The pixels of row `y`, without padding.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let len = self.format.min_row_bytes(self.width as usize)?;
        let start = (y as usize).checked_mul(self.row_bytes)?;
        self.pixels.get(start..start.checked_add(len)?)
    }

    /// An iterator over the unpadded rows of the image.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.height).filter_map(|y| self.row(y))
    }
}

impl std::fmt::Debug for GlyphImage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("row_bytes", &self.row_bytes)
            .field("format", &self.format)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

impl WireWrite for GlyphImage<'_> {
    fn write_into(&self, writer: &mut WriteBuffer) {
        // every field was checked against the i32 range when attached or read
        (self.width as i32).write_into(writer);
        (self.height as i32).write_into(writer);
        (self.row_bytes as i32).write_into(writer);
        self.format.to_u8().write_into(writer);
        writer.write_slice(self.pixels);
    }
}

/// Block header fields shared by decoding and skipping.
struct ImageHeader {
    width: u32,
    height: u32,
    row_bytes: usize,
    format: MaskFormat,
}

impl ImageHeader {
    fn read(buf: &mut ReadBuffer) -> Result<Self, ReadError> {
        buf.ensure_remaining(HEADER_LEN)?;
        let width = read_dimension(buf)?;
        let height = read_dimension(buf)?;
        let row_bytes = read_dimension(buf)? as usize;
        let format = read_mask_format(buf)?;
        Ok(ImageHeader {
            width,
            height,
            row_bytes,
            format,
        })
    }

    /// Check the stride and return the number of pixel bytes that follow.
    fn pixel_len(&self, buf: &mut ReadBuffer) -> Result<usize, ReadError> {
        let Some(min) = self.format.min_row_bytes(self.width as usize) else {
            return Err(buf.fail(ReadError::malformed("mask format has no pixel layout")));
        };
        if self.row_bytes < min {
            return Err(buf.fail(ReadError::malformed("row bytes less than width")));
        }
        let len = self
            .row_bytes
            .checked_mul(self.height as usize)
            .ok_or_else(|| buf.fail(ReadError::Truncated))?;
        buf.ensure_remaining(len)?;
        Ok(len)
    }
}

/// Decode an image block for a glyph with `metrics`, storing the pixels in
/// `arena`.
pub(crate) fn read_image<'a>(
    buf: &mut ReadBuffer,
    metrics: &GlyphMetrics,
    arena: &mut impl GlyphArena<'a>,
) -> Result<GlyphImage<'a>, ReadError> {
    let header = ImageHeader::read(buf)?;
    if header.width != metrics.width
        || header.height != metrics.height
        || header.format != metrics.mask_format
    {
        return Err(buf.fail(ReadError::malformed("image does not match glyph metrics")));
    }
    if metrics.image_too_large() {
        return Err(buf.fail(ReadError::malformed("image too large")));
    }
    let len = header.pixel_len(buf)?;
    let storage = arena.allocate(len).map_err(|e| buf.fail(e.into()))?;
    storage.copy_from_slice(buf.read_bytes(len)?);
    Ok(GlyphImage {
        width: header.width,
        height: header.height,
        row_bytes: header.row_bytes,
        format: header.format,
        pixels: storage,
    })
}

/// Step over an image block, validating only its framing.
pub(crate) fn skip_image(buf: &mut ReadBuffer) -> Result<(), ReadError> {
    let header = ImageHeader::read(buf)?;
    let len = header.pixel_len(buf)?;
    buf.skip(len)
}
