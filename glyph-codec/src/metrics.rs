//! Glyph placement and sizing

use types::{Fixed, GlyphRect, MaskFormat, Point, MAX_GLYPH_DIMENSION};

use crate::error::AttachError;
use crate::read::{ReadBuffer, ReadError, WireRead};
use crate::write::{WireWrite, WriteBuffer};

/// Layout information for a rendered glyph.
///
/// `left` and `top` locate the image relative to the pen position, in a y-down
/// coordinate system; `width` and `height` are the image extent in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    pub advance: Point<Fixed>,
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub mask_format: MaskFormat,
}

impl GlyphMetrics {
    /// The encoded size of the metrics record, excluding the glyph identifier.
    pub const RAW_BYTE_LEN: usize = 4 * 6 + 1;

    /// The area covered by the glyph image.
    pub fn rect(&self) -> GlyphRect {
        GlyphRect::from_origin_size(self.left, self.top, self.width, self.height)
    }

    /// `true` if the glyph covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` if either dimension is too large to be stored as an image.
    pub fn image_too_large(&self) -> bool {
        self.width >= MAX_GLYPH_DIMENSION || self.height >= MAX_GLYPH_DIMENSION
    }

    pub fn is_color(&self) -> bool {
        self.mask_format.is_color()
    }

    /// The tightly packed row stride for this glyph's image.
    pub fn min_row_bytes(&self) -> Option<usize> {
        self.mask_format.min_row_bytes(self.width as usize)
    }

    /// The number of pixel bytes in a tightly packed image of this glyph.
    pub fn image_size(&self) -> Option<usize> {
        self.min_row_bytes()?.checked_mul(self.height as usize)
    }

    /// Fail if `width` or `height` cannot be written as an `i32`.
    pub(crate) fn check_wire_range(&self) -> Result<(), AttachError> {
        check_wire_range("width", self.width as u64)?;
        check_wire_range("height", self.height as u64)
    }
}

/// Fail if `value` does not fit a signed 32-bit wire field.
pub(crate) fn check_wire_range(field: &'static str, value: u64) -> Result<(), AttachError> {
    if value > i32::MAX as u64 {
        return Err(AttachError::OutOfWireRange { field, value });
    }
    Ok(())
}

impl WireWrite for GlyphMetrics {
    fn write_into(&self, writer: &mut WriteBuffer) {
        self.advance.write_into(writer);
        self.left.write_into(writer);
        self.top.write_into(writer);
        // dimensions share the signed wire representation of image blocks;
        // glyphs refuse metrics that do not fit
        (self.width as i32).write_into(writer);
        (self.height as i32).write_into(writer);
        self.mask_format.to_u8().write_into(writer);
    }
}

impl<'a> WireRead<'a> for GlyphMetrics {
    fn read(buf: &mut ReadBuffer<'a>) -> Result<Self, ReadError> {
        buf.ensure_remaining(Self::RAW_BYTE_LEN)?;
        let advance = Point::new(buf.read::<Fixed>()?, buf.read::<Fixed>()?);
        let left = buf.read::<i32>()?;
        let top = buf.read::<i32>()?;
        let width = read_dimension(buf)?;
        let height = read_dimension(buf)?;
        let mask_format = read_mask_format(buf)?;
        Ok(GlyphMetrics {
            advance,
            left,
            top,
            width,
            height,
            mask_format,
        })
    }
}

/// Read a signed 32-bit dimension, rejecting negative values.
pub(crate) fn read_dimension(buf: &mut ReadBuffer) -> Result<u32, ReadError> {
    let value = buf.read::<i32>()?;
    u32::try_from(value).map_err(|_| buf.fail(ReadError::malformed("negative dimension")))
}

pub(crate) fn read_mask_format(buf: &mut ReadBuffer) -> Result<MaskFormat, ReadError> {
    let raw = buf.read::<u8>()?;
    MaskFormat::try_from(raw).map_err(|e| buf.fail(ReadError::unknown_tag(e.0)))
}
