//! Glyph Identifiers
//!
//! A rasterized glyph is identified by the font's glyph index together with
//! the sub-pixel phase it was rendered at. The two are packed into a single
//! `u32` that is only ever used as a key.

/// A 16-bit glyph identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u16);

impl GlyphId {
    /// The identifier reserved for unknown glyphs
    pub const NOTDEF: GlyphId = GlyphId(0);

    /// Construct a new `GlyphId`.
    pub const fn new(raw: u16) -> Self {
        GlyphId(raw)
    }

    /// The identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl Default for GlyphId {
    fn default() -> Self {
        GlyphId::NOTDEF
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}

impl From<u16> for GlyphId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

crate::raw::newtype_scalar!(GlyphId, [u8; 2]);

/// A glyph identifier packed with its sub-pixel position.
///
/// Layout, from the least significant bit:
///
/// | bits   | contents           |
/// |--------|--------------------|
/// | 0..16  | glyph index        |
/// | 16..18 | sub-pixel x phase  |
/// | 18..20 | sub-pixel y phase  |
///
/// Values read from the wire are kept verbatim, including any bits above
/// this layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedGlyphId(u32);

impl PackedGlyphId {
    /// Number of bits used for each sub-pixel phase.
    pub const SUB_PIXEL_BITS: u32 = 2;

    const GLYPH_MASK: u32 = 0xFFFF;
    const SUB_PIXEL_MASK: u32 = (1 << Self::SUB_PIXEL_BITS) - 1;
    const SUB_PIXEL_X_SHIFT: u32 = 16;
    const SUB_PIXEL_Y_SHIFT: u32 = Self::SUB_PIXEL_X_SHIFT + Self::SUB_PIXEL_BITS;

    /// An identifier for a glyph rendered at the integer pixel origin.
    pub const fn new(glyph_id: GlyphId) -> Self {
        Self(glyph_id.to_u16() as u32)
    }

    /// An identifier with sub-pixel phases; only the low
    /// [`SUB_PIXEL_BITS`](Self::SUB_PIXEL_BITS) of each phase are kept.
    pub const fn with_sub_pixel(glyph_id: GlyphId, x_phase: u8, y_phase: u8) -> Self {
        let x = (x_phase as u32 & Self::SUB_PIXEL_MASK) << Self::SUB_PIXEL_X_SHIFT;
        let y = (y_phase as u32 & Self::SUB_PIXEL_MASK) << Self::SUB_PIXEL_Y_SHIFT;
        Self(glyph_id.to_u16() as u32 | x | y)
    }

    /// Reconstruct an identifier from its packed value.
    pub const fn from_u32(packed: u32) -> Self {
        Self(packed)
    }

    /// The packed value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    pub const fn glyph_id(self) -> GlyphId {
        GlyphId::new((self.0 & Self::GLYPH_MASK) as u16)
    }

    pub const fn sub_pixel_x(self) -> u8 {
        ((self.0 >> Self::SUB_PIXEL_X_SHIFT) & Self::SUB_PIXEL_MASK) as u8
    }

    pub const fn sub_pixel_y(self) -> u8 {
        ((self.0 >> Self::SUB_PIXEL_Y_SHIFT) & Self::SUB_PIXEL_MASK) as u8
    }
}

impl From<GlyphId> for PackedGlyphId {
    fn from(value: GlyphId) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for PackedGlyphId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}@({}, {})",
            self.glyph_id(),
            self.sub_pixel_x(),
            self.sub_pixel_y()
        )
    }
}

crate::raw::newtype_scalar!(PackedGlyphId, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;
    use std::string::ToString;

    #[test]
    fn pack_and_unpack() {
        let id = PackedGlyphId::with_sub_pixel(GlyphId::new(12), 3, 1);
        assert_eq!(id.glyph_id(), GlyphId::new(12));
        assert_eq!(id.sub_pixel_x(), 3);
        assert_eq!(id.sub_pixel_y(), 1);
        assert_eq!(id.to_u32(), 12 | (3 << 16) | (1 << 18));
    }

    #[test]
    fn phases_are_masked() {
        let id = PackedGlyphId::with_sub_pixel(GlyphId::new(1), 0xFF, 4);
        assert_eq!(id.sub_pixel_x(), 3);
        assert_eq!(id.sub_pixel_y(), 0);
    }

    #[test]
    fn opaque_bits_survive() {
        let id = PackedGlyphId::from_u32(0xdead_beef);
        assert_eq!(PackedGlyphId::from_raw(id.to_raw()), id);
        assert_eq!(id.to_raw(), [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn display() {
        let id = PackedGlyphId::with_sub_pixel(GlyphId::new(7), 2, 0);
        assert_eq!(id.to_string(), "GID_7@(2, 0)");
    }
}
