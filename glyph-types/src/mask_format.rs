//! The pixel encoding of a glyph image.

/// Describes how the pixels of a glyph image are laid out.
///
/// The discriminants are the values used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MaskFormat {
    /// One bit per pixel, rows padded to a whole byte.
    Bw = 0,
    /// 8-bit coverage.
    A8 = 1,
    /// 16-bit RGB565 subpixel coverage.
    Lcd16 = 2,
    /// 32-bit premultiplied color.
    Argb32 = 3,
    /// 8-bit signed distance field.
    Sdf = 4,
    /// The glyph is only ever drawn from its outline and has no image.
    PathOnly = 5,
    /// No scaler has computed a format for this glyph yet.
    #[default]
    NotComputed = 0xFF,
}

/// A mask format tag outside of the known enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMaskFormat(pub u8);

impl MaskFormat {
    /// The number of bytes used by a single pixel, or `None` for formats that
    /// have no pixel layout.
    ///
    /// [`MaskFormat::Bw`] packs eight pixels into a byte and reports `Some(0)`;
    /// use [`min_row_bytes`](Self::min_row_bytes) to size rows.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Bw => Some(0),
            Self::A8 | Self::Sdf => Some(1),
            Self::Lcd16 => Some(2),
            Self::Argb32 => Some(4),
            Self::PathOnly | Self::NotComputed => None,
        }
    }

    /// The smallest row stride able to hold `width` pixels in this format.
    ///
    /// Returns `None` if the format has no pixel layout or the stride does
    /// not fit in a `usize`.
    pub fn min_row_bytes(self, width: usize) -> Option<usize> {
        match self {
            Self::Bw => Some(width.div_ceil(8)),
            _ => self.bytes_per_pixel()?.checked_mul(width),
        }
    }

    /// `true` if this format carries its own color.
    pub const fn is_color(self) -> bool {
        matches!(self, Self::Argb32)
    }

    /// `true` if images can be attached in this format.
    pub const fn has_pixels(self) -> bool {
        self.bytes_per_pixel().is_some()
    }

    /// The wire tag for this format.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MaskFormat {
    type Error = InvalidMaskFormat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Bw,
            1 => Self::A8,
            2 => Self::Lcd16,
            3 => Self::Argb32,
            4 => Self::Sdf,
            5 => Self::PathOnly,
            0xFF => Self::NotComputed,
            other => return Err(InvalidMaskFormat(other)),
        })
    }
}

impl std::fmt::Display for InvalidMaskFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid mask format {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidMaskFormat {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for format in [
            MaskFormat::Bw,
            MaskFormat::A8,
            MaskFormat::Lcd16,
            MaskFormat::Argb32,
            MaskFormat::Sdf,
            MaskFormat::PathOnly,
            MaskFormat::NotComputed,
        ] {
            assert_eq!(MaskFormat::try_from(format.to_u8()), Ok(format));
        }
        assert_eq!(MaskFormat::try_from(6), Err(InvalidMaskFormat(6)));
        assert_eq!(MaskFormat::try_from(0xFE), Err(InvalidMaskFormat(0xFE)));
    }

    #[test]
    fn row_bytes() {
        assert_eq!(MaskFormat::Bw.min_row_bytes(9), Some(2));
        assert_eq!(MaskFormat::Bw.min_row_bytes(8), Some(1));
        assert_eq!(MaskFormat::A8.min_row_bytes(8), Some(8));
        assert_eq!(MaskFormat::Lcd16.min_row_bytes(3), Some(6));
        assert_eq!(MaskFormat::Argb32.min_row_bytes(3), Some(12));
        assert_eq!(MaskFormat::PathOnly.min_row_bytes(3), None);
        assert_eq!(MaskFormat::Argb32.min_row_bytes(usize::MAX), None);
    }

    #[test]
    fn color_and_pixels() {
        assert!(MaskFormat::Argb32.is_color());
        assert!(!MaskFormat::A8.is_color());
        assert!(!MaskFormat::NotComputed.has_pixels());
        assert!(MaskFormat::Bw.has_pixels());
        assert_eq!(MaskFormat::default(), MaskFormat::NotComputed);
    }
}
