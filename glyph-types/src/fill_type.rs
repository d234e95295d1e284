//! Outline fill rules.

/// The rule used to decide which regions of an outline are filled.
///
/// The discriminants are the values used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FillType {
    /// Non-zero winding number.
    #[default]
    Winding = 0,
    EvenOdd = 1,
    /// Fills the area outside of the winding region.
    InverseWinding = 2,
    InverseEvenOdd = 3,
}

impl FillType {
    pub const fn is_inverse(self) -> bool {
        matches!(self, Self::InverseWinding | Self::InverseEvenOdd)
    }

    pub const fn is_even_odd(self) -> bool {
        matches!(self, Self::EvenOdd | Self::InverseEvenOdd)
    }

    /// Attempt to interpret a wire tag.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Winding),
            1 => Some(Self::EvenOdd),
            2 => Some(Self::InverseWinding),
            3 => Some(Self::InverseEvenOdd),
            _ => None,
        }
    }

    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::FillType;

    #[test]
    fn wire_tags() {
        for tag in 0..4u8 {
            assert_eq!(FillType::from_u8(tag).map(FillType::to_u8), Some(tag));
        }
        assert_eq!(FillType::from_u8(4), None);
        assert!(FillType::InverseEvenOdd.is_inverse());
        assert!(FillType::InverseEvenOdd.is_even_odd());
        assert!(!FillType::Winding.is_even_odd());
    }
}
