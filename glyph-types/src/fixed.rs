//! fixed-point numerical types

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Glyph advances and bounding rectangles are expressed in this type so that
/// accumulating metrics is exact and platform independent.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Self = Self(i32::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i32::MAX);

    /// Representation of 0.0.
    pub const ZERO: Self = Self(0);

    /// Representation of 1.0.
    pub const ONE: Self = Self(Self::ONE_BITS);

    const ONE_BITS: i32 = 1 << Self::FRACT_BITS;
    const FRACT_BITS: u32 = 16;

    /// Creates a fixed point value from an integer.
    ///
    /// Integers outside of the representable range saturate to [`Fixed::MIN`]
    /// or [`Fixed::MAX`].
    pub const fn from_i32(i: i32) -> Self {
        Self(i.saturating_mul(Self::ONE_BITS))
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Creates a fixed point value from an f64.
    ///
    /// This operation is lossy; the float will be rounded to the nearest
    /// representable value.
    pub fn from_f64(x: f64) -> Self {
        #[cfg(any(feature = "std", test))]
        return Self((x * Self::ONE_BITS as f64).round() as _);
        //NOTE: not exactly equivalent, but we still round *away from zero*.
        #[cfg(all(not(feature = "std"), not(test)))]
        Self((x * Self::ONE_BITS as f64 + (0.5 * (-1.0 * x.is_sign_negative() as u8 as f64))) as _)
    }

    /// Returns the value as an f64.
    ///
    /// This operation is lossless: all representable values can be
    /// round-tripped.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::ONE_BITS as f64
    }
}

//hack: we can losslessly go to float, so use those fmt impls
impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.to_f64(), f)
    }
}

crate::raw::newtype_scalar!(Fixed, [u8; 4]);

#[cfg(test)]
mod tests {
    #![allow(overflowing_literals)] // we want to specify byte values directly
    use super::*;
    use crate::Scalar;

    #[test]
    fn fixed_floats() {
        assert_eq!(Fixed(0x7fff_0000), Fixed::from_f64(32767.));
        assert_eq!(Fixed(0x7fff_ffff), Fixed::from_f64(32767.99998));
        assert_eq!(Fixed(0x0001_0000), Fixed::from_f64(1.0));
        assert_eq!(Fixed(0x0000_8000), Fixed::from_f64(0.5));
        assert_eq!(Fixed(0xffff_0000), Fixed::from_f64(-1.0));
        assert_eq!(Fixed(0xffff_8000), Fixed::from_f64(-0.5));
    }

    #[test]
    fn integers_saturate() {
        assert_eq!(Fixed::from_i32(10), Fixed(10 << 16));
        assert_eq!(Fixed::from_i32(-2), Fixed::from_f64(-2.0));
        assert_eq!(Fixed::from_i32(40_000), Fixed::MAX);
        assert_eq!(Fixed::from_i32(-40_000), Fixed::MIN);
    }

    #[test]
    fn saturating_ops() {
        assert_eq!(Fixed::MAX.saturating_add(Fixed::ONE), Fixed::MAX);
        assert_eq!(Fixed::MIN.saturating_sub(Fixed::ONE), Fixed::MIN);
        assert_eq!(
            Fixed::from_f64(2.75).saturating_sub(Fixed::from_f64(0.5)),
            Fixed::from_f64(2.25)
        );
    }

    #[test]
    fn roundtrip_f64() {
        for bits in [i32::MIN, -65537, -1, 0, 1, 0x1234_5678, i32::MAX] {
            let val = Fixed(bits);
            assert_eq!(val, Fixed::from_f64(val.to_f64()));
        }
    }

    #[test]
    fn raw_bytes() {
        assert_eq!(Fixed::from_i32(10).to_raw(), [0, 10, 0, 0]);
        assert_eq!(Fixed::from_raw([0xff, 0xfe, 0x80, 0x00]), Fixed::from_f64(-1.5));
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn pod_layout() {
        let bits: [i32; 2] = bytemuck::cast([Fixed::ONE, Fixed::from_f64(-0.5)]);
        assert_eq!(bits, [0x0001_0000, 0xffff_8000]);
    }
}
