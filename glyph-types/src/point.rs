/// A pair of coordinates.
///
/// Glyph advances are a `Point<Fixed>`, as is the extent returned by
/// [`GlyphRect::width_height`](crate::GlyphRect::width_height).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// A point with `xy` as both coordinates.
    pub const fn broadcast(xy: T) -> Self
    where
        T: Copy,
    {
        Self { x: xy, y: xy }
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use crate::Fixed;

    #[test]
    fn broadcast_fills_both_axes() {
        let p = Point::broadcast(Fixed::ONE);
        assert_eq!(p, Point::new(Fixed::from_i32(1), Fixed::from_i32(1)));
        assert_eq!(Point::<u8>::default(), Point::broadcast(0));
    }
}
