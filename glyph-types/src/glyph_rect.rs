//! Bounding boxes for accumulating and clipping glyph metrics.

use crate::{Fixed, Point};

/// An axis-aligned rectangle in 16.16 fixed point coordinates.
///
/// `left` and `top` are inclusive minimums, `right` and `bottom` exclusive
/// maximums, in a y-down coordinate system.
///
/// Every empty rectangle is represented by the single value
/// [`GlyphRect::EMPTY`], so rectangles form two monoids:
///
/// - [`union`](Self::union) with `EMPTY` as its identity:
///   `r.union(GlyphRect::EMPTY) == r`
/// - [`intersection`](Self::intersection) with [`GlyphRect::FULL`] as its
///   identity: `r.intersection(GlyphRect::FULL) == r`
///
/// Both operations are associative and commutative, which makes folding a
/// sequence of rectangles into an accumulator order independent.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawGlyphRect"))]
pub struct GlyphRect {
    left: Fixed,
    top: Fixed,
    right: Fixed,
    bottom: Fixed,
}

impl GlyphRect {
    /// The rectangle containing nothing; the identity of [`union`](Self::union).
    ///
    /// Its bounds are inverted extremes so that taking the minimum of the
    /// near edges and the maximum of the far edges yields the other operand.
    pub const EMPTY: Self = Self {
        left: Fixed::MAX,
        top: Fixed::MAX,
        right: Fixed::MIN,
        bottom: Fixed::MIN,
    };

    /// The rectangle spanning every representable coordinate; the identity of
    /// [`intersection`](Self::intersection).
    pub const FULL: Self = Self {
        left: Fixed::MIN,
        top: Fixed::MIN,
        right: Fixed::MAX,
        bottom: Fixed::MAX,
    };

    /// Creates a rectangle from its edges.
    ///
    /// If `left >= right` or `top >= bottom` the result is [`GlyphRect::EMPTY`].
    pub fn new(left: Fixed, top: Fixed, right: Fixed, bottom: Fixed) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
        .normalized()
    }

    /// Creates a rectangle from integer edges.
    pub fn from_i32(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            Fixed::from_i32(left),
            Fixed::from_i32(top),
            Fixed::from_i32(right),
            Fixed::from_i32(bottom),
        )
    }

    /// Creates a rectangle from an origin and integer extent, as stored in
    /// glyph metrics.
    pub fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        let left = Fixed::from_i32(left);
        let top = Fixed::from_i32(top);
        let width = Fixed::from_i32(width.min(i32::MAX as u32) as i32);
        let height = Fixed::from_i32(height.min(i32::MAX as u32) as i32);
        Self::new(
            left,
            top,
            left.saturating_add(width),
            top.saturating_add(height),
        )
    }

    pub fn left(&self) -> Fixed {
        self.left
    }

    pub fn top(&self) -> Fixed {
        self.top
    }

    pub fn right(&self) -> Fixed {
        self.right
    }

    pub fn bottom(&self) -> Fixed {
        self.bottom
    }

    /// Returns `true` if the rectangle has a non-positive span on either axis.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other.normalized();
        }
        if other.is_empty() {
            return self;
        }
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Returns the largest rectangle contained in both `self` and `other`.
    ///
    /// Disjoint rectangles produce [`GlyphRect::EMPTY`].
    pub fn intersection(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
        .normalized()
    }

    /// Returns the extent of the rectangle as `(right - left, bottom - top)`.
    ///
    /// Both components are non-negative: the extent of [`GlyphRect::EMPTY`] is
    /// zero and extents too large to represent saturate to [`Fixed::MAX`].
    pub fn width_height(&self) -> Point<Fixed> {
        if self.is_empty() {
            return Point::broadcast(Fixed::ZERO);
        }
        Point::new(
            self.right.saturating_sub(self.left),
            self.bottom.saturating_sub(self.top),
        )
    }

    /// Translates the rectangle, saturating at the representable range.
    pub fn offset(self, delta: Point<Fixed>) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::new(
            self.left.saturating_add(delta.x),
            self.top.saturating_add(delta.y),
            self.right.saturating_add(delta.x),
            self.bottom.saturating_add(delta.y),
        )
    }

    fn normalized(self) -> Self {
        if self.is_empty() {
            Self::EMPTY
        } else {
            self
        }
    }
}

/// Deserialized edges, normalized through [`GlyphRect::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGlyphRect {
    left: Fixed,
    top: Fixed,
    right: Fixed,
    bottom: Fixed,
}

#[cfg(feature = "serde")]
impl From<RawGlyphRect> for GlyphRect {
    fn from(raw: RawGlyphRect) -> Self {
        GlyphRect::new(raw.left, raw.top, raw.right, raw.bottom)
    }
}

impl Default for GlyphRect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for GlyphRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::EMPTY {
            return f.write_str("GlyphRect::EMPTY");
        }
        write!(
            f,
            "GlyphRect({:?}, {:?}, {:?}, {:?})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(feature = "kurbo")]
impl From<GlyphRect> for kurbo::Rect {
    fn from(src: GlyphRect) -> Self {
        if src.is_empty() {
            return kurbo::Rect::ZERO;
        }
        kurbo::Rect::new(
            src.left.to_f64(),
            src.top.to_f64(),
            src.right.to_f64(),
            src.bottom.to_f64(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> [GlyphRect; 6] {
        [
            GlyphRect::from_i32(1, 1, 10, 10),
            GlyphRect::from_i32(-5, 3, 2, 40),
            GlyphRect::from_i32(20, 20, 21, 21),
            GlyphRect::new(
                Fixed::from_f64(0.5),
                Fixed::from_f64(-0.25),
                Fixed::from_f64(3.75),
                Fixed::ONE,
            ),
            GlyphRect::EMPTY,
            GlyphRect::FULL,
        ]
    }

    #[test]
    fn basic() {
        let r = GlyphRect::from_i32(1, 1, 10, 10);
        assert!(!r.is_empty());
        let a = r.union(GlyphRect::EMPTY);
        assert_eq!(a, GlyphRect::from_i32(1, 1, 10, 10));
        assert_eq!(a.width_height(), Point::broadcast(Fixed::from_i32(9)));
        let a = r.intersection(GlyphRect::FULL);
        assert_eq!(a, GlyphRect::from_i32(1, 1, 10, 10));
    }

    #[test]
    fn identities() {
        for r in samples() {
            assert_eq!(r.union(GlyphRect::EMPTY), r, "{r:?}");
            assert_eq!(GlyphRect::EMPTY.union(r), r, "{r:?}");
            assert_eq!(r.intersection(GlyphRect::FULL), r, "{r:?}");
            assert_eq!(GlyphRect::FULL.intersection(r), r, "{r:?}");
        }
    }

    #[test]
    fn commutative_and_associative() {
        let rects = samples();
        for a in rects {
            for b in rects {
                assert_eq!(a.union(b), b.union(a));
                assert_eq!(a.intersection(b), b.intersection(a));
                for c in rects {
                    assert_eq!(a.union(b).union(c), a.union(b.union(c)));
                    assert_eq!(
                        a.intersection(b).intersection(c),
                        a.intersection(b.intersection(c))
                    );
                }
            }
        }
    }

    #[test]
    fn accumulate_intersection() {
        let mut acc = GlyphRect::FULL;
        for x in -10..10 {
            for y in -10..10 {
                acc = acc.intersection(GlyphRect::from_i32(x, y, x + 20, y + 20));
            }
        }
        assert_eq!(acc, GlyphRect::from_i32(9, 9, 10, 10));
    }

    #[test]
    fn accumulate_union() {
        let mut acc = GlyphRect::EMPTY;
        for x in -10..10 {
            for y in -10..10 {
                acc = acc.union(GlyphRect::from_i32(x, y, x + 20, y + 20));
            }
        }
        assert_eq!(acc, GlyphRect::from_i32(-10, -10, 29, 29));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = GlyphRect::from_i32(0, 0, 10, 1);
        let b = GlyphRect::from_i32(0, 5, 10, 6);
        let c = a.intersection(b);
        assert_eq!(c, GlyphRect::EMPTY);
        // an empty intermediate must not leak into later unions
        let d = GlyphRect::from_i32(20, 20, 21, 21);
        assert_eq!(c.union(d), d);
    }

    #[test]
    fn touching_edges_are_disjoint() {
        let a = GlyphRect::from_i32(0, 0, 5, 5);
        let b = GlyphRect::from_i32(5, 0, 10, 5);
        assert!(a.intersection(b).is_empty());
        assert_eq!(a.union(b), GlyphRect::from_i32(0, 0, 10, 5));
    }

    #[test]
    fn degenerate_input_is_empty() {
        assert_eq!(GlyphRect::from_i32(3, 3, 3, 8), GlyphRect::EMPTY);
        assert_eq!(GlyphRect::from_i32(3, 9, 4, 8), GlyphRect::EMPTY);
        assert_eq!(GlyphRect::from_origin_size(-1, -2, 0, 9), GlyphRect::EMPTY);
        assert_eq!(GlyphRect::default(), GlyphRect::EMPTY);
    }

    #[test]
    fn extents() {
        assert_eq!(
            GlyphRect::EMPTY.width_height(),
            Point::broadcast(Fixed::ZERO)
        );
        assert_eq!(GlyphRect::FULL.width_height(), Point::broadcast(Fixed::MAX));
        assert_eq!(
            GlyphRect::from_origin_size(-1, -2, 8, 9),
            GlyphRect::from_i32(-1, -2, 7, 7)
        );
    }

    #[test]
    fn offset() {
        let r = GlyphRect::from_i32(0, 0, 2, 3);
        let moved = r.offset(Point::new(Fixed::from_i32(5), Fixed::from_i32(-1)));
        assert_eq!(moved, GlyphRect::from_i32(5, -1, 7, 2));
        assert_eq!(
            GlyphRect::EMPTY.offset(Point::broadcast(Fixed::ONE)),
            GlyphRect::EMPTY
        );
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn to_kurbo() {
        let rect: kurbo::Rect = GlyphRect::from_i32(-1, -2, 7, 7).into();
        assert_eq!(rect, kurbo::Rect::new(-1.0, -2.0, 7.0, 7.0));
        assert_eq!(kurbo::Rect::from(GlyphRect::EMPTY), kurbo::Rect::ZERO);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_empty_rect_is_canonical() {
        // left edge at 5.0, right edge at 0.0
        let inverted = r#"{"left":327680,"top":0,"right":0,"bottom":327680}"#;
        let r: GlyphRect = serde_json::from_str(inverted).unwrap();
        assert_eq!(r, GlyphRect::EMPTY);
        assert_eq!(r.intersection(GlyphRect::FULL), r);
        let unit = GlyphRect::from_i32(1, 1, 2, 2);
        assert_eq!(r.union(unit), unit);

        let kept: GlyphRect = serde_json::from_str(
            &serde_json::to_string(&GlyphRect::from_i32(-1, -2, 7, 7)).unwrap(),
        )
        .unwrap();
        assert_eq!(kept, GlyphRect::from_i32(-1, -2, 7, 7));
    }
}
