//! Outline glyph payloads
//!
//! Block layout:
//!
//! | type          | name        |
//! |---------------|-------------|
//! | u8            | fill_type   |
//! | u8            | hairline    |
//! | u32           | point_count |
//! | u32           | verb_count  |
//! | [(f64, f64)]  | points      |
//! | [u8]          | verbs       |

use kurbo::{BezPath, PathEl, Point, Shape};
use types::{FillType, Pen};

use crate::read::{ReadBuffer, ReadError, WireRead};
use crate::write::{WireWrite, WriteBuffer};

const HEADER_LEN: usize = 1 + 1 + 4 + 4;
const POINT_LEN: usize = 8 * 2;

/// A single path construction command, as encoded on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PathVerb {
    MoveTo = 0,
    LineTo = 1,
    QuadTo = 2,
    CurveTo = 3,
    Close = 4,
}

impl PathVerb {
    /// The number of points consumed by this verb.
    pub const fn point_count(self) -> usize {
        match self {
            PathVerb::MoveTo | PathVerb::LineTo => 1,
            PathVerb::QuadTo => 2,
            PathVerb::CurveTo => 3,
            PathVerb::Close => 0,
        }
    }

    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(PathVerb::MoveTo),
            1 => Some(PathVerb::LineTo),
            2 => Some(PathVerb::QuadTo),
            3 => Some(PathVerb::CurveTo),
            4 => Some(PathVerb::Close),
            _ => None,
        }
    }

    fn for_element(el: &PathEl) -> Self {
        match el {
            PathEl::MoveTo(_) => PathVerb::MoveTo,
            PathEl::LineTo(_) => PathVerb::LineTo,
            PathEl::QuadTo(..) => PathVerb::QuadTo,
            PathEl::CurveTo(..) => PathVerb::CurveTo,
            PathEl::ClosePath => PathVerb::Close,
        }
    }
}

/// A vector outline for a glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphPath {
    pub path: BezPath,
    pub fill: FillType,
    /// The outline is stroked with a one pixel wide line rather than filled.
    pub hairline: bool,
}

impl GlyphPath {
    pub fn new(path: BezPath, fill: FillType) -> Self {
        GlyphPath {
            path,
            fill,
            hairline: false,
        }
    }

    pub fn with_hairline(self, hairline: bool) -> Self {
        GlyphPath { hairline, ..self }
    }

    /// The bounding box of the outline, or [`kurbo::Rect::ZERO`] if it is
    /// empty.
    pub fn bounds(&self) -> kurbo::Rect {
        if self.path.elements().is_empty() {
            return kurbo::Rect::ZERO;
        }
        self.path.bounding_box()
    }

    /// Replay the outline into `pen`.
    pub fn draw<P: Pen + ?Sized>(&self, pen: &mut P) {
        for el in self.path.elements() {
            match *el {
                PathEl::MoveTo(p) => pen.move_to(p.x as f32, p.y as f32),
                PathEl::LineTo(p) => pen.line_to(p.x as f32, p.y as f32),
                PathEl::QuadTo(c0, p) => {
                    pen.quad_to(c0.x as f32, c0.y as f32, p.x as f32, p.y as f32)
                }
                PathEl::CurveTo(c0, c1, p) => pen.curve_to(
                    c0.x as f32,
                    c0.y as f32,
                    c1.x as f32,
                    c1.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                PathEl::ClosePath => pen.close(),
            }
        }
    }

    /// The number of bytes used by the outline's storage.
    pub fn approximate_bytes_used(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.path.elements().len() * std::mem::size_of::<PathEl>()
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.path.elements().iter().flat_map(|el| {
            let (a, b, c) = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => (Some(p), None, None),
                PathEl::QuadTo(p0, p1) => (Some(p0), Some(p1), None),
                PathEl::CurveTo(p0, p1, p2) => (Some(p0), Some(p1), Some(p2)),
                PathEl::ClosePath => (None, None, None),
            };
            a.into_iter().chain(b).chain(c)
        })
    }
}

impl WireWrite for GlyphPath {
    fn write_into(&self, writer: &mut WriteBuffer) {
        let elements = self.path.elements();
        let point_count: usize = elements
            .iter()
            .map(|el| PathVerb::for_element(el).point_count())
            .sum();
        self.fill.to_u8().write_into(writer);
        self.hairline.write_into(writer);
        (point_count as u32).write_into(writer);
        (elements.len() as u32).write_into(writer);
        for point in self.points() {
            point.x.write_into(writer);
            point.y.write_into(writer);
        }
        for el in elements {
            (PathVerb::for_element(el) as u8).write_into(writer);
        }
    }
}

/// Counts from the block header.
struct PathHeader {
    fill: FillType,
    hairline: bool,
    point_count: usize,
    verb_count: usize,
}

impl PathHeader {
    fn read(buf: &mut ReadBuffer) -> Result<Self, ReadError> {
        buf.ensure_remaining(HEADER_LEN)?;
        let raw_fill = buf.read::<u8>()?;
        let fill = FillType::from_u8(raw_fill)
            .ok_or_else(|| buf.fail(ReadError::unknown_tag(raw_fill)))?;
        let hairline = buf.read_bool()?;
        let point_count = buf.read_len()?;
        let verb_count = buf.read_len()?;
        Ok(PathHeader {
            fill,
            hairline,
            point_count,
            verb_count,
        })
    }

    /// The byte length of the points and verbs, checked against the input.
    fn body_len(&self, buf: &mut ReadBuffer) -> Result<usize, ReadError> {
        let len = self
            .point_count
            .checked_mul(POINT_LEN)
            .and_then(|len| len.checked_add(self.verb_count))
            .ok_or_else(|| buf.fail(ReadError::Truncated))?;
        buf.ensure_remaining(len)?;
        Ok(len)
    }
}

impl<'a> WireRead<'a> for GlyphPath {
    fn read(buf: &mut ReadBuffer<'a>) -> Result<Self, ReadError> {
        let header = PathHeader::read(buf)?;
        header.body_len(buf)?;
        let mut points = Vec::with_capacity(header.point_count);
        for _ in 0..header.point_count {
            points.push(Point::new(buf.read::<f64>()?, buf.read::<f64>()?));
        }
        let verbs = buf.read_bytes(header.verb_count)?;

        let mut elements = Vec::with_capacity(verbs.len());
        let mut points = points.into_iter();
        let mut next = || points.next();
        for (i, raw) in verbs.iter().enumerate() {
            let verb = PathVerb::from_u8(*raw)
                .ok_or_else(|| buf.fail(ReadError::unknown_tag(*raw)))?;
            if i == 0 && verb != PathVerb::MoveTo {
                return Err(buf.fail(ReadError::malformed("path must begin with a move")));
            }
            let el = match verb {
                PathVerb::MoveTo => next().map(PathEl::MoveTo),
                PathVerb::LineTo => next().map(PathEl::LineTo),
                PathVerb::QuadTo => next().zip(next()).map(|(c0, p)| PathEl::QuadTo(c0, p)),
                PathVerb::CurveTo => next()
                    .zip(next())
                    .zip(next())
                    .map(|((c0, c1), p)| PathEl::CurveTo(c0, c1, p)),
                PathVerb::Close => Some(PathEl::ClosePath),
            };
            let el = el.ok_or_else(|| buf.fail(ReadError::malformed("too few points")))?;
            elements.push(el);
        }
        if next().is_some() {
            return Err(buf.fail(ReadError::malformed("too many points")));
        }
        Ok(GlyphPath {
            path: BezPath::from_vec(elements),
            fill: header.fill,
            hairline: header.hairline,
        })
    }
}

/// Step over a path block, validating only its framing.
pub(crate) fn skip_path(buf: &mut ReadBuffer) -> Result<(), ReadError> {
    let header = PathHeader::read(buf)?;
    let len = header.body_len(buf)?;
    buf.skip(len)
}

/// A pen that collects commands into a [`kurbo::BezPath`].
#[derive(Clone, Debug, Default)]
pub struct BezPathPen {
    path: BezPath,
}

fn as_kurbo_point(x: f32, y: f32) -> Point {
    Point {
        x: x as f64,
        y: y as f64,
    }
}

impl BezPathPen {
    pub fn new() -> BezPathPen {
        Default::default()
    }

    pub fn into_inner(self) -> BezPath {
        self.path
    }
}

impl Pen for BezPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(as_kurbo_point(x, y))
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(as_kurbo_point(x, y))
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to(as_kurbo_point(cx0, cy0), as_kurbo_point(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            as_kurbo_point(cx0, cy0),
            as_kurbo_point(cx1, cy1),
            as_kurbo_point(x, y),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
