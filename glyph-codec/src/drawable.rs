//! Custom glyph payloads that draw themselves
//!
//! Block layout:
//!
//! | type     | name        |
//! |----------|-------------|
//! | u32      | byte_length, covering the kind and the body |
//! | [u8; 4]  | kind        |
//! | [u8]     | body        |

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use types::{FillType, Pen, Scalar};

use crate::path::GlyphPath;
use crate::read::{ReadBuffer, ReadError, WireRead};
use crate::write::{WireWrite, WriteBuffer};

/// A glyph representation that renders itself.
///
/// Drawables are shared between glyphs and threads, and are serialized
/// through the [`DrawableRegistry`] keyed by their [`kind`](Self::kind).
pub trait Drawable: Debug + Send + Sync {
    /// The tag used to find a decoder for this drawable.
    fn kind(&self) -> DrawableKind;

    /// The area touched when drawing, in the glyph's coordinate space.
    fn bounds(&self) -> kurbo::Rect;

    /// An estimate of the memory held by this drawable, for cache accounting.
    fn approximate_bytes_used(&self) -> usize;

    /// Render into `pen`.
    fn draw(&self, pen: &mut dyn Pen);

    /// Write the body of the drawable block.
    ///
    /// The registered decoder for [`kind`](Self::kind) must consume exactly
    /// the bytes written here.
    fn serialize(&self, writer: &mut WriteBuffer);
}

/// A four byte identifier for a kind of [`Drawable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DrawableKind([u8; 4]);

impl DrawableKind {
    pub const fn new(src: &[u8; 4]) -> Self {
        DrawableKind(*src)
    }

    pub const fn from_u32(src: u32) -> Self {
        DrawableKind(src.to_be_bytes())
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl Scalar for DrawableKind {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        DrawableKind(raw)
    }
}

impl WireWrite for DrawableKind {
    fn write_into(&self, writer: &mut WriteBuffer) {
        writer.write_slice(&self.0)
    }
}

impl Display for DrawableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{:02X}}}", byte)?;
            }
        }
        Ok(())
    }
}

impl Debug for DrawableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DrawableKind({})", self)
    }
}

/// A function that decodes the body of a drawable block.
pub type DrawableDecoder = fn(&mut ReadBuffer) -> Result<Arc<dyn Drawable>, ReadError>;

/// The set of drawable kinds a receiver knows how to decode.
#[derive(Clone, Debug, Default)]
pub struct DrawableRegistry {
    decoders: HashMap<DrawableKind, DrawableDecoder>,
}

impl DrawableRegistry {
    /// A registry that knows no drawables.
    pub fn new() -> Self {
        Default::default()
    }

    /// A registry with the drawables provided by this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OutlineDrawable::KIND, OutlineDrawable::decode);
        registry
    }

    /// Add a decoder, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: DrawableKind,
        decoder: DrawableDecoder,
    ) -> Option<DrawableDecoder> {
        self.decoders.insert(kind, decoder)
    }

    pub fn get(&self, kind: DrawableKind) -> Option<DrawableDecoder> {
        self.decoders.get(&kind).copied()
    }

    pub fn contains(&self, kind: DrawableKind) -> bool {
        self.decoders.contains_key(&kind)
    }
}

/// Write `drawable` as a length-prefixed block.
///
/// Returns `false`, having written nothing, if the body is too long to be
/// framed.
pub(crate) fn write_drawable(drawable: &dyn Drawable, writer: &mut WriteBuffer) -> bool {
    let len = writer.reserve_len();
    drawable.kind().write_into(writer);
    drawable.serialize(writer);
    writer.patch_len(len).is_some()
}

/// Decode a drawable block using the decoders in `registry`.
pub(crate) fn read_drawable(
    buf: &mut ReadBuffer,
    registry: &DrawableRegistry,
) -> Result<Arc<dyn Drawable>, ReadError> {
    let len = buf.read_len()?;
    if len < DrawableKind::RAW_BYTE_LEN {
        return Err(buf.fail(ReadError::malformed("drawable block too short")));
    }
    let mut body = buf.sub_buffer(len)?;
    buf.guarded(|_| {
        let kind = body.read::<DrawableKind>()?;
        let Some(decode) = registry.get(kind) else {
            log::warn!("no decoder registered for drawable '{kind}'");
            return Err(ReadError::UnknownDrawable(kind));
        };
        let drawable = decode(&mut body)?;
        if !body.is_exhausted() {
            return Err(ReadError::malformed("drawable decoder left unread data"));
        }
        Ok(drawable)
    })
}

/// Step over a drawable block without decoding it.
pub(crate) fn skip_drawable(buf: &mut ReadBuffer) -> Result<(), ReadError> {
    let len = buf.read_len()?;
    buf.skip(len)
}

/// A drawable that renders a vector outline.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineDrawable {
    path: GlyphPath,
}

impl OutlineDrawable {
    pub const KIND: DrawableKind = DrawableKind::new(b"outl");

    pub fn new(path: GlyphPath) -> Self {
        OutlineDrawable { path }
    }

    pub fn path(&self) -> &GlyphPath {
        &self.path
    }

    fn decode(buf: &mut ReadBuffer) -> Result<Arc<dyn Drawable>, ReadError> {
        let path = GlyphPath::read(buf)?;
        Ok(Arc::new(OutlineDrawable { path }))
    }
}

impl From<kurbo::BezPath> for OutlineDrawable {
    fn from(src: kurbo::BezPath) -> Self {
        OutlineDrawable::new(GlyphPath::new(src, FillType::Winding))
    }
}

impl Drawable for OutlineDrawable {
    fn kind(&self) -> DrawableKind {
        Self::KIND
    }

    fn bounds(&self) -> kurbo::Rect {
        self.path.bounds()
    }

    fn approximate_bytes_used(&self) -> usize {
        self.path.approximate_bytes_used()
    }

    fn draw(&self, pen: &mut dyn Pen) {
        self.path.draw(pen)
    }

    fn serialize(&self, writer: &mut WriteBuffer) {
        self.path.write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::BezPathPen;
    use crate::test_helpers::BeBuffer;
    use kurbo::Shape;

    fn square() -> OutlineDrawable {
        kurbo::Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1).into()
    }

    /// A drawable whose decoder reads one byte less than it writes.
    #[derive(Debug)]
    struct Leftover;

    impl Drawable for Leftover {
        fn kind(&self) -> DrawableKind {
            DrawableKind::new(b"left")
        }

        fn bounds(&self) -> kurbo::Rect {
            kurbo::Rect::ZERO
        }

        fn approximate_bytes_used(&self) -> usize {
            0
        }

        fn draw(&self, _pen: &mut dyn Pen) {}

        fn serialize(&self, writer: &mut WriteBuffer) {
            writer.write(&1u16);
        }
    }

    fn decode_leftover(buf: &mut ReadBuffer) -> Result<Arc<dyn Drawable>, ReadError> {
        buf.read::<u8>()?;
        Ok(Arc::new(Leftover))
    }

    #[test]
    fn kind_display() {
        assert_eq!(OutlineDrawable::KIND.to_string(), "outl");
        assert_eq!(
            DrawableKind::new(&[b'a', 0, b'c', 0xff]).to_string(),
            "a{0x00}c{0xFF}"
        );
        assert_eq!(
            DrawableKind::from_u32(0x6f75746c),
            DrawableKind::from_raw(*b"outl")
        );
    }

    #[test]
    fn framed_round_trip() {
        let mut writer = WriteBuffer::new();
        assert!(write_drawable(&square(), &mut writer));
        let bytes = writer.into_data();
        let len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(len, bytes.len() - 4);
        assert_eq!(&bytes[4..8], b"outl");

        let mut buf = ReadBuffer::new(&bytes);
        let drawable = read_drawable(&mut buf, &DrawableRegistry::with_defaults()).unwrap();
        assert!(buf.is_exhausted());
        assert_eq!(drawable.kind(), OutlineDrawable::KIND);
        assert_eq!(drawable.bounds(), kurbo::Rect::new(0.0, 0.0, 4.0, 4.0));

        let mut pen = BezPathPen::new();
        drawable.draw(&mut pen);
        assert_eq!(&pen.into_inner(), &square().path().path);
    }

    #[test]
    fn unknown_kind() {
        let mut writer = WriteBuffer::new();
        write_drawable(&square(), &mut writer);
        let mut buf = ReadBuffer::new(writer.as_slice());
        assert_eq!(
            read_drawable(&mut buf, &DrawableRegistry::new()).unwrap_err(),
            ReadError::UnknownDrawable(OutlineDrawable::KIND)
        );
        assert!(!buf.is_valid());
    }

    #[test]
    fn decoder_must_consume_body() {
        let mut registry = DrawableRegistry::new();
        assert!(registry.register(Leftover.kind(), decode_leftover).is_none());
        let mut writer = WriteBuffer::new();
        write_drawable(&Leftover, &mut writer);
        let mut buf = ReadBuffer::new(writer.as_slice());
        assert_eq!(
            read_drawable(&mut buf, &registry).unwrap_err(),
            ReadError::malformed("drawable decoder left unread data")
        );
        assert!(!buf.is_valid());
    }

    #[test]
    fn decoder_cannot_read_past_block() {
        let data = BeBuffer::new()
            .push(6u32)
            .push(OutlineDrawable::KIND)
            .push(0u16)
            // this belongs to whatever follows the block
            .extend([0u8; 16]);
        let mut buf = ReadBuffer::new(data.as_slice());
        assert_eq!(
            read_drawable(&mut buf, &DrawableRegistry::with_defaults()).unwrap_err(),
            ReadError::Truncated
        );
        assert!(!buf.is_valid());
    }

    #[test]
    fn short_length() {
        let data = BeBuffer::new().push(3u32).extend([0u8; 3]);
        let mut buf = ReadBuffer::new(data.as_slice());
        assert_eq!(
            read_drawable(&mut buf, &DrawableRegistry::with_defaults()).unwrap_err(),
            ReadError::malformed("drawable block too short")
        );
    }

    #[test]
    fn skip_lands_after_block() {
        let mut writer = WriteBuffer::new();
        write_drawable(&square(), &mut writer);
        writer.write(&0x77u8);
        let mut buf = ReadBuffer::new(writer.as_slice());
        skip_drawable(&mut buf).unwrap();
        assert_eq!(buf.read::<u8>(), Ok(0x77));
    }
}
