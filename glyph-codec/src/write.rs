//! Serializing glyph data

use types::{Fixed, GlyphId, PackedGlyphId, Point, Scalar};

/// A type that can be written out as part of a glyph record.
pub trait WireWrite {
    /// Write our big-endian bytes into this [WriteBuffer].
    fn write_into(&self, writer: &mut WriteBuffer);
}

/// A growable buffer of encoded glyph data.
///
/// Writing never fails; validation happens on the glyph side before anything
/// is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBuffer {
    bytes: Vec<u8>,
}

/// The position of a length field that will be filled in later.
///
/// Returned by [`WriteBuffer::reserve_len`]; pass it to
/// [`WriteBuffer::patch_len`] once the framed content has been written.
#[derive(Debug)]
#[must_use = "a reserved length must be patched"]
pub struct LenPlaceholder {
    pos: usize,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write raw bytes into this buffer.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    /// Write a value, returning `self` for chaining.
    pub fn write(&mut self, item: &impl WireWrite) -> &mut Self {
        item.write_into(self);
        self
    }

    /// Reserve four bytes for a `u32` length, to be resolved by
    /// [`patch_len`](Self::patch_len).
    pub fn reserve_len(&mut self) -> LenPlaceholder {
        let pos = self.bytes.len();
        self.write_slice(&[0; 4]);
        LenPlaceholder { pos }
    }

    /// Overwrite a reserved length with the number of bytes written after it.
    ///
    /// Returns the resolved length. If it does not fit in a `u32` the
    /// placeholder and everything written after it are discarded, and `None`
    /// is returned.
    pub fn patch_len(&mut self, placeholder: LenPlaceholder) -> Option<u32> {
        self.patch_len_within(placeholder, u32::MAX)
    }

    fn patch_len_within(&mut self, placeholder: LenPlaceholder, max: u32) -> Option<u32> {
        let start = placeholder.pos + 4;
        let len = self
            .bytes
            .len()
            .checked_sub(start)
            .and_then(|len| u32::try_from(len).ok())
            .filter(|len| *len <= max);
        let Some(len) = len else {
            self.bytes.truncate(placeholder.pos);
            return None;
        };
        self.bytes
            .get_mut(placeholder.pos..start)?
            .copy_from_slice(&len.to_be_bytes());
        Some(len)
    }

    /// A view of the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning the encoded bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.bytes
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl WireWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut WriteBuffer) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(f64);

macro_rules! write_scalar {
    ($ty:ty) => {
        impl WireWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut WriteBuffer) {
                writer.write_slice(self.to_raw().as_ref())
            }
        }
    };
}

write_scalar!(Fixed);
write_scalar!(GlyphId);
write_scalar!(PackedGlyphId);

impl WireWrite for bool {
    fn write_into(&self, writer: &mut WriteBuffer) {
        (*self as u8).write_into(writer)
    }
}

impl<T: WireWrite> WireWrite for Point<T> {
    fn write_into(&self, writer: &mut WriteBuffer) {
        self.x.write_into(writer);
        self.y.write_into(writer);
    }
}

impl<T: WireWrite> WireWrite for [T] {
    fn write_into(&self, writer: &mut WriteBuffer) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: WireWrite> WireWrite for Vec<T> {
    fn write_into(&self, writer: &mut WriteBuffer) {
        self.as_slice().write_into(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian() {
        let mut writer = WriteBuffer::new();
        writer
            .write(&0x0102u16)
            .write(&-1i32)
            .write(&Fixed::from_i32(10))
            .write(&true);
        assert_eq!(
            writer.as_slice(),
            &[1, 2, 0xff, 0xff, 0xff, 0xff, 0, 10, 0, 0, 1]
        );
    }

    #[test]
    fn points_and_slices() {
        let mut writer = WriteBuffer::new();
        writer.write(&Point::new(1u8, 2u8)).write(&vec![3u8, 4]);
        assert_eq!(writer.into_data(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn patched_length() {
        let mut writer = WriteBuffer::new();
        writer.write(&0xaau8);
        let len = writer.reserve_len();
        writer.write_slice(b"abcde");
        assert_eq!(writer.patch_len(len), Some(5));
        assert_eq!(
            writer.as_slice(),
            &[0xaa, 0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e']
        );
    }

    #[test]
    fn oversized_block_is_discarded() {
        let mut writer = WriteBuffer::new();
        writer.write(&0xaau8);
        let len = writer.reserve_len();
        writer.write_slice(b"abcde");
        assert_eq!(writer.patch_len_within(len, 4), None);
        assert_eq!(writer.as_slice(), &[0xaa]);
    }

    #[test]
    fn empty_patched_length() {
        let mut writer = WriteBuffer::new();
        let len = writer.reserve_len();
        assert_eq!(writer.patch_len(len), Some(0));
        assert_eq!(writer.len(), 4);
    }
}
