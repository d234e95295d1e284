//! Reading glyph data from untrusted bytes

use types::Scalar;

use crate::arena::AllocationError;
use crate::drawable::DrawableKind;
use crate::glyph::PayloadKind;

/// A type that can be read from a [`ReadBuffer`] without external state.
pub trait WireRead<'a>: Sized {
    /// Read an instance of `Self` from the current position of `buf`,
    /// performing validation.
    ///
    /// On error the buffer may have been partially consumed.
    fn read(buf: &mut ReadBuffer<'a>) -> Result<Self, ReadError>;
}

/// A bounds checked cursor over a byte slice.
///
/// Every read checks that enough bytes remain and never looks past the end of
/// the slice. The buffer also carries a validity flag: the first failed read
/// or validation clears it, and once cleared every further read fails with
/// [`ReadError::SourceInvalid`]. Callers that receive several items from the
/// same source can therefore check [`is_valid`](Self::is_valid) once at the
/// end.
///
/// The position after a failed read is unspecified.
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    valid: bool,
}

impl<'a> ReadBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ReadBuffer {
            data,
            pos: 0,
            valid: true,
        }
    }

    /// `false` once any read from this buffer has failed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The current offset from the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// `true` if every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Mark the buffer invalid and return `err`, for use in validation.
    pub fn fail(&mut self, err: ReadError) -> ReadError {
        self.valid = false;
        err
    }

    /// Run `f`, marking the buffer invalid if it returns an error.
    ///
    /// This is used to wrap decoding steps that can fail for reasons other
    /// than a short read, such as a decoder supplied by the caller.
    pub fn guarded<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ReadError>,
    ) -> Result<T, ReadError> {
        let result = f(self);
        if result.is_err() {
            self.valid = false;
        }
        result
    }

    /// Fail with [`ReadError::Truncated`] unless at least `len` bytes remain.
    pub fn ensure_remaining(&mut self, len: usize) -> Result<(), ReadError> {
        self.check_valid()?;
        if self.remaining() < len {
            return Err(self.fail(ReadError::Truncated));
        }
        Ok(())
    }

    /// Read a scalar value.
    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let bytes = self.read_bytes(T::RAW_BYTE_LEN)?;
        match T::read(bytes) {
            Some(value) => Ok(value),
            None => Err(self.fail(ReadError::Truncated)),
        }
    }

    /// Read a `u32` length or count as a `usize`.
    pub fn read_len(&mut self) -> Result<usize, ReadError> {
        let len: u32 = self.read()?;
        usize::try_from(len).map_err(|_| self.fail(ReadError::malformed("length overflow")))
    }

    /// Read a single byte as a boolean, rejecting values other than 0 and 1.
    pub fn read_bool(&mut self) -> Result<bool, ReadError> {
        match self.read::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.fail(ReadError::unknown_tag(other))),
        }
    }

    /// Borrow the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        self.check_valid()?;
        let bytes = self
            .pos
            .checked_add(len)
            .and_then(|end| self.data.get(self.pos..end));
        match bytes {
            Some(bytes) => {
                self.pos += len;
                Ok(bytes)
            }
            None => Err(self.fail(ReadError::Truncated)),
        }
    }

    /// Step over the next `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), ReadError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Split off a buffer over the next `len` bytes, advancing past them.
    ///
    /// The returned buffer starts valid; failures inside it do not affect
    /// `self` unless they are propagated through [`guarded`](Self::guarded).
    pub fn sub_buffer(&mut self, len: usize) -> Result<ReadBuffer<'a>, ReadError> {
        self.read_bytes(len).map(ReadBuffer::new)
    }

    fn check_valid(&self) -> Result<(), ReadError> {
        if self.valid {
            Ok(())
        } else {
            Err(ReadError::SourceInvalid)
        }
    }
}

/// An error that occurs when decoding glyph data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Fewer bytes remain than a fixed or declared length requires.
    Truncated,
    /// A field is outside of its enumeration or fails a structural check.
    InvalidFormat(FormatError),
    /// The arena could not provide storage for the payload.
    AllocationFailed(AllocationError),
    /// No decoder is registered for this drawable kind.
    UnknownDrawable(DrawableKind),
    /// The glyph has no metrics to decode a payload against; nothing was read.
    MetricsNotSet,
    /// The glyph already has a payload; nothing was read.
    PayloadAlreadySet(PayloadKind),
    /// An earlier read from this buffer failed.
    SourceInvalid,
}

/// The reason a field was rejected as [`ReadError::InvalidFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    // i64 is flexible enough to store any tag we might encounter
    /// A tag is outside of its enumeration.
    UnknownTag(i64),
    /// A structural check failed, such as a negative dimension or a row
    /// stride too small for the image width.
    Malformed(&'static str),
}

impl ReadError {
    pub fn unknown_tag(tag: impl Into<i64>) -> Self {
        ReadError::InvalidFormat(FormatError::UnknownTag(tag.into()))
    }

    pub fn malformed(reason: &'static str) -> Self {
        ReadError::InvalidFormat(FormatError::Malformed(reason))
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnknownTag(x) => write!(f, "unknown tag '{x}'"),
            FormatError::Malformed(msg) => f.write_str(msg),
        }
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Truncated => write!(f, "Not enough data remaining"),
            ReadError::InvalidFormat(reason) => write!(f, "Invalid format: {reason}"),
            ReadError::AllocationFailed(err) => std::fmt::Display::fmt(err, f),
            ReadError::UnknownDrawable(kind) => write!(f, "No decoder for drawable '{kind}'"),
            ReadError::MetricsNotSet => write!(f, "Glyph metrics have not been set"),
            ReadError::PayloadAlreadySet(kind) => write!(f, "Glyph already has a {kind} payload"),
            ReadError::SourceInvalid => write!(f, "The source is no longer valid"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::AllocationFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocationError> for ReadError {
    fn from(src: AllocationError) -> ReadError {
        ReadError::AllocationFailed(src)
    }
}
