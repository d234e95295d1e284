//! Errors raised while building or serializing a glyph locally

use types::MaskFormat;

use crate::arena::AllocationError;
use crate::glyph::PayloadKind;

/// An error that occurs when attaching metrics or a payload to a [`Glyph`].
///
/// A failed attach leaves the glyph unchanged.
///
/// [`Glyph`]: crate::Glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// Metrics can only be set once.
    MetricsAlreadySet,
    /// Payloads require metrics to size and validate against.
    MetricsNotSet,
    /// The glyph already carries a payload of this kind.
    PayloadAlreadySet(PayloadKind),
    /// The mask format has no pixel representation.
    NoPixelLayout(MaskFormat),
    /// The glyph is too large to be stored as an image.
    ImageTooLarge { width: u32, height: u32 },
    /// The row stride cannot hold a row of the image.
    RowBytesTooSmall { row_bytes: usize, min: usize },
    /// Fewer pixel bytes were supplied than the image requires.
    ImageDataTooShort { expected: usize, actual: usize },
    /// A dimension or row stride does not fit its signed 32-bit wire field.
    OutOfWireRange { field: &'static str, value: u64 },
    Allocation(AllocationError),
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachError::MetricsAlreadySet => write!(f, "Glyph metrics are already set"),
            AttachError::MetricsNotSet => write!(f, "Glyph metrics have not been set"),
            AttachError::PayloadAlreadySet(kind) => {
                write!(f, "Glyph already has a {kind} payload")
            }
            AttachError::NoPixelLayout(format) => {
                write!(f, "Mask format {format:?} has no pixel layout")
            }
            AttachError::ImageTooLarge { width, height } => {
                write!(f, "Glyph of {width}x{height} is too large for an image")
            }
            AttachError::RowBytesTooSmall { row_bytes, min } => {
                write!(f, "Row stride {row_bytes} is less than the minimum {min}")
            }
            AttachError::ImageDataTooShort { expected, actual } => {
                write!(f, "Expected {expected} bytes of pixel data, found {actual}")
            }
            AttachError::OutOfWireRange { field, value } => {
                write!(f, "Glyph {field} of {value} cannot be encoded")
            }
            AttachError::Allocation(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for AttachError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttachError::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocationError> for AttachError {
    fn from(src: AllocationError) -> AttachError {
        AttachError::Allocation(src)
    }
}

/// An error that occurs when serializing a glyph payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// The glyph does not carry the requested payload.
    PayloadNotSet(PayloadKind),
    /// The encoded block does not fit its `u32` length prefix.
    BlockTooLarge(PayloadKind),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::PayloadNotSet(kind) => write!(f, "Glyph has no {kind} payload"),
            WriteError::BlockTooLarge(kind) => write!(f, "The {kind} block is too large"),
        }
    }
}

impl std::error::Error for WriteError {}
