//! types for working with raw big-endian bytes

/// A trait for fixed-width wire scalars.
///
/// This is the bridge between a typed value and its big-endian byte
/// representation; readers and writers are generic over it.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// The size of the raw type, in bytes.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Attempt to read a value from a slice of exactly `RAW_BYTE_LEN` bytes.
    fn read(bytes: &[u8]) -> Option<Self> {
        Self::Raw::try_from(bytes).ok().map(Self::from_raw)
    }
}

/// An internal macro for implementing the `Scalar` trait on newtypes.
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl crate::raw::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                crate::raw::Scalar::to_raw(self.0)
            }

            fn from_raw(raw: $raw) -> Self {
                Self(crate::raw::Scalar::from_raw(raw))
            }
        }
    };
}

pub(crate) use newtype_scalar;

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
int_scalar!(u64, [u8; 8]);
int_scalar!(i64, [u8; 8]);
int_scalar!(f32, [u8; 4]);
int_scalar!(f64, [u8; 8]);
