//! Scalar and geometric types used to describe a transmitted glyph.
//!
//! This crate contains the leaf types shared by glyph producers and the
//! [`glyph-codec`] wire format: a 16.16 [`Fixed`] number, a generic [`Point`],
//! the [`GlyphRect`] bounding-box algebra, packed glyph identifiers, the
//! [`MaskFormat`] and [`FillType`] enumerations and the [`Pen`] drawing
//! interface.
//!
//! [`glyph-codec`]: https://docs.rs/glyph-codec/

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod fill_type;
mod fixed;
mod glyph_id;
mod glyph_rect;
mod mask_format;
mod pen;
mod point;
mod raw;


pub use fill_type::FillType;
pub use fixed::Fixed;
pub use glyph_id::{GlyphId, PackedGlyphId};
pub use glyph_rect::GlyphRect;
pub use mask_format::{InvalidMaskFormat, MaskFormat};
pub use pen::{Pen, PenCommand};
pub use point::Point;
pub use raw::Scalar;

/// Glyphs with a width or height at or above this value never carry an image.
///
/// Such glyphs are expected to be transmitted as outlines instead.
pub const MAX_GLYPH_DIMENSION: u32 = 1 << 13;
