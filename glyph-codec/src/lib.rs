//! Transmitting rendered glyphs
//!
//! This crate defines the in-memory model of a single rendered glyph, its
//! metrics and at most one payload (a bitmap image, a vector outline or a
//! custom [`Drawable`]), together with the compact binary format used to move
//! a glyph between two processes or caches.
//!
//! The format is split in two independent parts:
//!
//! - a fixed size metrics record, written by [`Glyph::write_metrics`] and read
//!   by [`Glyph::from_buffer`]. A receiver that only needs layout information
//!   never has to look further.
//! - a self-delimiting payload block, written by one of
//!   [`Glyph::write_image`], [`Glyph::write_path`] or
//!   [`Glyph::write_drawable`], and read by the matching `add_*_from_buffer`
//!   method. The kind of payload is not encoded in the stream; both sides
//!   must agree on it out of band.
//!
//! Decoding never reads past the end of the input. Any framing error leaves
//! the glyph without a payload and marks the [`ReadBuffer`] invalid, so that
//! no later read from the same source can be mistaken for valid data.
//!
//! # Example
//!
//! ```
//! use glyph_codec::{Glyph, GlyphMetrics, ReadBuffer, SliceArena, WriteBuffer};
//! use glyph_codec::types::{Fixed, GlyphId, MaskFormat, PackedGlyphId, Point};
//!
//! let mut storage = [0u8; 64];
//! let mut arena = SliceArena::new(&mut storage);
//!
//! let mut glyph = Glyph::new(PackedGlyphId::new(GlyphId::new(12)));
//! glyph
//!     .set_metrics(GlyphMetrics {
//!         advance: Point::new(Fixed::from_i32(3), Fixed::ZERO),
//!         left: 0,
//!         top: -2,
//!         width: 2,
//!         height: 2,
//!         mask_format: MaskFormat::A8,
//!     })
//!     .unwrap();
//! glyph.set_image(&mut arena, &[0xff, 0x00, 0x00, 0xff]).unwrap();
//!
//! let mut writer = WriteBuffer::new();
//! glyph.write_metrics(&mut writer);
//! glyph.write_image(&mut writer).unwrap();
//! let bytes = writer.into_data();
//!
//! let mut reader = ReadBuffer::new(&bytes);
//! let mut received = Glyph::from_buffer(&mut reader).unwrap();
//! received.add_image_from_buffer(&mut reader, &mut arena).unwrap();
//! assert_eq!(received.image().unwrap().row(1), Some(&[0x00, 0xff][..]));
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod arena;
mod drawable;
mod error;
mod glyph;
mod image;
mod metrics;
mod path;
mod read;
mod write;

#[cfg(test)]
mod test_helpers;

pub use arena::{AllocationError, GlyphArena, SliceArena};
pub use drawable::{Drawable, DrawableDecoder, DrawableKind, DrawableRegistry, OutlineDrawable};
pub use error::{AttachError, WriteError};
pub use glyph::{Glyph, GlyphState, Payload, PayloadKind};
pub use image::GlyphImage;
pub use metrics::GlyphMetrics;
pub use path::{BezPathPen, GlyphPath, PathVerb};
pub use read::{FormatError, ReadBuffer, ReadError, WireRead};
pub use write::{WireWrite, WriteBuffer};

/// Public re-export of the glyph-types crate.
pub extern crate glyph_types as types;

/// Public re-export of the kurbo crate, used for outlines and bounds.
pub extern crate kurbo;
