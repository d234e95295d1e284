#![no_main]
//! Checks that skipping a payload block consumes exactly the bytes that
//! decoding it would.

use libfuzzer_sys::fuzz_target;

use glyph_codec::{DrawableRegistry, Glyph, PayloadKind, ReadBuffer, SliceArena};
use glyph_types::{GlyphId, MaskFormat, PackedGlyphId};

fuzz_target!(|data: &[u8]| {
    let Some((selector, data)) = data.split_first() else {
        return;
    };
    let kind = match selector % 3 {
        0 => PayloadKind::Image,
        1 => PayloadKind::Path,
        _ => PayloadKind::Drawable,
    };

    let mut skipped = ReadBuffer::new(data);
    let skip_result = kind.skip(&mut skipped);

    // images are validated against metrics, so only paths and drawables
    // decode without extra context
    let mut decoded = ReadBuffer::new(data);
    let mut glyph = Glyph::with_metrics(
        PackedGlyphId::new(GlyphId::NOTDEF),
        glyph_codec::GlyphMetrics {
            mask_format: MaskFormat::PathOnly,
            ..Default::default()
        },
    )
    .expect("default metrics fit the wire format");
    let mut storage = [0u8; 0];
    let mut arena = SliceArena::new(&mut storage);
    let decode_result = match kind {
        PayloadKind::Image => glyph.add_image_from_buffer(&mut decoded, &mut arena),
        PayloadKind::Path => glyph.add_path_from_buffer(&mut decoded),
        PayloadKind::Drawable => {
            glyph.add_drawable_from_buffer(&mut decoded, &DrawableRegistry::with_defaults())
        }
    };
    if decode_result.is_ok() {
        assert!(skip_result.is_ok());
        assert_eq!(skipped.position(), decoded.position());
    }
});
