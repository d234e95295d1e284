#![no_main]
//! Decodes a metrics record followed by a payload block of a kind chosen by
//! the first input byte.

use libfuzzer_sys::fuzz_target;

use glyph_codec::{DrawableRegistry, Glyph, PayloadKind, ReadBuffer, SliceArena};

fn payload_kind(selector: u8) -> PayloadKind {
    match selector % 3 {
        0 => PayloadKind::Image,
        1 => PayloadKind::Path,
        _ => PayloadKind::Drawable,
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((selector, data)) = data.split_first() else {
        return;
    };
    let mut storage = vec![0u8; 1 << 16];
    let mut arena = SliceArena::new(&mut storage);
    let registry = DrawableRegistry::with_defaults();

    let mut buf = ReadBuffer::new(data);
    let Ok(mut glyph) = Glyph::from_buffer(&mut buf) else {
        assert!(!buf.is_valid());
        return;
    };
    let result = match payload_kind(*selector) {
        PayloadKind::Image => glyph.add_image_from_buffer(&mut buf, &mut arena),
        PayloadKind::Path => glyph.add_path_from_buffer(&mut buf),
        PayloadKind::Drawable => glyph.add_drawable_from_buffer(&mut buf, &registry),
    };
    assert_eq!(result.is_ok(), buf.is_valid());
    assert_eq!(result.is_ok(), glyph.payload().kind().is_some());
    assert!(glyph.metrics().is_some());
    if let Some(image) = glyph.image() {
        assert!(image.rows().count() as u32 == image.height());
    }
});
