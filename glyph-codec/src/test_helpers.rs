//! small utilities used in tests

use std::collections::HashMap;
use types::Scalar;

/// Builds hand-crafted (and deliberately broken) big-endian input.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
    tagged: HashMap<&'static str, usize>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend_from_slice(item.to_raw().as_ref());
        self
    }

    /// Push `item`, remembering its offset so it can be patched with
    /// [`write_at`](Self::write_at).
    pub fn push_with_tag(mut self, item: impl Scalar, tag: &'static str) -> Self {
        self.tagged.insert(tag, self.data.len());
        self.push(item)
    }

    pub fn extend<T: Scalar>(self, items: impl IntoIterator<Item = T>) -> Self {
        items.into_iter().fold(self, |buf, item| buf.push(item))
    }

    /// Append already encoded bytes.
    pub fn append(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Overwrite the value pushed with `tag`.
    ///
    /// Panics if the tag is unknown or the new value runs past the end.
    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let offset = self.tagged[tag];
        let raw = item.to_raw();
        let raw: &[u8] = raw.as_ref();
        self.data[offset..offset + raw.len()].copy_from_slice(raw);
    }
}
