//! Storage for decoded pixel data

/// A source of byte storage that outlives the glyphs built from it.
///
/// Glyph images borrow their pixels from an arena rather than owning them, so
/// that a cache can release every image of a strike at once by dropping the
/// backing storage.
pub trait GlyphArena<'a> {
    /// Hand out `len` zeroed bytes, or report how much space is left.
    fn allocate(&mut self, len: usize) -> Result<&'a mut [u8], AllocationError>;
}

/// An arena that carves allocations off the front of a borrowed slice.
///
/// Allocations are never freed individually.
#[derive(Debug, Default)]
pub struct SliceArena<'a> {
    free: &'a mut [u8],
    used: usize,
}

impl<'a> SliceArena<'a> {
    pub fn new(storage: &'a mut [u8]) -> Self {
        SliceArena {
            free: storage,
            used: 0,
        }
    }

    /// The number of bytes handed out so far.
    pub fn bytes_used(&self) -> usize {
        self.used
    }

    /// The number of bytes still available.
    pub fn bytes_remaining(&self) -> usize {
        self.free.len()
    }
}

impl<'a> GlyphArena<'a> for SliceArena<'a> {
    fn allocate(&mut self, len: usize) -> Result<&'a mut [u8], AllocationError> {
        if len > self.free.len() {
            log::trace!(
                "arena exhausted: requested {len}, {} remaining",
                self.free.len()
            );
            return Err(AllocationError {
                requested: len,
                available: self.free.len(),
            });
        }
        let (head, tail) = std::mem::take(&mut self.free).split_at_mut(len);
        self.free = tail;
        self.used += len;
        head.fill(0);
        Ok(head)
    }
}

/// An arena could not satisfy a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    pub requested: usize,
    pub available: usize,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Allocation of {} bytes failed ({} available)",
            self.requested, self.available
        )
    }
}

impl std::error::Error for AllocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_allocation() {
        let mut storage = [0xffu8; 10];
        let mut arena = SliceArena::new(&mut storage);
        let a = arena.allocate(4).unwrap();
        assert_eq!(a, &[0, 0, 0, 0]);
        a[0] = 1;
        let b = arena.allocate(6).unwrap();
        b[5] = 2;
        assert_eq!(arena.bytes_used(), 10);
        assert_eq!(arena.bytes_remaining(), 0);
        assert_eq!(
            arena.allocate(1),
            Err(AllocationError {
                requested: 1,
                available: 0
            })
        );
        assert!(arena.allocate(0).is_ok());
        assert_eq!(storage[0], 1);
        assert_eq!(storage[9], 2);
    }

    #[test]
    fn failed_allocation_keeps_space() {
        let mut storage = [0u8; 3];
        let mut arena = SliceArena::new(&mut storage);
        assert!(arena.allocate(4).is_err());
        assert_eq!(arena.bytes_remaining(), 3);
        assert_eq!(arena.allocate(3).map(|bytes| bytes.len()), Ok(3));
    }
}
