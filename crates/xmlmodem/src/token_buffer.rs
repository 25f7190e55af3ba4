use alloc::{boxed::Box, vec};

/// Fixed-capacity scratch for the token in flight.
///
/// Element names, attribute names and attribute values take turns: exactly
/// one of them owns the buffer at a time, and each is reported before the
/// next one starts. Clearing only resets the write mark.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    bytes: Box<[u8]>,
    len: usize,
}

impl TokenBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Appends `byte` unless the token already holds `limit` bytes.
    ///
    /// Returns `false`, leaving the buffer untouched, when the byte does not
    /// fit.
    #[inline]
    pub(crate) fn push(&mut self, byte: u8, limit: usize) -> bool {
        if self.len >= limit {
            return false;
        }
        let Some(slot) = self.bytes.get_mut(self.len) else {
            return false;
        };
        *slot = byte;
        self.len += 1;
        true
    }
}
