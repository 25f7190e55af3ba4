//! Scanning primitives over the chunk being fed.
//!
//! [`Input`] owns the read position within one chunk and the [`Cursor`] for
//! the duration of a `feed` call; every consumed byte goes through
//! [`Input::bump`] so line tracking cannot be skipped. Slices handed out by
//! [`Input::take_until`] and [`Input::slice`] borrow the caller's chunk, not
//! the input, so they can be passed to the observer while scanning goes on.

use crate::{cursor::Cursor, token_buffer::TokenBuffer};

/// Outcome of scanning a name or attribute value into the token buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// The token ended; the terminating byte has not been consumed.
    Ok,
    /// The chunk ran out mid-token. Everything read so far is in the buffer.
    NeedMoreData,
    /// The next byte belongs to the token but would exceed the limit. It has
    /// not been consumed.
    LimitExceeded,
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\x0B' | b'\r' | b'\n')
}

#[inline]
pub(crate) fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b':' | b'-')
}

pub(crate) struct Input<'src> {
    bytes: &'src [u8],
    pos: usize,
    pub(crate) cursor: Cursor,
}

impl<'src> Input<'src> {
    pub(crate) fn new(bytes: &'src [u8], cursor: Cursor) -> Self {
        Self {
            bytes,
            pos: 0,
            cursor,
        }
    }

    /// Hands the cursor back, with the consumed bytes accounted for.
    pub(crate) fn finish(mut self) -> Cursor {
        self.cursor.advance(self.pos);
        self.cursor
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consumes the next byte.
    #[inline]
    pub(crate) fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.pos += 1;
            let next = self.cursor.offset(self.pos);
            self.cursor.track(byte, next);
        }
    }

    /// Marks the next byte as the start of a token.
    pub(crate) fn mark(&mut self) {
        let at = self.cursor.offset(self.pos);
        self.cursor.mark(at);
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'src [u8] {
        let bytes = self.bytes;
        &bytes[start..end]
    }

    /// Skips whitespace and returns the next byte, if the chunk has one.
    pub(crate) fn skip_whitespace(&mut self) -> Option<u8> {
        while let Some(byte) = self.peek() {
            if !is_whitespace(byte) {
                return Some(byte);
            }
            self.bump();
        }
        None
    }

    /// Consumes bytes up to `delimiter`.
    ///
    /// Returns the consumed bytes and whether the delimiter was found; the
    /// delimiter itself is left in place.
    pub(crate) fn take_until(&mut self, delimiter: u8) -> (&'src [u8], bool) {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == delimiter {
                return (self.slice(start, self.pos), true);
            }
            self.bump();
        }
        (self.slice(start, self.pos), false)
    }

    /// Appends identifier bytes (`[A-Za-z0-9_:-]`) to `token`.
    ///
    /// With `discard` set the bytes are consumed but not stored; this is how
    /// the rest of a truncated name is dropped.
    pub(crate) fn scan_identifier(
        &mut self,
        token: &mut TokenBuffer,
        limit: usize,
        discard: bool,
    ) -> Scan {
        while let Some(byte) = self.peek() {
            if !is_identifier_byte(byte) {
                return Scan::Ok;
            }
            if !discard && !token.push(byte, limit) {
                return Scan::LimitExceeded;
            }
            self.bump();
        }
        Scan::NeedMoreData
    }

    /// Appends attribute value bytes to `token` until `quote`.
    ///
    /// The closing quote is left in place. `discard` works as in
    /// [`scan_identifier`](Self::scan_identifier).
    pub(crate) fn scan_value(
        &mut self,
        token: &mut TokenBuffer,
        limit: usize,
        quote: u8,
        discard: bool,
    ) -> Scan {
        while let Some(byte) = self.peek() {
            if byte == quote {
                return Scan::Ok;
            }
            if !discard && !token.push(byte, limit) {
                return Scan::LimitExceeded;
            }
            self.bump();
        }
        Scan::NeedMoreData
    }
}
