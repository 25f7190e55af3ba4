use crate::error::{ErrorKind, ParseError};

/// Position bookkeeping for diagnostics.
///
/// Offsets are absolute within the logical stream, so a token that started
/// in an earlier chunk keeps a meaningful position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    /// Bytes consumed by earlier chunks.
    consumed: usize,
    line: usize,
    line_start: usize,
    after_cr: bool,

    item_start: usize,
    item_line: usize,
    item_column: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            consumed: 0,
            line: 1,
            line_start: 0,
            after_cr: false,
            item_start: 0,
            item_line: 1,
            item_column: 1,
        }
    }
}

impl Cursor {
    /// Absolute offset of `pos` within the current chunk.
    #[inline]
    pub(crate) fn offset(&self, pos: usize) -> usize {
        self.consumed + pos
    }

    /// Records that `byte` was consumed; `next` is the absolute offset after
    /// it. CR, LF and CRLF each end one line, even when CRLF is split across
    /// chunks.
    #[inline]
    pub(crate) fn track(&mut self, byte: u8, next: usize) {
        match byte {
            b'\r' => {
                self.line += 1;
                self.line_start = next;
                self.after_cr = true;
            }
            b'\n' => {
                if !self.after_cr {
                    self.line += 1;
                }
                self.line_start = next;
                self.after_cr = false;
            }
            _ => self.after_cr = false,
        }
    }

    /// Marks the start of a token at absolute offset `at`.
    pub(crate) fn mark(&mut self, at: usize) {
        self.item_start = at;
        self.item_line = self.line;
        self.item_column = 1 + at.saturating_sub(self.line_start);
    }

    /// Moves the chunk origin forward once `len` bytes of a chunk are done.
    pub(crate) fn advance(&mut self, len: usize) {
        self.consumed += len;
    }

    pub(crate) fn line(&self) -> usize {
        self.item_line
    }

    pub(crate) fn column(&self) -> usize {
        self.item_column
    }

    pub(crate) fn position(&self) -> usize {
        self.item_start
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.item_line,
            column: self.item_column,
        }
    }
}
