use alloc::{boxed::Box, vec};

/// Returned when a push would exceed the configured depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StackFull;

/// Names of the currently open elements, root first.
///
/// Storage is `depth_limit` slots of `slot_len` bytes each, plus the length of
/// the name held in every slot. Nothing is allocated after construction.
#[derive(Debug)]
pub(crate) struct NameStack {
    slots: Box<[u8]>,
    lens: Box<[usize]>,
    slot_len: usize,
    depth: usize,
}

impl NameStack {
    pub(crate) fn new(depth_limit: usize, slot_len: usize) -> Self {
        Self {
            slots: vec![0; depth_limit.saturating_mul(slot_len)].into_boxed_slice(),
            lens: vec![0; depth_limit].into_boxed_slice(),
            slot_len,
            depth: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.depth
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub(crate) fn clear(&mut self) {
        self.depth = 0;
    }

    /// Copies `name` into the next free slot.
    ///
    /// Names longer than a slot are cut to the slot size; the tokenizer never
    /// produces such names because the same limit bounds identifiers.
    pub(crate) fn push(&mut self, name: &[u8]) -> Result<(), StackFull> {
        if self.depth >= self.lens.len() {
            return Err(StackFull);
        }
        let len = name.len().min(self.slot_len);
        let start = self.depth * self.slot_len;
        self.slots[start..start + len].copy_from_slice(&name[..len]);
        self.lens[self.depth] = len;
        self.depth += 1;
        Ok(())
    }

    /// Removes the innermost name. Returns `false` if the stack was empty.
    pub(crate) fn pop(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        true
    }

    pub(crate) fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.depth {
            return None;
        }
        let start = index * self.slot_len;
        Some(&self.slots[start..start + self.lens[index]])
    }

    pub(crate) fn top(&self) -> Option<&[u8]> {
        self.depth.checked_sub(1).and_then(|i| self.get(i))
    }
}
