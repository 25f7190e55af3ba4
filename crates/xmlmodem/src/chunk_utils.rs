//! Helpers for splitting a document into chunks, for tests and fuzzing.
use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of approximately equal size.
///
/// Fewer chunks are returned when `payload` is shorter than `parts`, and
/// none at all when it is empty.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the given offsets.
///
/// Offsets are clamped to the payload and sorted; duplicates yield empty
/// chunks, which the parser accepts.
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a [u8], offsets: &[usize]) -> Vec<&'a [u8]> {
    let mut cuts: Vec<usize> = offsets.iter().map(|&o| o.min(payload.len())).collect();
    cuts.sort_unstable();
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        chunks.push(&payload[start..cut]);
        start = cut;
    }
    chunks.push(&payload[start..]);
    chunks
}
