//! Fixed-size chunking
//!
//! Boundaries are a pure function of content length and `CHUNK_SIZE`, so the
//! decrypt side can reconstruct them without stored offsets. `CHUNK_SIZE` is
//! a protocol constant: changing it invalidates every existing container.

use chunkvault_core::CHUNK_SIZE;

/// Split `data` into fixed-size chunks of `CHUNK_SIZE` bytes.
///
/// The final chunk holds the remainder (1..=CHUNK_SIZE bytes); empty input
/// yields an empty sequence. Deterministic and restartable: the same input
/// always produces the same chunks.
pub fn split_chunks(data: &[u8]) -> Vec<&[u8]> {
    if data.is_empty() {
        return vec![];
    }
    data.chunks(CHUNK_SIZE).collect()
}

/// Number of chunks a source of `len` bytes splits into.
pub fn chunk_count(len: usize) -> usize {
    len.div_ceil(CHUNK_SIZE)
}
