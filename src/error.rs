use thiserror::Error;

/// Errors surfaced by the heap types.
///
/// Every operation validates its preconditions before mutating anything, so
/// a returned error always means the heap is exactly as it was before the
/// call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Key index outside the `[0, capacity)` range fixed at construction.
    #[error("key index {ki} is out of bounds for capacity {capacity}")]
    InvalidKey { ki: usize, capacity: usize },

    /// Insert of a key index that is already present.
    #[error("key index {0} is already present")]
    DuplicateKey(usize),

    /// Key-addressed operation on an absent key index.
    #[error("no entry for key index {0}")]
    KeyNotFound(usize),

    /// Peek or poll on an empty heap.
    #[error("heap is empty")]
    EmptyHeap,
}
