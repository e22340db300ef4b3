//! Fixed-capacity d-ary min-heaps, including an indexed variant addressed
//! by stable key indices.
//!
//! The core type is [`IndexedDaryHeap`]: a priority queue whose entries are
//! identified by caller-assigned integer key indices, supporting in-place
//! priority mutation (decrease-key, increase-key, full update) and removal
//! of arbitrary entries in O(d·log_d n). [`DaryHeap`] is the plain
//! non-indexed variant, and [`QuickRemovalHeap`] trades extra memory for
//! O(log n) removal of entries addressed by value instead of by key.
//!
//! All types are single-threaded by design: operations run to completion
//! without blocking, and callers sharing a heap across threads must
//! serialize access externally.

pub mod dary_heap;
pub mod error;
pub mod indexed_heap;
pub mod quick_removal;

pub use dary_heap::DaryHeap;
pub use error::HeapError;
pub use indexed_heap::IndexedDaryHeap;
pub use quick_removal::QuickRemovalHeap;
