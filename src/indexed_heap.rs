use std::fmt;

use itertools::Itertools;
use log::warn;

use crate::error::HeapError;

/// A min-heap with a configurable branching factor whose entries are
/// addressed by caller-assigned key indices in `[0, capacity)`.
///
/// Alongside the usual insert/peek/poll, entries can be re-prioritized
/// ([`update`](Self::update), [`decrease`](Self::decrease),
/// [`increase`](Self::increase)) or removed ([`delete`](Self::delete)) in
/// place by key index, each in O(d·log_d n). Two mutually inverse maps
/// (key index → heap position, heap position → key index) are kept in
/// lock-step across every structural move.
///
/// Capacity and branching factor are fixed at construction; all storage is
/// allocated up front and no operation reallocates. Key indices are owned
/// by the caller: the heap never generates or renumbers them, and a deleted
/// key index may be reinserted with a new value.
pub struct IndexedDaryHeap<V> {
    /// Branching factor, at least 2.
    degree: usize,
    /// Number of entries currently present.
    size: usize,
    /// Key index → heap position. `UNSET` marks an absent key.
    pm: Box<[usize]>,
    /// Heap position → key index. Inverse of `pm` for positions below `size`.
    im: Box<[usize]>,
    /// Key index → value. `Some` exactly for present keys.
    values: Box<[Option<V>]>,
    /// Position → parent position, precomputed at construction.
    parent: Box<[usize]>,
    /// Position → first child position, precomputed at construction.
    child: Box<[usize]>,
}

impl<V: Ord> IndexedDaryHeap<V> {
    const UNSET: usize = usize::MAX;

    /// Creates an empty heap with the given branching factor and key-index
    /// capacity. `degree` is clamped to at least 2 and `capacity` to at
    /// least `degree + 1`.
    pub fn new(degree: usize, capacity: usize) -> Self {
        let d = degree.max(2);
        let n = capacity.max(d + 1);
        if d != degree || n != capacity {
            warn!("clamped heap parameters: degree {degree} -> {d}, capacity {capacity} -> {n}");
        }

        IndexedDaryHeap {
            degree: d,
            size: 0,
            pm: vec![Self::UNSET; n].into_boxed_slice(),
            im: vec![Self::UNSET; n].into_boxed_slice(),
            values: (0..n).map(|_| None).collect(),
            parent: (0..n).map(|i| i.saturating_sub(1) / d).collect(),
            child: (0..n).map(|i| i * d + 1).collect(),
        }
    }

    /// Number of entries currently in the heap.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Branching factor, after clamping.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Maximum number of distinct key indices, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.pm.len()
    }

    /// Checks whether an entry exists for `ki`.
    pub fn contains(&self, ki: usize) -> Result<bool, HeapError> {
        self.key_in_bounds(ki)?;
        Ok(self.pm[ki] != Self::UNSET)
    }

    /// Inserts a new entry for `ki`. The key index must not be present;
    /// reinsertion is allowed once a previous entry has been deleted.
    pub fn insert(&mut self, ki: usize, value: V) -> Result<(), HeapError> {
        if self.contains(ki)? {
            return Err(HeapError::DuplicateKey(ki));
        }

        self.pm[ki] = self.size;
        self.im[self.size] = ki;
        self.values[ki] = Some(value);
        self.size += 1;
        self.swim(self.size - 1);
        Ok(())
    }

    /// Returns a reference to the value stored for `ki`.
    pub fn value_of(&self, ki: usize) -> Result<&V, HeapError> {
        self.key_present(ki)?;
        Ok(self.value(ki))
    }

    /// Key index of the minimum entry.
    pub fn peek_key_index(&self) -> Result<usize, HeapError> {
        if self.size == 0 {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.im[0])
    }

    /// Value of the minimum entry.
    pub fn peek_value(&self) -> Result<&V, HeapError> {
        let ki = self.peek_key_index()?;
        Ok(self.value(ki))
    }

    /// Removes the minimum entry and returns its key index.
    pub fn poll_key_index(&mut self) -> Result<usize, HeapError> {
        let ki = self.peek_key_index()?;
        self.delete(ki)?;
        Ok(ki)
    }

    /// Removes the minimum entry and returns its value.
    pub fn poll_value(&mut self) -> Result<V, HeapError> {
        let ki = self.peek_key_index()?;
        self.delete(ki)
    }

    /// Replaces the value stored for `ki` and returns the previous one.
    pub fn update(&mut self, ki: usize, value: V) -> Result<V, HeapError> {
        self.key_present(ki)?;
        // Present keys always hold a value.
        let old = self.values[ki].replace(value).unwrap();

        // A single replacement can violate heap order toward the children
        // or toward the parent, never both. Try sinking; only if the entry
        // did not move can the violation (if any) be upward.
        let i = self.pm[ki];
        self.sink(i);
        if self.pm[ki] == i {
            self.swim(i);
        }
        Ok(old)
    }

    /// Lowers the value stored for `ki`. Does nothing unless `value` is
    /// strictly less than the current value.
    pub fn decrease(&mut self, ki: usize, value: V) -> Result<(), HeapError> {
        self.key_present(ki)?;
        if value < *self.value(ki) {
            self.values[ki] = Some(value);
            // A decrease can only violate order toward the parent.
            self.swim(self.pm[ki]);
        }
        Ok(())
    }

    /// Raises the value stored for `ki`. Does nothing unless `value` is
    /// strictly greater than the current value.
    pub fn increase(&mut self, ki: usize, value: V) -> Result<(), HeapError> {
        self.key_present(ki)?;
        if value > *self.value(ki) {
            self.values[ki] = Some(value);
            // An increase can only violate order toward the children.
            self.sink(self.pm[ki]);
        }
        Ok(())
    }

    /// Removes the entry for `ki` and returns its value.
    pub fn delete(&mut self, ki: usize) -> Result<V, HeapError> {
        self.key_present(ki)?;

        let i = self.pm[ki];
        self.size -= 1;

        if i != self.size {
            // Relocate the last entry into the vacated slot and restore
            // order at its new position (same either-or logic as update).
            let moved = self.im[self.size];
            self.place(i, moved);
            self.sink(i);
            if self.pm[moved] == i {
                self.swim(i);
            }
        }

        self.pm[ki] = Self::UNSET;
        self.im[self.size] = Self::UNSET;
        // Present keys always hold a value.
        Ok(self.values[ki].take().unwrap())
    }

    /// Iterates over `(key index, value)` pairs in heap-storage order. The
    /// order carries no meaning beyond the first pair being the minimum.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.im[..self.size].iter().map(|&ki| (ki, self.value(ki)))
    }

    /// Recursively verifies min-heap order over all present entries.
    /// Diagnostic aid for tests, not part of the steady-state API.
    pub fn is_min_heap(&self) -> bool {
        self.is_min_heap_below(0)
    }

    fn is_min_heap_below(&self, i: usize) -> bool {
        let from = self.child[i];
        let to = self.size.min(from + self.degree);
        (from..to).all(|c| {
            self.value(self.im[i]) <= self.value(self.im[c]) && self.is_min_heap_below(c)
        })
    }

    /// Moves the entry at position `i` toward the root until its parent is
    /// no longer strictly greater. Shifts blocking parents down and writes
    /// the moving entry once at its final slot.
    fn swim(&mut self, mut i: usize) {
        let ki = self.im[i];
        while i > 0 {
            let p = self.parent[i];
            let above = self.im[p];
            if self.value(above) <= self.value(ki) {
                break;
            }
            self.place(i, above);
            i = p;
        }
        self.place(i, ki);
    }

    /// Moves the entry at position `i` toward the leaves, descending into
    /// the strictly smallest child at each level.
    fn sink(&mut self, mut i: usize) {
        let ki = self.im[i];
        while let Some(c) = self.min_child(i, ki) {
            self.place(i, self.im[c]);
            i = c;
        }
        self.place(i, ki);
    }

    /// Position of the strictly smallest child of `i`, treating `ki` as the
    /// entry occupying `i`. `None` when no child is strictly smaller.
    fn min_child(&self, i: usize, ki: usize) -> Option<usize> {
        let from = self.child[i];
        let to = self.size.min(from + self.degree);

        let mut best = None;
        let mut least = self.value(ki);
        for c in from..to {
            let v = self.value(self.im[c]);
            if v < least {
                best = Some(c);
                least = v;
            }
        }
        best
    }

    /// Writes `ki` into heap slot `i`, updating both maps in lock-step.
    #[inline(always)]
    fn place(&mut self, i: usize, ki: usize) {
        debug_assert!(i < self.im.len());
        debug_assert!(ki < self.pm.len());
        unsafe {
            *self.im.get_unchecked_mut(i) = ki;
            *self.pm.get_unchecked_mut(ki) = i;
        }
    }

    /// Value stored for a present key index.
    #[inline(always)]
    fn value(&self, ki: usize) -> &V {
        debug_assert!(self.pm[ki] != Self::UNSET, "key index {ki} is absent");
        // Present keys always hold a value.
        self.values[ki].as_ref().unwrap()
    }

    fn key_in_bounds(&self, ki: usize) -> Result<(), HeapError> {
        if ki >= self.pm.len() {
            return Err(HeapError::InvalidKey {
                ki,
                capacity: self.pm.len(),
            });
        }
        Ok(())
    }

    fn key_present(&self, ki: usize) -> Result<(), HeapError> {
        if !self.contains(ki)? {
            return Err(HeapError::KeyNotFound(ki));
        }
        Ok(())
    }
}

impl<V> fmt::Debug for IndexedDaryHeap<V> {
    /// Renders the key indices in heap-storage order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.im[..self.size].iter().format(", "))
    }
}
