use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// A binary min-heap with an auxiliary value → positions multimap, giving
/// O(1) containment checks and O(log n) removal of arbitrary values at the
/// cost of O(n) extra memory.
///
/// Values double as map keys, so they must be hashable and cheap to clone.
/// For key-addressed entries with mutable priorities use
/// [`IndexedDaryHeap`](crate::IndexedDaryHeap) instead.
pub struct QuickRemovalHeap<V> {
    heap: Vec<V>,
    /// Value → heap positions currently holding it. Every stored value has
    /// a non-empty set here.
    positions: HashMap<V, BTreeSet<usize>>,
}

impl<V: Ord + Hash + Clone> QuickRemovalHeap<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        QuickRemovalHeap {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Smallest value, or `None` when empty.
    pub fn peek(&self) -> Option<&V> {
        self.heap.first()
    }

    /// O(1) containment check via the position map.
    pub fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    pub fn push(&mut self, value: V) {
        let i = self.heap.len();
        self.positions.entry(value.clone()).or_default().insert(i);
        self.heap.push(value);
        self.swim(i);
    }

    /// Removes and returns the smallest value, or `None` when empty.
    pub fn pop(&mut self) -> Option<V> {
        self.remove_at(0)
    }

    /// Removes one occurrence of `value`, returning whether it was present.
    /// Among duplicates, the occurrence at the highest heap position goes.
    pub fn remove(&mut self, value: &V) -> bool {
        match self.positions.get(value).and_then(|set| set.last().copied()) {
            Some(i) => {
                self.remove_at(i);
                true
            }
            None => false,
        }
    }

    /// Recursively verifies min-heap order. Diagnostic aid for tests.
    pub fn is_min_heap(&self) -> bool {
        self.is_min_heap_below(0)
    }

    fn remove_at(&mut self, i: usize) -> Option<V> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(i, last);
        // Checked non-empty above.
        let removed = self.heap.pop().unwrap();
        self.unmap(&removed, last);

        if i == last {
            return Some(removed);
        }

        // The relocated value can violate order in at most one direction.
        // Sink first; only an entry that did not move can need to swim.
        let relocated = self.heap[i].clone();
        self.sink(i);
        if self.heap[i] == relocated {
            self.swim(i);
        }

        Some(removed)
    }

    fn swim(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) / 2;
            if self.heap[p] <= self.heap[i] {
                break;
            }
            self.swap(i, p);
            i = p;
        }
    }

    fn sink(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;

            let mut smallest = left;
            if right < self.heap.len() && self.heap[right] < self.heap[left] {
                smallest = right;
            }

            if left >= self.heap.len() || self.heap[i] <= self.heap[smallest] {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    /// Swaps two heap slots, keeping the position map in lock-step. Both
    /// removals happen before both inserts so that equal values sharing a
    /// position set end up with the right entries.
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        // Stored values always have a position set.
        self.positions.get_mut(&self.heap[i]).unwrap().remove(&i);
        self.positions.get_mut(&self.heap[j]).unwrap().remove(&j);
        self.positions.get_mut(&self.heap[i]).unwrap().insert(j);
        self.positions.get_mut(&self.heap[j]).unwrap().insert(i);
        self.heap.swap(i, j);
    }

    /// Drops position `i` from `value`'s set, removing the set when it was
    /// the last occurrence.
    fn unmap(&mut self, value: &V, i: usize) {
        // Stored values always have a position set.
        let set = self.positions.get_mut(value).unwrap();
        set.remove(&i);
        if set.is_empty() {
            self.positions.remove(value);
        }
    }

    fn is_min_heap_below(&self, i: usize) -> bool {
        let len = self.heap.len();
        if i >= len {
            return true;
        }
        let left = 2 * i + 1;
        let right = left + 1;
        if left < len && self.heap[i] > self.heap[left] {
            return false;
        }
        if right < len && self.heap[i] > self.heap[right] {
            return false;
        }
        self.is_min_heap_below(left) && self.is_min_heap_below(right)
    }
}

impl<V: Ord + Hash + Clone> Default for QuickRemovalHeap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Ord + Hash + Clone> FromIterator<V> for QuickRemovalHeap<V> {
    /// Builds the heap bottom-up in O(n).
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let heap: Vec<V> = iter.into_iter().collect();
        let mut positions: HashMap<V, BTreeSet<usize>> = HashMap::with_capacity(heap.len());
        for (i, value) in heap.iter().enumerate() {
            positions.entry(value.clone()).or_default().insert(i);
        }

        let mut this = QuickRemovalHeap { heap, positions };
        for i in (0..this.heap.len() / 2).rev() {
            this.sink(i);
        }
        this
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn empty_heap_behaviour() {
        let mut heap = QuickRemovalHeap::<i32>::new();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
        assert!(!heap.remove(&3));
    }

    #[test]
    fn pops_in_ascending_order_with_duplicates() {
        let mut heap = QuickRemovalHeap::new();
        for v in [3, 2, 5, 6, 7, 9, 4, 8, 1, 2, 2] {
            heap.push(v);
            assert!(heap.is_min_heap());
        }
        for expected in [1, 2, 2, 2, 3, 4, 5, 6, 7, 8, 9] {
            assert_eq!(heap.pop(), Some(expected));
            assert!(heap.is_min_heap());
        }
    }

    #[test]
    fn removes_arbitrary_values() {
        let mut heap: QuickRemovalHeap<i32> = [11, 7, 2, 13, 7, 2].into_iter().collect();
        assert!(heap.is_min_heap());
        assert_eq!(heap.len(), 6);

        assert!(heap.contains(&7));
        assert!(heap.remove(&7));
        assert!(heap.is_min_heap());
        // One occurrence survives.
        assert!(heap.contains(&7));
        assert!(heap.remove(&7));
        assert!(!heap.contains(&7));
        assert!(!heap.remove(&7));

        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(11));
        assert_eq!(heap.pop(), Some(13));
        assert!(heap.is_empty());
    }

    #[test]
    fn clear_resets_both_structures() {
        let mut heap: QuickRemovalHeap<i32> = [4, 1, 3].into_iter().collect();
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(&1));
        heap.push(1);
        assert_eq!(heap.pop(), Some(1));
    }

    #[test]
    fn matches_reference_queue_with_random_removals() {
        let mut rng = fastrand::Rng::with_seed(0xF00D);
        for _ in 0..50 {
            let n = 1 + rng.usize(..200);
            let mut heap = QuickRemovalHeap::with_capacity(n);
            // Multiset shadow of the heap contents.
            let mut shadow: Vec<i32> = Vec::with_capacity(n);

            for _ in 0..n {
                let v = rng.i32(-50..50);
                heap.push(v);
                shadow.push(v);

                match rng.usize(..3) {
                    // Remove a random present value.
                    0 => {
                        let at = rng.usize(..shadow.len());
                        let v = shadow.swap_remove(at);
                        assert!(heap.remove(&v));
                    }
                    // Pop the minimum.
                    1 => {
                        let (at, _) =
                            shadow.iter().enumerate().min_by_key(|(_, v)| **v).unwrap();
                        let min = shadow.swap_remove(at);
                        assert_eq!(heap.pop(), Some(min));
                    }
                    _ => {}
                }

                assert!(heap.is_min_heap());
                assert_eq!(heap.len(), shadow.len());
                assert_eq!(heap.peek(), shadow.iter().min());
            }

            // Drain and compare against a reference queue.
            let mut oracle: BinaryHeap<Reverse<i32>> =
                shadow.iter().map(|&v| Reverse(v)).collect();
            while let Some(Reverse(expected)) = oracle.pop() {
                assert_eq!(heap.pop(), Some(expected));
            }
            assert!(heap.is_empty());
        }
    }
}
