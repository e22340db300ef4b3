/// A plain d-ary min-heap without key addressing.
///
/// Shares the sift logic of [`IndexedDaryHeap`](crate::IndexedDaryHeap) but
/// stores values directly in a growable array and computes parent/child
/// positions inline. Use this when entries never need to be re-prioritized
/// or removed from the middle.
pub struct DaryHeap<V> {
    /// Branching factor, at least 2.
    degree: usize,
    heap: Vec<V>,
}

impl<V: Ord> DaryHeap<V> {
    pub fn new(degree: usize) -> Self {
        Self::with_capacity(degree, 0)
    }

    /// Creates an empty heap with pre-allocated room for `capacity` values.
    /// `degree` is clamped to at least 2.
    pub fn with_capacity(degree: usize, capacity: usize) -> Self {
        DaryHeap {
            degree: degree.max(2),
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Smallest value, or `None` when empty.
    pub fn peek(&self) -> Option<&V> {
        self.heap.first()
    }

    pub fn push(&mut self, value: V) {
        self.heap.push(value);
        self.swim(self.heap.len() - 1);
    }

    /// Removes and returns the smallest value, or `None` when empty.
    pub fn pop(&mut self) -> Option<V> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let root = self.heap.pop();
        if !self.heap.is_empty() {
            self.sink(0);
        }
        root
    }

    /// Linear containment scan.
    pub fn contains(&self, value: &V) -> bool {
        self.heap.contains(value)
    }

    fn swim(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) / self.degree;
            if self.heap[p] <= self.heap[i] {
                break;
            }
            self.heap.swap(i, p);
            i = p;
        }
    }

    fn sink(&mut self, mut i: usize) {
        while let Some(c) = self.min_child(i) {
            self.heap.swap(i, c);
            i = c;
        }
    }

    /// Index of the strictly smallest child of `i`, if any child beats it.
    fn min_child(&self, i: usize) -> Option<usize> {
        let from = i * self.degree + 1;
        let to = self.heap.len().min(from + self.degree);

        let mut best = None;
        for c in from..to {
            let least = match best {
                Some(b) => &self.heap[b],
                None => &self.heap[i],
            };
            if self.heap[c] < *least {
                best = Some(c);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn empty_heap_behaviour() {
        let mut heap = DaryHeap::<i32>::new(4);
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = DaryHeap::with_capacity(3, 30);
        for v in [3, 2, 5, 6, 7, 9, 4, 8, 1] {
            heap.push(v);
        }
        for expected in 1..=9 {
            assert_eq!(heap.pop(), Some(expected));
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn contains_scans_all_values() {
        let mut heap = DaryHeap::new(2);
        for v in [5, 1, 9] {
            heap.push(v);
        }
        assert!(heap.contains(&9));
        assert!(!heap.contains(&2));
        heap.clear();
        assert!(!heap.contains(&9));
    }

    #[test]
    fn matches_reference_queue_across_degrees() {
        let mut rng = fastrand::Rng::with_seed(0xD4EE);
        for degree in 2..=8 {
            let n = 1 + rng.usize(..500);
            let mut heap = DaryHeap::with_capacity(degree, n);
            let mut oracle = BinaryHeap::with_capacity(n);
            let poll_chance = rng.f64();

            for _ in 0..n {
                let v = rng.i32(-1_000..1_000);
                heap.push(v);
                oracle.push(Reverse(v));

                if rng.f64() < poll_chance {
                    let Reverse(expected) = oracle.pop().unwrap();
                    assert_eq!(heap.pop(), Some(expected));
                }
                assert_eq!(heap.len(), oracle.len());
                if let Some(Reverse(min)) = oracle.peek() {
                    assert_eq!(heap.peek(), Some(min));
                }
            }
            while let Some(Reverse(expected)) = oracle.pop() {
                assert_eq!(heap.pop(), Some(expected));
            }
            assert!(heap.is_empty());
        }
    }
}
