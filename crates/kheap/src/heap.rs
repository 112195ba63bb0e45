//! Indexed k-ary min-heap over vertex ids.
//!
//! Elements are vertex ids in `0..capacity`; each carries one key, its
//! tentative distance, stored alongside the heap. `position` is the inverse
//! of `slots`, which is what makes decrease-key and arbitrary deletion
//! O(log_k n) instead of O(n).
//!
//! Layout: the root is slot 0, `parent(i) = (i - 1) / k` and the `j`-th child
//! of `i` is `k * i + j + 1`.

use crate::INF;
use crate::error::{Error, Result};
use crate::observer::{HeapObserver, Operation};

const ABSENT: usize = usize::MAX;

#[derive(Clone, Debug)]
pub struct KaryHeap<O: HeapObserver = ()> {
    slots: Vec<usize>,
    position: Vec<usize>,
    distance: Vec<u64>,
    arity: usize,
    observer: O,
}

impl KaryHeap {
    /// Heap for vertex ids `0..capacity` with fan-out `arity`.
    pub fn new(capacity: usize, arity: usize) -> Result<Self> {
        Self::with_observer(capacity, arity, ())
    }
}

impl<O: HeapObserver> KaryHeap<O> {
    pub fn with_observer(capacity: usize, arity: usize, observer: O) -> Result<Self> {
        if arity < 2 {
            return Err(Error::InvalidArity(arity as i64));
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            position: vec![ABSENT; capacity],
            distance: vec![INF; capacity],
            arity,
            observer,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.position(vertex).is_some()
    }

    /// Slot currently holding `vertex`.
    #[inline]
    pub fn position(&self, vertex: usize) -> Option<usize> {
        match self.position.get(vertex) {
            Some(&p) if p != ABSENT => Some(p),
            _ => None,
        }
    }

    /// Best known distance of `vertex`, [`INF`] if none was ever set.
    /// Independent of membership: finalized vertices keep their distance.
    #[inline]
    pub fn distance(&self, vertex: usize) -> u64 {
        self.distance.get(vertex).copied().unwrap_or(INF)
    }

    pub fn peek_min(&self) -> Result<usize> {
        self.slots.first().copied().ok_or(Error::EmptyHeap)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Adds `vertex` keyed by its current distance.
    pub fn insert(&mut self, vertex: usize) -> Result<()> {
        self.check_vertex(vertex)?;
        if self.contains(vertex) {
            return Err(Error::AlreadyPresent(vertex));
        }
        if self.len() == self.capacity() {
            return Err(Error::HeapFull(self.capacity()));
        }

        self.observer.inserted();
        let slot = self.slots.len();
        self.slots.push(vertex);
        self.position[vertex] = slot;
        self.observer.resized(self.slots.len());
        self.sift_up(slot, Operation::Insert);
        Ok(())
    }

    /// Removes and returns the vertex at the root.
    pub fn extract_min(&mut self) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::EmptyHeap);
        }
        self.observer.extracted();
        self.remove_slot(0, Operation::ExtractMin)
    }

    /// Removes and returns the vertex stored in slot `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<usize> {
        self.remove_slot(index, Operation::Delete)
    }

    /// Sets the key of `vertex`, inserting it if absent. Both directions are
    /// accepted; an unchanged key leaves the structure untouched.
    pub fn update(&mut self, vertex: usize, distance: u64) -> Result<()> {
        self.check_vertex(vertex)?;
        self.observer.updated();

        let Some(slot) = self.position(vertex) else {
            self.distance[vertex] = distance;
            return self.insert(vertex);
        };

        let old = self.distance[vertex];
        self.distance[vertex] = distance;
        if distance < old {
            self.sift_up(slot, Operation::Update);
        } else if distance > old {
            self.sift_down(slot, Operation::Update);
        }
        Ok(())
    }

    /// Records a distance without inserting. For a vertex already in the heap
    /// this goes through [`update`](Self::update) so the heap order holds.
    pub fn set_distance(&mut self, vertex: usize, distance: u64) -> Result<()> {
        self.check_vertex(vertex)?;
        if self.contains(vertex) {
            return self.update(vertex, distance);
        }
        self.distance[vertex] = distance;
        Ok(())
    }

    /// Forgets every element and distance so the heap can serve another search.
    pub fn clear(&mut self) {
        for &v in &self.slots {
            self.position[v] = ABSENT;
        }
        self.slots.clear();
        self.distance.fill(INF);
    }

    #[inline]
    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.capacity() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex,
                limit: self.capacity(),
            })
        }
    }

    #[inline]
    fn parent(&self, i: usize) -> usize {
        (i - 1) / self.arity
    }

    #[inline]
    fn first_child(&self, i: usize) -> usize {
        i.saturating_mul(self.arity).saturating_add(1)
    }

    #[inline]
    fn key(&self, i: usize) -> u64 {
        self.distance[self.slots[i]]
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        self.position[self.slots[i]] = i;
        self.position[self.slots[j]] = j;
    }

    fn remove_slot(&mut self, index: usize, op: Operation) -> Result<usize> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }

        let removed = self.slots.swap_remove(index);
        self.position[removed] = ABSENT;

        if index < self.slots.len() {
            self.position[self.slots[index]] = index;
            if index > 0 && self.key(index) < self.key(self.parent(index)) {
                self.sift_up(index, op);
                return Ok(removed);
            }
        }
        self.sift_down(index, op);
        Ok(removed)
    }

    fn sift_up(&mut self, mut i: usize, op: Operation) {
        loop {
            self.observer.sift_up(op);
            if i == 0 {
                return;
            }
            let p = self.parent(i);
            if self.key(p) <= self.key(i) {
                return;
            }
            self.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize, op: Operation) {
        let len = self.len();
        loop {
            self.observer.sift_down(op);
            let first = self.first_child(i);
            if first >= len {
                return;
            }

            // Leftmost child wins ties.
            let end = first.saturating_add(self.arity).min(len);
            let mut best = first;
            let mut best_key = self.key(first);
            for c in first + 1..end {
                let k = self.key(c);
                if k < best_key {
                    best = c;
                    best_key = k;
                }
            }

            if best_key >= self.key(i) {
                return;
            }
            self.swap(i, best);
            i = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::observer::OperationCounter;

    fn assert_invariants<O: HeapObserver>(heap: &KaryHeap<O>) {
        for (i, &v) in heap.slots.iter().enumerate() {
            assert_eq!(heap.position[v], i, "position of vertex {v}");
            if i > 0 {
                let p = heap.parent(i);
                assert!(
                    heap.key(p) <= heap.key(i),
                    "slot {i} key {} below parent slot {p} key {}",
                    heap.key(i),
                    heap.key(p)
                );
            }
        }
        let present = heap.position.iter().filter(|&&p| p != ABSENT).count();
        assert_eq!(present, heap.len());
        assert!(heap.len() <= heap.capacity());
    }

    fn depth(heap: &KaryHeap, mut slot: usize) -> usize {
        let mut d = 0;
        while slot > 0 {
            slot = heap.parent(slot);
            d += 1;
        }
        d
    }

    #[test]
    fn rejects_arity_below_two() {
        for k in [0, 1] {
            assert_eq!(KaryHeap::new(8, k).err(), Some(Error::InvalidArity(k as i64)));
        }
        assert!(KaryHeap::new(8, 2).is_ok());
        assert!(KaryHeap::new(1, 64).is_ok());
    }

    #[test]
    fn single_element_round_trip() {
        let mut heap = KaryHeap::new(4, 2).unwrap();
        heap.update(3, 17).unwrap();
        assert_eq!(heap.peek_min(), Ok(3));
        assert_eq!(heap.extract_min(), Ok(3));
        assert!(heap.is_empty());
        assert!(!heap.contains(3));
        assert_eq!(heap.distance(3), 17);
    }

    #[test]
    fn delete_sole_element_empties() {
        let mut heap = KaryHeap::new(4, 3).unwrap();
        heap.set_distance(1, 5).unwrap();
        heap.insert(1).unwrap();
        assert_eq!(heap.delete_at(0), Ok(1));
        assert!(heap.is_empty());
        assert_eq!(heap.position(1), None);
    }

    #[test]
    fn failures_leave_heap_untouched() {
        let mut heap = KaryHeap::new(4, 2).unwrap();
        assert_eq!(heap.extract_min(), Err(Error::EmptyHeap));
        assert_eq!(heap.peek_min(), Err(Error::EmptyHeap));

        heap.update(1, 4).unwrap();
        heap.update(2, 2).unwrap();
        assert_eq!(
            heap.delete_at(2),
            Err(Error::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(heap.insert(2), Err(Error::AlreadyPresent(2)));
        assert_eq!(
            heap.insert(4),
            Err(Error::VertexOutOfRange { vertex: 4, limit: 4 })
        );
        assert_eq!(
            heap.update(9, 0),
            Err(Error::VertexOutOfRange { vertex: 9, limit: 4 })
        );
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.peek_min(), Ok(2));
        assert_invariants(&heap);
    }

    #[test]
    fn sift_down_prefers_leftmost_minimal_child() {
        let mut heap = KaryHeap::new(6, 3).unwrap();
        for (v, d) in [(1, 0), (2, 5), (3, 5), (4, 5), (5, 9)] {
            heap.update(v, d).unwrap();
        }
        assert_eq!(heap.slots, vec![1, 2, 3, 4, 5]);

        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.slots, vec![2, 5, 3, 4]);
        assert_invariants(&heap);
    }

    #[test]
    fn delete_interior_can_sift_up() {
        // Slot 3 hangs under slot 1, and the last element moved into it is smaller than that parent.
        let mut heap = KaryHeap::new(8, 2).unwrap();
        for (v, d) in [(1, 0), (2, 10), (3, 1), (4, 11), (5, 12), (6, 2)] {
            heap.update(v, d).unwrap();
        }
        assert_invariants(&heap);
        let slot = heap.position(4).unwrap();
        assert_eq!(heap.delete_at(slot), Ok(4));
        assert_invariants(&heap);
        let order: Vec<_> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
        assert_eq!(order, vec![1, 3, 6, 2, 5]);
    }

    #[test]
    fn update_moves_in_the_right_direction() {
        let mut rng = StdRng::seed_from_u64(0xDEC0_0001);
        for k in [2, 3, 5] {
            let n = 64;
            let mut heap = KaryHeap::new(n, k).unwrap();
            for v in 0..n {
                heap.update(v, rng.random_range(100..1_000)).unwrap();
            }

            for _ in 0..200 {
                let v = rng.random_range(0..n);
                let before = depth(&heap, heap.position(v).unwrap());
                let old = heap.distance(v);
                let new = rng.random_range(0..1_100);
                heap.update(v, new).unwrap();
                let after = depth(&heap, heap.position(v).unwrap());
                if new < old {
                    assert!(after <= before, "k={k} decrease moved {v} deeper");
                } else if new > old {
                    assert!(after >= before, "k={k} increase moved {v} up");
                } else {
                    assert_eq!(after, before);
                }
                assert_invariants(&heap);
            }
        }
    }

    #[test]
    fn equal_update_is_a_no_op() {
        let mut heap = KaryHeap::new(5, 2).unwrap();
        for (v, d) in [(0, 3), (1, 3), (2, 3), (3, 3)] {
            heap.update(v, d).unwrap();
        }
        let before = heap.slots.clone();
        heap.update(3, 3).unwrap();
        assert_eq!(heap.slots, before);
    }

    #[test]
    fn set_distance_on_member_keeps_order() {
        let mut heap = KaryHeap::new(4, 2).unwrap();
        heap.update(0, 5).unwrap();
        heap.update(1, 6).unwrap();
        heap.set_distance(1, 1).unwrap();
        assert_eq!(heap.peek_min(), Ok(1));
        heap.set_distance(3, 0).unwrap();
        assert!(!heap.contains(3));
        assert_eq!(heap.distance(3), 0);
        assert_invariants(&heap);
    }

    #[test]
    fn random_operations_match_linear_scan() {
        for k in [2, 3, 4, 5, 10] {
            for seed in 0..8_u64 {
                let mut rng = StdRng::seed_from_u64(0x4EA9_0000 + seed * 31 + k as u64);
                let n = 96;
                let mut heap = KaryHeap::new(n, k).unwrap();

                for _ in 0..2_000 {
                    match rng.random_range(0..10) {
                        0..=3 => {
                            let v = rng.random_range(0..n);
                            heap.update(v, rng.random_range(0..500)).unwrap();
                        }
                        4..=6 if !heap.is_empty() => {
                            let expected = heap
                                .slots
                                .iter()
                                .map(|&v| heap.distance(v))
                                .min()
                                .unwrap();
                            let v = heap.extract_min().unwrap();
                            assert_eq!(heap.distance(v), expected, "k={k} seed={seed}");
                            assert!(!heap.contains(v));
                        }
                        7 if !heap.is_empty() => {
                            let slot = rng.random_range(0..heap.len());
                            let v = heap.slots[slot];
                            assert_eq!(heap.delete_at(slot), Ok(v));
                        }
                        _ => {
                            let v = rng.random_range(0..n);
                            if !heap.contains(v) {
                                heap.set_distance(v, rng.random_range(0..500)).unwrap();
                                heap.insert(v).unwrap();
                            }
                        }
                    }
                    assert_invariants(&heap);
                }
            }
        }
    }

    #[test]
    fn clear_resets_state() {
        let mut heap = KaryHeap::new(6, 4).unwrap();
        for v in 0..6 {
            heap.update(v, 10 - v as u64).unwrap();
        }
        heap.clear();
        assert!(heap.is_empty());
        for v in 0..6 {
            assert!(!heap.contains(v));
            assert_eq!(heap.distance(v), INF);
        }
        heap.update(2, 1).unwrap();
        assert_eq!(heap.extract_min(), Ok(2));
    }

    #[test]
    fn observer_sees_every_pass() {
        let mut counter = OperationCounter::new();
        let mut heap = KaryHeap::with_observer(4, 2, &mut counter).unwrap();
        heap.update(1, 5).unwrap();
        heap.update(2, 3).unwrap();
        heap.extract_min().unwrap();
        drop(heap);

        assert_eq!(counter.update_calls, 2);
        assert_eq!(counter.insert_calls, 2);
        assert_eq!(counter.extract_min_calls, 1);
        // root pass for the first insert, swap + root pass for the second
        assert_eq!(counter.insert_sift_up, 3);
        assert_eq!(counter.extract_min_sift_down, 1);
        assert_eq!(counter.sift_up_passes, 3);
        assert_eq!(counter.sift_down_passes, 1);
        assert_eq!(counter.max_heap_size, 2);
    }
}
