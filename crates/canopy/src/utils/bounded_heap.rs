//! A helper struct for maintaining a max heap of fixed capacity over a borrowed buffer.

use core::cmp::Ordering;

use super::DistanceValue;

/// One nearest-neighbor candidate: a leaf's item index and its distance from the query geometry.
///
/// Candidates are ordered by distance alone; the item index does not participate in comparisons.
/// The metric contract keeps distances non-negative and comparable, so the `Ord` implementation
/// treats incomparable distances as unreachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Candidate<T> {
    /// The caller-space index of the leaf's primitive.
    pub item: usize,
    /// The distance from the query geometry to the leaf's bounding volume.
    pub distance: T,
}

impl<T: DistanceValue> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl<T: DistanceValue> Eq for Candidate<T> {}

impl<T: DistanceValue> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: DistanceValue> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .map_or_else(|| unreachable!("distances are comparable"), |ordering| ordering)
    }
}

/// A max heap of fixed capacity over a borrowed candidate buffer.
///
/// This is useful for maintaining the `k` nearest neighbors in a search algorithm without owning
/// any memory: the backing buffer is one query's sub-range of the scratch allocation provisioned
/// for the whole batch. The heap is used single-threadedly within one query.
#[derive(Debug)]
pub struct BoundedHeap<'a, T> {
    /// The backing buffer; `items[..len]` holds the heap, with the farthest candidate at the top.
    items: &'a mut [Candidate<T>],
    /// The number of candidates currently on the heap.
    len: usize,
}

impl<'a, T: DistanceValue> BoundedHeap<'a, T> {
    /// Creates an empty heap over the given buffer. The buffer's length is the heap's capacity.
    pub fn new(items: &'a mut [Candidate<T>]) -> Self {
        Self { items, len: 0 }
    }

    /// The fixed capacity of the heap.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// The number of candidates currently on the heap.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the heap is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether the heap is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len >= self.items.len()
    }

    /// Peeks at the farthest retained candidate, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&Candidate<T>> {
        (self.len > 0).then(|| &self.items[0])
    }

    /// Pushes a candidate onto the heap, maintaining the fixed capacity.
    ///
    /// On a full heap this is a replace-top: the farthest retained candidate is dropped when the
    /// new one is nearer (one sift-down), and the push is a no-op otherwise.
    pub fn push(&mut self, candidate: Candidate<T>) {
        if self.len < self.items.len() {
            self.items[self.len] = candidate;
            self.len += 1;
            self.sift_up(self.len - 1);
        } else if self.len > 0 && candidate < self.items[0] {
            self.items[0] = candidate;
            self.sift_down(0);
        }
    }

    /// Consumes the heap and returns the retained candidates sorted by nondecreasing distance.
    ///
    /// Sorting destroys the heap ordering of the backing buffer, which is fine because the heap
    /// is gone afterwards.
    #[must_use]
    pub fn into_sorted(self) -> &'a mut [Candidate<T>] {
        let Self { items, len } = self;
        let filled = &mut items[..len];
        filled.sort_unstable();
        filled
    }

    /// Restores the heap ordering upward from `i` after an insertion.
    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.items[i] > self.items[parent] {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Restores the heap ordering downward from `i` after a replace-top.
    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            if left >= self.len {
                break;
            }
            let right = left + 1;
            let child = if right < self.len && self.items[right] > self.items[left] {
                right
            } else {
                left
            };
            if self.items[child] > self.items[i] {
                self.items.swap(child, i);
                i = child;
            } else {
                break;
            }
        }
    }
}
