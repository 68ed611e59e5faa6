//! Array-based binary min-heap over element indices, with a reverse position
//! index so an element's priority can be lowered in place.
use std::cell::Cell;
use thiserror::Error;

/// Binary min-heap of element indices `0..keys.len()`, ordered by `keys`.
///
/// The heap does not own the priorities. It holds a shared view of a key
/// slice owned by the caller, who may lower an element's key at any time
/// through the [`Cell`]s and must then call [`IndexedMinHeap::decrease_key`]
/// (or [`IndexedMinHeap::sift_up`] at [`IndexedMinHeap::position`]) before
/// the next removal. Raising the key of a queued element is not supported.
///
/// The heap array is 1-indexed: slot 0 is reserved, the minimum lives in slot
/// 1 and the children of slot `k` are `2k` and `2k + 1`. For every occupied
/// slot `k > 1`, `key(heap[k]) >= key(heap[k / 2])`, and the position index
/// maps `heap[k]` back to `k`.
///
/// Ties are broken by the order of insertions and removals only, so a fixed
/// sequence of operations always yields the same removal order.
pub struct IndexedMinHeap<'a, K> {
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
    keys: &'a [Cell<K>],
    capacity: usize,
}

impl<K> std::fmt::Debug for IndexedMinHeap<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedMinHeap")
            .field("heap", &&self.heap[1..])
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<'a, K: Ord + Copy> IndexedMinHeap<'a, K> {
    /// Creates an empty heap that holds at most `capacity` elements, whose
    /// priorities are read from `keys`.
    pub fn new(capacity: usize, keys: &'a [Cell<K>]) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        // Slot 0 is never read.
        heap.push(usize::MAX);
        Self {
            heap,
            position: vec![None; keys.len()],
            keys,
            capacity,
        }
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    /// Whether no elements are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of elements the heap will accept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `element` is currently queued.
    pub fn contains(&self, element: usize) -> bool {
        self.position(element).is_some()
    }

    /// Slot currently occupied by `element`, if it is queued.
    pub fn position(&self, element: usize) -> Option<usize> {
        self.position.get(element).copied().flatten()
    }

    /// The element with the smallest key, without removing it.
    pub fn peek(&self) -> Option<usize> {
        self.heap.get(1).copied()
    }

    fn key_at(&self, slot: usize) -> K {
        self.keys[self.heap[slot]].get()
    }

    /// Appends `element` and sifts it up to its place.
    ///
    /// # Errors
    ///
    /// * [HeapError::UnknownElement] if `element` has no key.
    /// * [HeapError::AlreadyPresent] if `element` is already queued.
    /// * [HeapError::CapacityExceeded] if the heap is full.
    pub fn insert(&mut self, element: usize) -> Result<(), HeapError> {
        if element >= self.keys.len() {
            return Err(HeapError::UnknownElement {
                element,
                key_count: self.keys.len(),
            });
        }
        if self.contains(element) {
            return Err(HeapError::AlreadyPresent(element));
        }
        if self.len() == self.capacity {
            return Err(HeapError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.heap.push(element);
        let slot = self.len();
        self.position[element] = Some(slot);
        self.sift_up(slot);
        Ok(())
    }

    /// Moves the element at `slot` towards the root while its parent's key is
    /// strictly greater, keeping the position index up to date.
    ///
    /// Out-of-range slots are ignored.
    pub fn sift_up(&mut self, mut slot: usize) {
        if slot == 0 || slot > self.len() {
            return;
        }
        let element = self.heap[slot];
        let key = self.keys[element].get();

        while slot > 1 {
            let parent = slot / 2;
            if self.key_at(parent) <= key {
                break;
            }
            let moved = self.heap[parent];
            self.heap[slot] = moved;
            self.position[moved] = Some(slot);
            slot = parent;
        }

        self.heap[slot] = element;
        self.position[element] = Some(slot);
    }

    /// Moves the element at `slot` towards the leaves, swapping with the
    /// smaller child while that child's key is strictly smaller.
    ///
    /// Out-of-range slots are ignored.
    pub fn sift_down(&mut self, mut slot: usize) {
        let len = self.len();
        if slot == 0 || slot > len {
            return;
        }
        let element = self.heap[slot];
        let key = self.keys[element].get();

        loop {
            let left = slot * 2;
            if left > len {
                break;
            }
            let right = left + 1;
            let child = if right <= len && self.key_at(right) < self.key_at(left) {
                right
            } else {
                left
            };
            if self.key_at(child) >= key {
                break;
            }
            let moved = self.heap[child];
            self.heap[slot] = moved;
            self.position[moved] = Some(slot);
            slot = child;
        }

        self.heap[slot] = element;
        self.position[element] = Some(slot);
    }

    /// Restores heap order after the key of a queued `element` was lowered.
    ///
    /// # Errors
    ///
    /// [HeapError::NotPresent] if `element` is not queued.
    pub fn decrease_key(&mut self, element: usize) -> Result<(), HeapError> {
        let slot = self
            .position(element)
            .ok_or(HeapError::NotPresent(element))?;
        self.sift_up(slot);
        Ok(())
    }

    /// Removes and returns the element with the smallest key. The last element
    /// takes over the root slot and is sifted down.
    ///
    /// # Errors
    ///
    /// [HeapError::EmptyHeap] if nothing is queued.
    pub fn remove_min(&mut self) -> Result<usize, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        let min = self.heap.swap_remove(1);
        self.position[min] = None;
        self.sift_down(1);
        Ok(min)
    }

    /// The heap array split by tree level, root first.
    pub fn levels(&self) -> Vec<Vec<usize>> {
        let mut levels = Vec::new();
        let mut start = 1;
        while start <= self.len() {
            let end = (start * 2).min(self.len() + 1);
            levels.push(self.heap[start..end].to_vec());
            start *= 2;
        }
        levels
    }
}

/// Error from an [IndexedMinHeap] operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// An insert would grow the heap past its declared capacity.
    #[error("heap capacity of {capacity} elements exceeded")]
    CapacityExceeded {
        /// The declared capacity.
        capacity: usize,
    },
    /// A removal was attempted on an empty heap.
    #[error("cannot remove from an empty heap")]
    EmptyHeap,
    /// The element index has no entry in the key slice.
    #[error("element {element} has no key (only {key_count} keys)")]
    UnknownElement {
        /// The rejected element.
        element: usize,
        /// Length of the key slice.
        key_count: usize,
    },
    /// The element is queued already.
    #[error("element {0} is already in the heap")]
    AlreadyPresent(usize),
    /// The element is not queued, so its key cannot be decreased.
    #[error("element {0} is not in the heap")]
    NotPresent(usize),
}
