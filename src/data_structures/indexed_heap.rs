use std::fmt::Debug;
use num_traits::Float;

use crate::data_structures::traits::PriorityQueue;
use crate::{Error, Result};

/// A `(id, key)` pair stored in a heap slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry<K> {
    pub id: usize,
    pub key: K,
}

/// Where an id currently lives relative to the heap array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Absent,
    Slot(usize),
    Removed,
}

/// Binary min-heap with a position index for O(log n) decrease-key
///
/// Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
/// `heap` and `position` are only ever rearranged together through
/// [`IndexedMinHeap::swap_slots`], so `heap[position[id]].id == id` holds for
/// every queued id.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<K> {
    heap: Vec<HeapEntry<K>>,
    position: Vec<Position>,
}

impl<K> IndexedMinHeap<K>
where
    K: PartialOrd + Copy + Debug,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        IndexedMinHeap {
            heap: Vec::new(),
            position: Vec::new(),
        }
    }

    /// Creates an empty heap sized for ids `0..ids`
    pub fn with_capacity(ids: usize) -> Self {
        IndexedMinHeap {
            heap: Vec::with_capacity(ids),
            position: vec![Position::Absent; ids],
        }
    }

    /// Returns the smallest entry without removing it
    pub fn peek(&self) -> Option<HeapEntry<K>> {
        self.heap.first().copied()
    }

    /// Current key of a queued id
    pub fn key_of(&self, id: usize) -> Option<K> {
        match self.position.get(id) {
            Some(Position::Slot(slot)) => Some(self.heap[*slot].key),
            _ => None,
        }
    }

    /// Returns true if `id` is waiting in the heap
    pub fn contains(&self, id: usize) -> bool {
        matches!(self.position.get(id), Some(Position::Slot(_)))
    }

    /// Checks heap ordering and the agreement between slots and the position index
    pub fn is_heap_ordered(&self) -> bool {
        let ordered = (1..self.heap.len()).all(|child| {
            let parent = (child - 1) / 2;
            self.heap[parent].key <= self.heap[child].key
        });
        let indexed = self
            .heap
            .iter()
            .enumerate()
            .all(|(slot, entry)| self.position.get(entry.id) == Some(&Position::Slot(slot)));
        let queued = self
            .position
            .iter()
            .filter(|p| matches!(p, Position::Slot(_)))
            .count();
        ordered && indexed && queued == self.heap.len()
    }

    /// Exchanges two slots and repoints both ids in the position index
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a].id] = Position::Slot(a);
        self.position[self.heap[b].id] = Position::Slot(b);
    }

    fn bubble_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].key < self.heap[parent].key {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let smaller = if right < len && self.heap[right].key < self.heap[left].key {
                right
            } else {
                left
            };

            if self.heap[smaller].key < self.heap[slot].key {
                self.swap_slots(slot, smaller);
                slot = smaller;
            } else {
                break;
            }
        }
    }
}

impl<K> IndexedMinHeap<K>
where
    K: Float + Debug,
{
    /// Builds the initial Dijkstra queue in O(n)
    ///
    /// `source` goes to slot 0 with key zero; every other id follows in
    /// ascending order with key infinity, which already satisfies heap ordering.
    pub fn build(vertex_count: usize, source: usize) -> Result<Self> {
        if source >= vertex_count {
            return Err(Error::InvalidVertex(source));
        }

        let mut heap = Vec::with_capacity(vertex_count);
        let mut position = vec![Position::Absent; vertex_count];

        heap.push(HeapEntry {
            id: source,
            key: K::zero(),
        });
        position[source] = Position::Slot(0);

        for id in (0..vertex_count).filter(|&id| id != source) {
            position[id] = Position::Slot(heap.len());
            heap.push(HeapEntry {
                id,
                key: K::infinity(),
            });
        }

        Ok(IndexedMinHeap { heap, position })
    }
}

impl<K> Default for IndexedMinHeap<K>
where
    K: PartialOrd + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PriorityQueue<K> for IndexedMinHeap<K>
where
    K: PartialOrd + Copy + Debug,
{
    fn insert(&mut self, id: usize, key: K) -> Result<()> {
        if id >= self.position.len() {
            self.position.resize(id + 1, Position::Absent);
        }
        if self.position[id] != Position::Absent {
            return Err(Error::LogicError(format!(
                "insert of id {} which was already queued",
                id
            )));
        }

        let slot = self.heap.len();
        self.heap.push(HeapEntry { id, key });
        self.position[id] = Position::Slot(slot);
        self.bubble_up(slot);
        Ok(())
    }

    fn decrease_key(&mut self, id: usize, key: K) -> Result<()> {
        let slot = match self.position.get(id).copied().unwrap_or(Position::Absent) {
            Position::Slot(slot) => slot,
            Position::Removed => {
                return Err(Error::LogicError(format!(
                    "decrease_key on id {} which was already extracted",
                    id
                )))
            }
            Position::Absent => {
                return Err(Error::LogicError(format!(
                    "decrease_key on id {} which is not in the queue",
                    id
                )))
            }
        };

        let current = self.heap[slot].key;
        if current < key {
            return Err(Error::LogicError(format!(
                "decrease_key would raise id {} from {:?} to {:?}",
                id, current, key
            )));
        }

        self.heap[slot].key = key;
        self.bubble_up(slot);
        Ok(())
    }

    fn extract_min(&mut self) -> Option<(usize, K)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap_slots(0, last);
        let root = self.heap.pop()?;
        self.position[root.id] = Position::Removed;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((root.id, root.key))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn name(&self) -> &'static str {
        "heap"
    }
}
