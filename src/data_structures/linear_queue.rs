use std::fmt::Debug;

use crate::data_structures::traits::PriorityQueue;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy)]
struct QueueEntry<K> {
    id: usize,
    key: K,
    finalized: bool,
}

/// Per-id bookkeeping: the best key handed to the queue so far
#[derive(Debug, Clone, Copy, PartialEq)]
enum IdState<K> {
    Absent,
    Pending(K),
    Extracted,
}

/// Unsorted array priority queue
///
/// `insert` and `decrease_key` append in O(1); `decrease_key` leaves the previous
/// entry for the id in place. `extract_min` scans every live entry in O(len).
/// Entries are retired by an explicit `finalized` flag, so a key of zero is an
/// ordinary key and never doubles as a marker.
#[derive(Debug, Clone)]
pub struct LinearQueue<K> {
    entries: Vec<QueueEntry<K>>,
    states: Vec<IdState<K>>,
    pending: usize,
}

impl<K> LinearQueue<K>
where
    K: PartialOrd + Copy + Debug,
{
    /// Creates a new empty queue
    pub fn new() -> Self {
        LinearQueue {
            entries: Vec::new(),
            states: Vec::new(),
            pending: 0,
        }
    }

    /// Creates an empty queue sized for ids `0..ids`
    pub fn with_capacity(ids: usize) -> Self {
        LinearQueue {
            entries: Vec::with_capacity(ids),
            states: vec![IdState::Absent; ids],
            pending: 0,
        }
    }

    /// Total entries in the backing array, stale and finalized ones included
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn state(&self, id: usize) -> IdState<K> {
        self.states.get(id).copied().unwrap_or(IdState::Absent)
    }
}

impl<K> Default for LinearQueue<K>
where
    K: PartialOrd + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PriorityQueue<K> for LinearQueue<K>
where
    K: PartialOrd + Copy + Debug,
{
    fn insert(&mut self, id: usize, key: K) -> Result<()> {
        if self.state(id) != IdState::Absent {
            return Err(Error::LogicError(format!(
                "insert of id {} which was already queued",
                id
            )));
        }
        if id >= self.states.len() {
            self.states.resize(id + 1, IdState::Absent);
        }
        self.states[id] = IdState::Pending(key);
        self.entries.push(QueueEntry {
            id,
            key,
            finalized: false,
        });
        self.pending += 1;
        Ok(())
    }

    fn decrease_key(&mut self, id: usize, key: K) -> Result<()> {
        match self.state(id) {
            IdState::Pending(current) if key <= current => {
                self.states[id] = IdState::Pending(key);
                self.entries.push(QueueEntry {
                    id,
                    key,
                    finalized: false,
                });
                Ok(())
            }
            IdState::Pending(current) => Err(Error::LogicError(format!(
                "decrease_key would raise id {} from {:?} to {:?}",
                id, current, key
            ))),
            IdState::Extracted => Err(Error::LogicError(format!(
                "decrease_key on id {} which was already extracted",
                id
            ))),
            IdState::Absent => Err(Error::LogicError(format!(
                "decrease_key on id {} which is not in the queue",
                id
            ))),
        }
    }

    fn extract_min(&mut self) -> Option<(usize, K)> {
        let mut best: Option<(usize, K)> = None;

        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if entry.finalized {
                continue;
            }
            // Stale entry for an id an earlier scan already returned
            if matches!(self.states[entry.id], IdState::Extracted) {
                entry.finalized = true;
                continue;
            }
            match best {
                None => best = Some((slot, entry.key)),
                Some((_, best_key)) if entry.key < best_key => best = Some((slot, entry.key)),
                Some(_) => {}
            }
        }

        let (slot, key) = best?;
        let entry = &mut self.entries[slot];
        entry.finalized = true;
        let id = entry.id;
        self.states[id] = IdState::Extracted;
        self.pending -= 1;
        Some((id, key))
    }

    fn len(&self) -> usize {
        self.pending
    }

    fn name(&self) -> &'static str {
        "array"
    }
}
