use std::fmt::Debug;

use crate::Result;

/// Capability set shared by the priority queues driving Dijkstra
///
/// Items are dense node ids; keys are tentative distances. Misuse such as
/// decreasing the key of an id that was already extracted is reported as
/// [`crate::Error::LogicError`] instead of being ignored.
pub trait PriorityQueue<K>: Debug
where
    K: PartialOrd + Copy + Debug,
{
    /// Adds an id that is not yet in the queue
    fn insert(&mut self, id: usize, key: K) -> Result<()>;

    /// Lowers the key of an id still in the queue; `key` must not exceed the current key
    fn decrease_key(&mut self, id: usize, key: K) -> Result<()>;

    /// Removes and returns the id with the smallest key
    fn extract_min(&mut self) -> Option<(usize, K)>;

    /// Number of ids still waiting to be extracted
    fn len(&self) -> usize;

    /// Returns true if every inserted id has been extracted
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;
}
