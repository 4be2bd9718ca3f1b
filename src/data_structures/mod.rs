pub mod traits;
pub mod linear_queue;
pub mod indexed_heap;

pub use traits::PriorityQueue;
pub use linear_queue::LinearQueue;
pub use indexed_heap::{HeapEntry, IndexedMinHeap};
