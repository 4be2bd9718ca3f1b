pub mod traits;
pub mod network;
pub mod generators;

pub use traits::Graph;
pub use network::{Edge, Network, NetworkBuilder, Node, Point};
