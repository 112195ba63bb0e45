pub mod dimacs;
mod dijkstra;
mod error;
pub mod generator;
pub mod graph;
mod heap;
pub mod observer;
pub mod reference;

pub use dijkstra::distances_from;
pub use dijkstra::shortest_distance;
pub use dijkstra::shortest_distance_with;
pub use error::Error;
pub use error::Result;
pub use graph::DirectedGraph;
pub use graph::Edge;
pub use heap::KaryHeap;
pub use observer::HeapObserver;
pub use observer::Operation;
pub use observer::OperationCounter;

/// Distance of a vertex no search has reached.
pub const INF: u64 = u64::MAX / 4;
