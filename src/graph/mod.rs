pub use base_graph::Graph;
pub use hash_map_graph::HashMapGraph;
pub use hypergraph::{Hyperedge, Hypergraph};
pub use mutable_graph::MutableGraph;

mod base_graph;
mod hash_map_graph;
mod hypergraph;
mod mutable_graph;
