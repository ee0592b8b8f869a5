//! Tree decompositions of graphs and hypergraphs via vertex elimination
//! orderings: graph preprocessing, a family of greedy ordering heuristics,
//! an anytime width-limited search driver, and bucket elimination.

pub(crate) mod datastructures;

pub mod bucket_elimination;
pub mod elimination;
pub mod graph;
pub mod preprocessing;
pub mod search;
pub mod termination;
pub mod tree_decomposition;

mod triangulation;

#[cfg(feature = "logging")]
pub mod log;

pub use bucket_elimination::BucketElimination;
pub use elimination::{max_bag_size_of, EliminationOrdering, OrderingHeuristic};
pub use preprocessing::{PreprocessedGraph, Preprocessor};
pub use search::{SearchOutcome, WidthLimitedSearch};
pub use termination::TerminationFlag;
pub use tree_decomposition::{Bag, TreeDecomposition, TreeDecompositionValidationError};
