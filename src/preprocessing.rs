use crate::graph::{Graph, HashMapGraph, MutableGraph};
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::max;

/// Result of the preprocessing phase: the remaining graph renumbered into a
/// dense `0..k` index space for array-based processing, together with the
/// vertices already eliminated and the treewidth lower bound established
/// while eliminating them.
///
/// Ordering algorithms emit the `elimination_sequence` as the prefix of every
/// ordering they produce, so the final ordering always covers the full input
/// graph.
#[derive(Debug, Clone)]
pub struct PreprocessedGraph {
    vertex_names: Vec<usize>,
    neighborhood: Vec<FxHashSet<usize>>,
    elimination_sequence: Vec<usize>,
    remaining_vertices: Vec<usize>,
    lower_bound: usize,
}

impl PreprocessedGraph {
    /// Number of vertices that survived preprocessing.
    pub fn vertex_count(&self) -> usize {
        self.remaining_vertices.len()
    }

    /// Number of vertices of the original input graph.
    pub fn input_vertex_count(&self) -> usize {
        self.vertex_names.len() + self.elimination_sequence.len()
    }

    /// Original identifier of the renumbered vertex `idx`.
    pub fn vertex_name(&self, idx: usize) -> usize {
        self.vertex_names[idx]
    }

    /// Index-space neighborhood of the renumbered vertex `idx`.
    pub fn neighborhood(&self, idx: usize) -> &FxHashSet<usize> {
        &self.neighborhood[idx]
    }

    /// Remaining vertices in index space, ascending.
    pub fn remaining_vertices(&self) -> &[usize] {
        &self.remaining_vertices
    }

    /// Vertices eliminated during preprocessing, in elimination order,
    /// as original identifiers.
    pub fn elimination_sequence(&self) -> &[usize] {
        &self.elimination_sequence
    }

    /// Size of the largest bucket formed during preprocessing; a lower bound
    /// for the treewidth of the input graph.
    pub fn lower_bound(&self) -> usize {
        self.lower_bound
    }
}

/// Simplifies an input graph before an elimination ordering is computed.
///
/// Vertices whose elimination provably never increases the width of the best
/// achievable decomposition are eliminated right away: isolated, pendant and
/// series vertices, simplicial vertices, almost-simplicial vertices of degree
/// at most the current lower bound, and degree-3 twins. Each elimination is
/// recorded so the resulting partial sequence can prefix a full ordering.
pub struct Preprocessor;

impl Preprocessor {
    pub fn prepare(graph: &HashMapGraph, apply_preprocessing: bool) -> PreprocessedGraph {
        if !apply_preprocessing {
            return Self::renumber(graph, Vec::new(), 0);
        }

        let mut working = graph.clone();
        let mut sequence: Vec<usize> = Vec::new();
        let mut lower_bound = 0;

        while Self::apply_rules(&mut working, &mut sequence, &mut lower_bound) {}

        Self::renumber(&working, sequence, lower_bound)
    }

    /// One round of reduction rules; true if a vertex was eliminated.
    /// Cheap rules run first so the lower bound floors they establish are
    /// available to the guarded rules below them.
    fn apply_rules(
        graph: &mut HashMapGraph,
        sequence: &mut Vec<usize>,
        lower_bound: &mut usize,
    ) -> bool {
        // isolated
        if let Some(v) = min_vertex_with(graph, |g, v| g.degree(v) == 0) {
            sequence.push(v);
            graph.remove_vertex(v);
            return true;
        }
        // pendant
        if let Some(v) = min_vertex_with(graph, |g, v| g.degree(v) == 1) {
            *lower_bound = max(*lower_bound, 1);
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        // series: all remaining vertices have degree >= 2 here, so the graph
        // contains a cycle and the bound of 2 is sound
        if let Some(v) = min_vertex_with(graph, |g, v| g.degree(v) == 2) {
            *lower_bound = max(*lower_bound, 2);
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        // triangle: degree-3 vertex with two adjacent neighbors; minimum
        // degree is 3 at this point, which already forces treewidth >= 3
        let found = min_vertex_with(graph, |g, v| {
            if g.degree(v) != 3 {
                return false;
            }
            let nb: Vec<usize> = g.neighborhood(v).collect();
            g.has_edge(nb[0], nb[1]) || g.has_edge(nb[0], nb[2]) || g.has_edge(nb[1], nb[2])
        });
        if let Some(v) = found {
            *lower_bound = max(*lower_bound, 3);
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        // twins: two degree-3 vertices sharing their entire neighborhood;
        // eliminating one triangulates the shared neighborhood and leaves the
        // other simplicial
        if let Some(v) = Self::find_degree_three_twin(graph) {
            *lower_bound = max(*lower_bound, 3);
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        // simplicial
        if let Some(v) = min_vertex_with(graph, |g, v| g.is_simplicial(v)) {
            *lower_bound = max(*lower_bound, graph.degree(v));
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        // almost simplicial, only while the bucket stays within the bound
        if let Some(v) = min_vertex_with(graph, |g, v| {
            g.degree(v) <= *lower_bound && g.is_almost_simplicial(v)
        }) {
            sequence.push(v);
            graph.eliminate_vertex(v);
            return true;
        }
        false
    }

    fn find_degree_three_twin(graph: &HashMapGraph) -> Option<usize> {
        let mut by_neighborhood: FxHashMap<Vec<usize>, usize> = FxHashMap::default();
        let mut degree_three: Vec<usize> = graph
            .vertices()
            .filter(|v| graph.degree(*v) == 3)
            .collect();
        degree_three.sort_unstable();
        for v in degree_three {
            let mut nb: Vec<usize> = graph.neighborhood(v).collect();
            nb.sort_unstable();
            if let Some(first) = by_neighborhood.get(&nb) {
                return Some((*first).min(v));
            }
            by_neighborhood.insert(nb, v);
        }
        None
    }

    fn renumber(
        graph: &HashMapGraph,
        elimination_sequence: Vec<usize>,
        lower_bound: usize,
    ) -> PreprocessedGraph {
        let mut vertex_names: Vec<usize> = graph.vertices().collect();
        vertex_names.sort_unstable();

        let index_of: FxHashMap<usize, usize> = vertex_names
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, name)| (name, idx))
            .collect();

        let neighborhood: Vec<FxHashSet<usize>> = vertex_names
            .iter()
            .map(|name| {
                graph
                    .neighborhood_set(*name)
                    .iter()
                    .map(|u| *index_of.get(u).unwrap())
                    .collect()
            })
            .collect();

        let remaining_vertices: Vec<usize> = (0..vertex_names.len()).collect();

        PreprocessedGraph {
            vertex_names,
            neighborhood,
            elimination_sequence,
            remaining_vertices,
            lower_bound,
        }
    }
}

/// Smallest vertex satisfying the predicate; scanning in id order keeps the
/// reduction deterministic even though the underlying map is unordered.
fn min_vertex_with<F: Fn(&HashMapGraph, usize) -> bool>(
    graph: &HashMapGraph,
    predicate: F,
) -> Option<usize> {
    graph.vertices().filter(|v| predicate(graph, *v)).min()
}
