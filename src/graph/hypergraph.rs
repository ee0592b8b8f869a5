use crate::graph::hash_map_graph::HashMapGraph;
use crate::graph::mutable_graph::MutableGraph;
use fxhash::FxHashSet;

/// A hyperedge: a deduplicated, ascending vertex sequence with a stable
/// identifier. Two hyperedges are equal when they cover the same vertex set,
/// regardless of id.
#[derive(Clone, Debug)]
pub struct Hyperedge {
    id: usize,
    vertices: Vec<usize>,
}

impl Hyperedge {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }
}

impl PartialEq for Hyperedge {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}
impl Eq for Hyperedge {}

/// Multi-hypergraph over positive integer vertices. This is the boundary type
/// the decomposition engine consumes input through: it exposes the vertex set
/// in stable order, hyperedges for coverage checks, and the primal graph the
/// elimination game is played on.
#[derive(Clone, Debug, Default)]
pub struct Hypergraph {
    vertices: Vec<usize>,
    vertex_set: FxHashSet<usize>,
    edges: Vec<Hyperedge>,
}

impl Hypergraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: usize) {
        assert!(vertex > 0);
        if self.vertex_set.insert(vertex) {
            self.vertices.push(vertex);
        }
    }

    /// Registers the hyperedge and returns its id. Vertices are deduplicated
    /// and sorted; unknown vertices are added to the graph.
    pub fn add_hyperedge<I: IntoIterator<Item = usize>>(&mut self, vertices: I) -> usize {
        let mut members: Vec<usize> = vertices.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        assert!(!members.is_empty());
        for v in members.iter().copied() {
            self.add_vertex(v);
        }
        let id = self.edges.len();
        self.edges.push(Hyperedge {
            id,
            vertices: members,
        });
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_vertex(&self, vertex: usize) -> bool {
        self.vertex_set.contains(&vertex)
    }

    /// Vertices in insertion order; the order is stable across calls.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn hyperedges(&self) -> &[Hyperedge] {
        &self.edges
    }

    pub fn neighbors(&self, vertex: usize) -> FxHashSet<usize> {
        assert!(self.vertex_set.contains(&vertex));
        let mut result = FxHashSet::default();
        for edge in self.edges.iter().filter(|e| e.contains(vertex)) {
            result.extend(edge.vertices.iter().copied().filter(|v| *v != vertex));
        }
        result
    }

    /// The primal (Gaifman) graph: every hyperedge becomes a clique. The
    /// engine decomposes this graph; every hyperedge is a clique of it and
    /// therefore ends up inside some bag of any valid decomposition.
    pub fn primal_graph(&self) -> HashMapGraph {
        let mut graph = HashMapGraph::with_capacity(self.vertices.len());
        for v in self.vertices.iter().copied() {
            graph.add_vertex(v);
        }
        for edge in self.edges.iter() {
            graph.make_clique(&edge.vertices);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::base_graph::Graph;
    use crate::graph::hypergraph::Hypergraph;

    #[test]
    fn dedup_and_set_equality() {
        let mut hg = Hypergraph::new();
        let a = hg.add_hyperedge(vec![3, 1, 2, 1]);
        let b = hg.add_hyperedge(vec![1, 2, 3]);
        assert_ne!(a, b);
        assert_eq!(hg.hyperedges()[a], hg.hyperedges()[b]);
        assert_eq!(hg.hyperedges()[a].vertices(), &[1, 2, 3]);
    }

    #[test]
    fn primal_graph_cliques() {
        let mut hg = Hypergraph::new();
        hg.add_hyperedge(vec![1, 2, 3]);
        hg.add_hyperedge(vec![3, 4]);
        hg.add_vertex(9);

        let graph = hg.primal_graph();
        assert_eq!(graph.order(), 5);
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(1, 3));
        assert!(graph.has_edge(2, 3));
        assert!(graph.has_edge(3, 4));
        assert!(!graph.has_edge(1, 4));
        assert_eq!(graph.degree(9), 0);
    }

    #[test]
    fn neighbors_union_over_edges() {
        let mut hg = Hypergraph::new();
        hg.add_hyperedge(vec![1, 2]);
        hg.add_hyperedge(vec![2, 3, 4]);

        let nb = hg.neighbors(2);
        assert_eq!(nb.len(), 3);
        assert!(nb.contains(&1) && nb.contains(&3) && nb.contains(&4));
    }
}
