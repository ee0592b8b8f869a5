use crate::graph::base_graph::Graph;
use crate::graph::mutable_graph::MutableGraph;
use fxhash::FxHashMap;
use fxhash::FxHashSet;

/// Undirected simple graph backed by hash adjacency sets. Vertices are
/// arbitrary `usize` identifiers; parallel edges and self loops are never
/// stored.
#[derive(Clone, Debug)]
pub struct HashMapGraph {
    data: FxHashMap<usize, FxHashSet<usize>>,
}

impl HashMapGraph {
    pub fn neighborhood_set(&self, u: usize) -> &FxHashSet<usize> {
        self.data.get(&u).unwrap()
    }

    /// Vertex sets of the connected components, in unspecified order.
    pub fn connected_components(&self) -> Vec<FxHashSet<usize>> {
        let mut components: Vec<FxHashSet<usize>> = Vec::new();
        let mut visited: FxHashSet<usize> =
            FxHashSet::with_capacity_and_hasher(self.data.len(), Default::default());
        let mut stack: Vec<usize> = Vec::new();
        for u in self.data.keys().copied() {
            if visited.contains(&u) {
                continue;
            }
            stack.push(u);
            visited.insert(u);
            let mut component: FxHashSet<usize> = FxHashSet::default();
            component.insert(u);
            while let Some(v) = stack.pop() {
                for x in self.data.get(&v).unwrap().iter() {
                    if component.contains(x) {
                        continue;
                    }
                    stack.push(*x);
                    component.insert(*x);
                    visited.insert(*x);
                }
            }
            components.push(component);
        }
        components
    }

    pub fn from_graph<G: Graph>(graph: &G) -> Self {
        let data = graph
            .vertices()
            .map(|v| (v, graph.neighborhood(v).collect()))
            .collect();
        HashMapGraph { data }
    }
}

impl MutableGraph for HashMapGraph {
    fn add_vertex(&mut self, u: usize) {
        self.data.entry(u).or_insert_with(FxHashSet::default);
    }

    fn remove_vertex(&mut self, u: usize) {
        if let Some(neighbors) = self.data.remove(&u) {
            for i in neighbors.iter() {
                self.data.get_mut(i).unwrap().remove(&u);
            }
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        let first = self.data.entry(u).or_insert_with(FxHashSet::default);
        first.insert(v);
        let second = self.data.entry(v).or_insert_with(FxHashSet::default);
        second.insert(u);
    }

    fn remove_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        if let Some(x) = self.data.get_mut(&u) {
            x.remove(&v);
        }
        if let Some(x) = self.data.get_mut(&v) {
            x.remove(&u);
        }
    }

    fn eliminate_vertex(&mut self, u: usize) {
        assert!(self.data.contains_key(&u));
        let nb = self.data.remove(&u).unwrap();
        for i in &nb {
            self.data.get_mut(i).unwrap().remove(&u);
        }
        for i in &nb {
            for j in &nb {
                if i < j {
                    self.data.get_mut(i).unwrap().insert(*j);
                    self.data.get_mut(j).unwrap().insert(*i);
                }
            }
        }
    }

    fn new() -> Self {
        HashMapGraph {
            data: FxHashMap::default(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMapGraph {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl Graph for HashMapGraph {
    fn order(&self) -> usize {
        self.data.len()
    }

    fn degree(&self, u: usize) -> usize {
        assert!(self.data.contains_key(&u));
        self.data.get(&u).unwrap().len()
    }

    fn has_vertex(&self, u: usize) -> bool {
        self.data.contains_key(&u)
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data.get(&u).unwrap().contains(&v)
    }

    fn is_clique(&self, vertices: &[usize]) -> bool {
        for (i, v) in vertices.iter().enumerate() {
            assert!(self.data.contains_key(v));
            for u in vertices.iter().skip(i + 1) {
                assert!(self.data.contains_key(u));
                if !self.data.get(v).unwrap().contains(u) {
                    return false;
                }
            }
        }
        true
    }

    fn is_simplicial(&self, u: usize) -> bool {
        let nb = self.data.get(&u).unwrap();
        self.is_clique(&nb.iter().copied().collect::<Vec<_>>())
    }

    fn is_almost_simplicial(&self, u: usize) -> bool {
        // every missing pair within N(u) must share one common endpoint
        let mut candidates: Option<FxHashSet<usize>> = None;
        let nb = self.data.get(&u).unwrap();
        for v in nb.iter().copied() {
            for w in nb
                .iter()
                .copied()
                .filter(|w| v < *w && !self.has_edge(v, *w))
            {
                match candidates.as_mut() {
                    Some(check) => {
                        check.retain(|x| *x == v || *x == w);
                        if check.is_empty() {
                            return false;
                        }
                    }
                    None => {
                        candidates = Some([v, w].iter().copied().collect());
                    }
                }
            }
        }
        candidates.map_or(false, |check| !check.is_empty())
    }

    fn fill_in_count(&self, u: usize) -> usize {
        let mut count = 0;
        for x in self.neighborhood_set(u) {
            for y in self.neighborhood_set(u) {
                if x < y && !self.has_edge(*x, *y) {
                    count += 1;
                }
            }
        }
        count
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.keys().copied())
    }

    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.get(&u).unwrap().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::base_graph::Graph;
    use crate::graph::hash_map_graph::HashMapGraph;
    use crate::graph::mutable_graph::MutableGraph;

    #[test]
    fn order() {
        let mut graph = HashMapGraph::new();
        assert_eq!(graph.order(), 0);

        graph.add_vertex(0);
        graph.add_vertex(0);
        assert_eq!(graph.order(), 1);
        graph.remove_vertex(0);
        assert_eq!(graph.order(), 0);
    }

    #[test]
    fn degree() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.order(), 2);

        graph.add_edge(0, 1);
        assert_eq!(graph.degree(0), 1);

        graph.remove_edge(0, 1);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.degree(1), 0);
        assert_eq!(graph.order(), 2);
    }

    #[test]
    fn eliminate_fills_neighborhood() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(0, 3);

        assert_eq!(graph.fill_in_count(0), 3);
        graph.eliminate_vertex(0);
        assert_eq!(graph.order(), 3);
        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(1, 3));
        assert!(graph.has_edge(2, 3));
    }

    #[test]
    fn simplicial() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);

        assert!(graph.is_simplicial(0));
        assert!(graph.is_simplicial(3));
        assert!(!graph.is_simplicial(2));
    }

    #[test]
    fn almost_simplicial() {
        let mut graph = HashMapGraph::new();
        // N(0) = {1, 2, 3}, edge 1-2 present, 3 is the odd one out
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(0, 3);
        graph.add_edge(1, 2);

        assert!(!graph.is_simplicial(0));
        assert!(graph.is_almost_simplicial(0));

        // no single vertex covers all missing pairs of a 4-independent set
        let mut star = HashMapGraph::new();
        star.add_edge(0, 1);
        star.add_edge(0, 2);
        star.add_edge(0, 3);
        star.add_edge(0, 4);
        assert!(!star.is_almost_simplicial(0));
    }

    #[test]
    fn components() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(3, 4);
        graph.add_vertex(9);

        let components = graph.connected_components();
        assert_eq!(components.len(), 3);
        let sizes: Vec<usize> = {
            let mut tmp: Vec<usize> = components.iter().map(|c| c.len()).collect();
            tmp.sort_unstable();
            tmp
        };
        assert_eq!(sizes, vec![1, 2, 3]);
    }
}
