use crate::datastructures::BitSet;
use crate::graph::{Graph, Hypergraph};
use fxhash::FxHashSet;
use std::cmp::max;
use std::fmt;
use std::fmt::{Display, Formatter};

pub enum TreeDecompositionValidationError {
    HasCycle,
    NotConnected,
    MissingVertex(usize),
    MissingEdge((usize, usize)),
    MissingHyperedge(usize),
    NotInducingSubtree(usize),
}

impl Display for TreeDecompositionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TreeDecompositionValidationError::HasCycle => write!(f, "Has Cycle"),
            TreeDecompositionValidationError::NotConnected => write!(f, "Not Connected"),
            TreeDecompositionValidationError::MissingVertex(v) => {
                write!(f, "Missing Vertex: {}", v)
            }
            TreeDecompositionValidationError::MissingEdge((u, v)) => {
                write!(f, "Missing Edge: ({}, {})", u, v)
            }
            TreeDecompositionValidationError::MissingHyperedge(id) => {
                write!(f, "Missing Hyperedge: {}", id)
            }
            TreeDecompositionValidationError::NotInducingSubtree(v) => {
                write!(f, "Not Inducing Subtree: {}", v)
            }
        }
    }
}

/// One node of a tree decomposition: its bag plus the parent/child links.
#[derive(Debug, Default, Clone)]
pub struct Bag {
    pub id: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub vertex_set: FxHashSet<usize>,
}

/// A rooted tree of bags. Mutable while a decomposition algorithm assembles
/// it, read-mostly afterwards; the assembling algorithm hands the finished
/// value to the caller by move.
#[derive(Debug, Clone, Default)]
pub struct TreeDecomposition {
    bags: Vec<Bag>,
    root: Option<usize>,
    max_bag_size: usize,
}

impl TreeDecomposition {
    pub fn add_bag(&mut self, vertex_set: FxHashSet<usize>) -> usize {
        let id = self.bags.len();
        self.max_bag_size = max(self.max_bag_size, vertex_set.len());
        self.bags.push(Bag {
            id,
            parent: None,
            children: Vec::new(),
            vertex_set,
        });
        id
    }

    /// Links `child` below `parent`. A node is attached at most once.
    pub fn attach(&mut self, parent: usize, child: usize) {
        assert!(parent < self.bags.len());
        assert!(child < self.bags.len());
        assert_ne!(parent, child);
        assert!(self.bags[child].parent.is_none());
        self.bags[child].parent = Some(parent);
        self.bags[parent].children.push(child);
    }

    pub fn set_root(&mut self, id: usize) {
        assert!(id < self.bags.len());
        assert!(self.bags[id].parent.is_none());
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn bags(&self) -> &[Bag] {
        &self.bags
    }

    pub fn bag(&self, id: usize) -> &Bag {
        &self.bags[id]
    }

    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }

    /// Size of the largest bag; the decomposition's width plus one.
    pub fn max_bag_size(&self) -> usize {
        self.max_bag_size
    }

    /// Depth-first traversal from the root.
    pub fn dfs(&self) -> TreeDecompositionIterator {
        let stack = match self.root {
            Some(root) => vec![root],
            None => vec![],
        };
        TreeDecompositionIterator { td: self, stack }
    }

    /// Checks the defining properties against the graph the decomposition
    /// was computed for: a rooted tree covering every vertex and edge, with
    /// every vertex inducing a connected subtree.
    pub fn verify<G: Graph>(&self, graph: &G) -> Result<(), TreeDecompositionValidationError> {
        self.verify_tree_shape()?;

        if let Some(v) = self.missing_vertex(graph) {
            return Err(TreeDecompositionValidationError::MissingVertex(v));
        }

        if let Some(e) = self.missing_edge(graph) {
            return Err(TreeDecompositionValidationError::MissingEdge(e));
        }

        if let Some(v) = self.vertex_not_inducing_subtree(graph) {
            return Err(TreeDecompositionValidationError::NotInducingSubtree(v));
        }

        Ok(())
    }

    /// Like `verify`, but additionally demands that every hyperedge of the
    /// input is contained in at least one bag.
    pub fn verify_hypergraph(
        &self,
        hypergraph: &Hypergraph,
    ) -> Result<(), TreeDecompositionValidationError> {
        self.verify(&hypergraph.primal_graph())?;
        for edge in hypergraph.hyperedges() {
            let covered = self
                .bags
                .iter()
                .any(|b| edge.vertices().iter().all(|v| b.vertex_set.contains(v)));
            if !covered {
                return Err(TreeDecompositionValidationError::MissingHyperedge(
                    edge.id(),
                ));
            }
        }
        Ok(())
    }

    fn verify_tree_shape(&self) -> Result<(), TreeDecompositionValidationError> {
        if self.bags.is_empty() {
            return Ok(());
        }
        if self.root.is_none() {
            return Err(TreeDecompositionValidationError::NotConnected);
        }
        let mut visited = BitSet::new(self.bags.len());
        for bag in self.dfs() {
            if visited.set_bit(bag.id) {
                return Err(TreeDecompositionValidationError::HasCycle);
            }
            for child in bag.children.iter().copied() {
                if self.bags[child].parent != Some(bag.id) {
                    return Err(TreeDecompositionValidationError::HasCycle);
                }
            }
        }
        if !visited.full() {
            return Err(TreeDecompositionValidationError::NotConnected);
        }
        Ok(())
    }

    fn missing_vertex<G: Graph>(&self, graph: &G) -> Option<usize> {
        let mut vertices: FxHashSet<usize> = graph.vertices().collect();
        self.bags.iter().for_each(|b| {
            b.vertex_set.iter().for_each(|x| {
                vertices.remove(x);
            })
        });
        vertices.iter().next().copied()
    }

    fn missing_edge<G: Graph>(&self, graph: &G) -> Option<(usize, usize)> {
        for u in graph.vertices() {
            for v in graph.neighborhood(u).filter(|v| u < *v) {
                if !self
                    .bags
                    .iter()
                    .any(|b| b.vertex_set.contains(&u) && b.vertex_set.contains(&v))
                {
                    return Some((u, v));
                }
            }
        }
        None
    }

    fn vertex_not_inducing_subtree<G: Graph>(&self, graph: &G) -> Option<usize> {
        for u in graph.vertices() {
            let mut inducing_bags: FxHashSet<usize> = self
                .bags
                .iter()
                .filter(|b| b.vertex_set.contains(&u))
                .map(|b| b.id)
                .collect();

            let first = *inducing_bags.iter().next().unwrap();
            inducing_bags.remove(&first);
            let mut stack: Vec<usize> = vec![first];
            while let Some(c) = stack.pop() {
                let bag = &self.bags[c];
                for n in bag
                    .children
                    .iter()
                    .copied()
                    .chain(bag.parent.iter().copied())
                {
                    if inducing_bags.contains(&n) {
                        inducing_bags.remove(&n);
                        stack.push(n);
                    }
                }
            }
            if !inducing_bags.is_empty() {
                return Some(u);
            }
        }
        None
    }
}

pub struct TreeDecompositionIterator<'a> {
    td: &'a TreeDecomposition,
    stack: Vec<usize>,
}

impl<'a> Iterator for TreeDecompositionIterator<'a> {
    type Item = &'a Bag;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.td.bags[current].children.iter().copied());
        Some(&self.td.bags[current])
    }
}
