use crate::elimination::EliminationOrdering;
use crate::graph::{Graph, HashMapGraph, MutableGraph};
use crate::termination::TerminationFlag;
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashMap;
use fxhash::FxHashSet;

/// Turns an elimination ordering into a tree decomposition.
///
/// Processing the vertices in elimination order, the bucket of `v` is its
/// neighborhood in the working graph at the moment of elimination, fill-in
/// from earlier eliminations included. The node for `v` carries the bag
/// `{v} ∪ bucket(v)` and is attached below the node of the bucket member
/// that is eliminated next. Since the bucket is a clique of the chordal
/// completion, every other bucket member is still adjacent to that parent
/// vertex when its own turn comes, which yields the running intersection
/// property.
pub struct BucketElimination;

impl BucketElimination {
    /// A malformed ordering (wrong length, duplicate or unknown vertex) is a
    /// precondition violation and aborts.
    pub fn compute(graph: &HashMapGraph, ordering: &EliminationOrdering) -> TreeDecomposition {
        Self::compute_with_termination(graph, ordering, &TerminationFlag::new()).unwrap()
    }

    /// Like `compute`, but polls the termination flag at every elimination
    /// step; `None` when cancelled.
    pub fn compute_with_termination(
        graph: &HashMapGraph,
        ordering: &EliminationOrdering,
        flag: &TerminationFlag,
    ) -> Option<TreeDecomposition> {
        let vertices = ordering.vertices();
        assert_eq!(vertices.len(), graph.order());

        let mut td = TreeDecomposition::default();
        if vertices.is_empty() {
            let root = td.add_bag(FxHashSet::default());
            td.set_root(root);
            return Some(td);
        }

        let mut position: FxHashMap<usize, usize> = FxHashMap::default();
        for (idx, v) in vertices.iter().copied().enumerate() {
            assert!(graph.has_vertex(v));
            assert!(position.insert(v, idx).is_none());
        }

        let mut working = graph.clone();
        let mut node_of: FxHashMap<usize, usize> = FxHashMap::default();
        // per node: the bucket member that becomes the parent vertex
        let mut parent_vertex: Vec<Option<usize>> = Vec::with_capacity(vertices.len());

        for v in vertices.iter().copied() {
            if flag.is_signalled() {
                return None;
            }
            let bucket = working.neighborhood_set(v).clone();
            let parent = bucket
                .iter()
                .copied()
                .min_by_key(|u| position.get(u).unwrap());
            let mut bag = bucket;
            bag.insert(v);
            let id = td.add_bag(bag);
            node_of.insert(v, id);
            parent_vertex.push(parent);
            working.eliminate_vertex(v);
        }

        let mut roots: Vec<usize> = Vec::new();
        for (id, parent) in parent_vertex.iter().enumerate() {
            match parent {
                Some(u) => td.attach(*node_of.get(u).unwrap(), id),
                None => roots.push(id),
            }
        }

        // one root per connected component; a disconnected input gets a
        // synthetic empty root adopting the component roots in node order
        if roots.len() == 1 {
            td.set_root(roots[0]);
        } else {
            let synthetic = td.add_bag(FxHashSet::default());
            for root in roots {
                td.attach(synthetic, root);
            }
            td.set_root(synthetic);
        }
        Some(td)
    }
}
