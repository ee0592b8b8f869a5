use crate::elimination::{mcs_ordering, AttemptFailure, OrderingHeuristic, WorkGraph};
use crate::preprocessing::PreprocessedGraph;
use crate::termination::TerminationFlag;
use fxhash::FxHashSet;
use rand::rngs::StdRng;

/// Triangulation-minimization ordering.
///
/// Runs the inner heuristic once, materializes the chordal completion its
/// ordering induces, then deletes redundant fill edges: a fill edge may go
/// whenever the common neighborhood of its endpoints is a clique in the
/// current completion, which keeps the graph chordal and never enlarges a
/// clique. The final ordering is re-derived from the reduced completion by
/// maximum-cardinality search, so its width is at most the inner ordering's.
pub(crate) fn minimized_suffix(
    prep: &PreprocessedGraph,
    inner: &OrderingHeuristic,
    flag: &TerminationFlag,
    rng: &mut Option<StdRng>,
    randomize: bool,
) -> Result<Vec<usize>, AttemptFailure> {
    let (inner_suffix, _) = inner.attempt(prep, None, flag, rng, randomize)?;

    let vertex_count = prep.vertex_count();
    let mut triangulated: Vec<FxHashSet<usize>> = (0..vertex_count)
        .map(|v| prep.neighborhood(v).clone())
        .collect();
    let fill_edges = collect_fill_edges(prep, &inner_suffix, flag)?;
    for (u, w) in fill_edges.iter().copied() {
        triangulated[u].insert(w);
        triangulated[w].insert(u);
    }

    reduce_fill(&mut triangulated, fill_edges, flag)?;

    mcs_ordering(vertex_count, |v| &triangulated[v], flag)
}

/// Fill edges created by eliminating along `suffix`, as ascending pairs in
/// discovery order.
fn collect_fill_edges(
    prep: &PreprocessedGraph,
    suffix: &[usize],
    flag: &TerminationFlag,
) -> Result<Vec<(usize, usize)>, AttemptFailure> {
    let mut sim = WorkGraph::from_preprocessed(prep);
    let mut fill_edges: Vec<(usize, usize)> = Vec::new();
    for v in suffix.iter().copied() {
        if flag.is_signalled() {
            return Err(AttemptFailure::Terminated);
        }
        let nb: Vec<usize> = sim.neighborhood(v).iter().copied().collect();
        for (i, u) in nb.iter().copied().enumerate() {
            for w in nb.iter().copied().skip(i + 1) {
                if !sim.has_edge(u, w) {
                    fill_edges.push((u.min(w), u.max(w)));
                }
            }
        }
        sim.eliminate(v);
    }
    Ok(fill_edges)
}

/// Deletes removable fill edges until a fixpoint is reached.
fn reduce_fill(
    triangulated: &mut Vec<FxHashSet<usize>>,
    mut fill_edges: Vec<(usize, usize)>,
    flag: &TerminationFlag,
) -> Result<(), AttemptFailure> {
    fill_edges.sort_unstable();
    fill_edges.dedup();
    let mut removed = vec![false; fill_edges.len()];
    loop {
        let mut changed = false;
        for (i, (u, w)) in fill_edges.iter().copied().enumerate() {
            if removed[i] {
                continue;
            }
            if flag.is_signalled() {
                return Err(AttemptFailure::Terminated);
            }
            let common: Vec<usize> = triangulated[u]
                .iter()
                .copied()
                .filter(|x| triangulated[w].contains(x))
                .collect();
            if is_clique(triangulated, &common) {
                triangulated[u].remove(&w);
                triangulated[w].remove(&u);
                removed[i] = true;
                changed = true;
            }
        }
        if !changed {
            return Ok(());
        }
    }
}

fn is_clique(adjacency: &[FxHashSet<usize>], vertices: &[usize]) -> bool {
    for (i, u) in vertices.iter().copied().enumerate() {
        for w in vertices.iter().copied().skip(i + 1) {
            if !adjacency[u].contains(&w) {
                return false;
            }
        }
    }
    true
}
