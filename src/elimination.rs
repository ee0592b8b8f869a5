use crate::datastructures::{BinaryQueue, BitSet};
use crate::graph::{Graph, HashMapGraph, MutableGraph};
use crate::preprocessing::{PreprocessedGraph, Preprocessor};
use crate::termination::TerminationFlag;
use crate::triangulation;
use fxhash::FxHashSet;
use rand::prelude::*;
use std::cmp::max;

/// A full vertex elimination ordering: a permutation of the original
/// vertices of the input graph, with the preprocessing prefix in front.
///
/// The empty ordering is a legitimate value, not an error: it is what an
/// empty input graph, an exhausted width-limited budget, or a cancelled
/// computation produce. Callers check `is_empty`.
#[derive(Debug, Clone)]
pub struct EliminationOrdering {
    ordering: Vec<usize>,
    iterations: usize,
    max_bag_size: Option<usize>,
}

impl EliminationOrdering {
    pub(crate) fn new(ordering: Vec<usize>, iterations: usize, max_bag_size: Option<usize>) -> Self {
        Self {
            ordering,
            iterations,
            max_bag_size,
        }
    }

    pub(crate) fn empty(iterations: usize) -> Self {
        Self {
            ordering: Vec::new(),
            iterations,
            max_bag_size: None,
        }
    }

    /// The vertices in elimination order.
    pub fn vertices(&self) -> &[usize] {
        &self.ordering
    }

    /// Number of attempts the producing computation spent.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Maximum bag size of the decomposition this ordering induces, when the
    /// producing computation tracked it.
    pub fn max_bag_size(&self) -> Option<usize> {
        self.max_bag_size
    }

    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }
}

/// Maximum bag size bucket elimination will produce for `ordering` on
/// `graph`: one more than the largest degree encountered while eliminating
/// along the ordering.
pub fn max_bag_size_of(graph: &HashMapGraph, ordering: &[usize]) -> usize {
    assert_eq!(graph.order(), ordering.len());
    let mut working = graph.clone();
    let mut result = 0;
    for v in ordering.iter().copied() {
        assert!(working.has_vertex(v));
        result = max(result, working.degree(v) + 1);
        working.eliminate_vertex(v);
    }
    result
}

/// The family of elimination ordering heuristics. A closed sum type with
/// value semantics; construction is plain enum construction and dispatch is
/// a `match`.
#[derive(Debug, Clone)]
pub enum OrderingHeuristic {
    MinFill,
    AdvancedMinFill,
    MinDegree,
    MaximumCardinalitySearch,
    Natural,
    Random,
    TriangulationMinimization(Box<OrderingHeuristic>),
}

pub(crate) enum AttemptFailure {
    WidthExceeded,
    Terminated,
}

impl OrderingHeuristic {
    /// Computes a full elimination ordering without preprocessing the graph.
    pub fn compute_ordering(&self, graph: &HashMapGraph, seed: Option<u64>) -> EliminationOrdering {
        let prep = Preprocessor::prepare(graph, false);
        self.compute_ordering_from(&prep, seed)
    }

    /// Computes a full elimination ordering on a preprocessed graph; the
    /// preprocessing prefix always heads the result. Tie-breaking is
    /// deterministic (degree ladder, then lowest vertex); `seed` only
    /// influences the `Random` baseline.
    pub fn compute_ordering_from(
        &self,
        prep: &PreprocessedGraph,
        seed: Option<u64>,
    ) -> EliminationOrdering {
        let flag = TerminationFlag::new();
        let mut rng = seed.map(StdRng::seed_from_u64);
        match self.attempt(prep, None, &flag, &mut rng, false) {
            Ok((suffix, width)) => {
                EliminationOrdering::new(assemble(prep, suffix), 1, Some(width))
            }
            Err(_) => EliminationOrdering::empty(1),
        }
    }

    /// Like `compute_ordering_from`, but with randomized tie-breaking so
    /// repeated calls with different seeds explore different orderings.
    pub fn compute_ordering_randomized(
        &self,
        prep: &PreprocessedGraph,
        flag: &TerminationFlag,
        seed: u64,
    ) -> EliminationOrdering {
        let mut rng = Some(StdRng::seed_from_u64(seed));
        match self.attempt(prep, None, flag, &mut rng, true) {
            Ok((suffix, width)) => {
                EliminationOrdering::new(assemble(prep, suffix), 1, Some(width))
            }
            Err(_) => EliminationOrdering::empty(1),
        }
    }

    /// Width-limited computation: every attempt is abandoned as soon as a
    /// selected bucket proves the decomposition would exceed `max_bag_size`.
    /// After `max_iteration_count` failed attempts the explicit empty
    /// ordering is returned; otherwise the result's decomposition is
    /// guaranteed to stay within the limit.
    pub fn compute_width_limited(
        &self,
        prep: &PreprocessedGraph,
        max_bag_size: usize,
        max_iteration_count: usize,
        flag: &TerminationFlag,
        seed: Option<u64>,
    ) -> EliminationOrdering {
        let mut rng = Some(
            seed.map(StdRng::seed_from_u64)
                .unwrap_or_else(StdRng::from_entropy),
        );
        let mut iterations = 0;
        while iterations < max_iteration_count {
            iterations += 1;
            match self.attempt(prep, Some(max_bag_size), flag, &mut rng, true) {
                Ok((suffix, width)) => {
                    return EliminationOrdering::new(
                        assemble(prep, suffix),
                        iterations,
                        Some(width),
                    );
                }
                Err(AttemptFailure::Terminated) => break,
                Err(AttemptFailure::WidthExceeded) => {}
            }
        }
        EliminationOrdering::empty(iterations)
    }

    /// One ordering attempt over the remaining vertices. Returns the
    /// index-space suffix and the maximum bag size of the full ordering
    /// (preprocessing prefix included).
    pub(crate) fn attempt(
        &self,
        prep: &PreprocessedGraph,
        max_bag_size: Option<usize>,
        flag: &TerminationFlag,
        rng: &mut Option<StdRng>,
        randomize: bool,
    ) -> Result<(Vec<usize>, usize), AttemptFailure> {
        match self {
            OrderingHeuristic::MinFill => run_selector(
                prep,
                Criterion::Fill { advanced: false },
                max_bag_size,
                flag,
                if randomize { rng.as_mut() } else { None },
            ),
            OrderingHeuristic::AdvancedMinFill => run_selector(
                prep,
                Criterion::Fill { advanced: true },
                max_bag_size,
                flag,
                if randomize { rng.as_mut() } else { None },
            ),
            OrderingHeuristic::MinDegree => run_selector(
                prep,
                Criterion::Degree,
                max_bag_size,
                flag,
                if randomize { rng.as_mut() } else { None },
            ),
            OrderingHeuristic::MaximumCardinalitySearch => {
                let suffix = mcs_suffix(prep, flag)?;
                finish_fixed_suffix(prep, suffix, max_bag_size, flag)
            }
            OrderingHeuristic::Natural => {
                let suffix: Vec<usize> = prep.remaining_vertices().to_vec();
                finish_fixed_suffix(prep, suffix, max_bag_size, flag)
            }
            OrderingHeuristic::Random => {
                let mut suffix: Vec<usize> = prep.remaining_vertices().to_vec();
                let rng = rng.get_or_insert_with(StdRng::from_entropy);
                suffix.shuffle(rng);
                finish_fixed_suffix(prep, suffix, max_bag_size, flag)
            }
            OrderingHeuristic::TriangulationMinimization(inner) => {
                let suffix = triangulation::minimized_suffix(prep, inner, flag, rng, randomize)?;
                finish_fixed_suffix(prep, suffix, max_bag_size, flag)
            }
        }
    }
}

/// Maps an index-space suffix back to original vertex ids and prepends the
/// preprocessing prefix.
fn assemble(prep: &PreprocessedGraph, suffix: Vec<usize>) -> Vec<usize> {
    let mut ordering = Vec::with_capacity(prep.input_vertex_count());
    ordering.extend_from_slice(prep.elimination_sequence());
    ordering.extend(suffix.into_iter().map(|v| prep.vertex_name(v)));
    ordering
}

/// Bag size already forced by the preprocessing prefix.
fn prefix_bag_size(prep: &PreprocessedGraph) -> usize {
    if prep.elimination_sequence().is_empty() {
        0
    } else {
        prep.lower_bound() + 1
    }
}

/// Checks a precomputed suffix against a width limit by replaying the
/// elimination game on it.
fn finish_fixed_suffix(
    prep: &PreprocessedGraph,
    suffix: Vec<usize>,
    max_bag_size: Option<usize>,
    flag: &TerminationFlag,
) -> Result<(Vec<usize>, usize), AttemptFailure> {
    let width = max(prefix_bag_size(prep), suffix_bag_size(prep, &suffix, flag)?);
    if let Some(limit) = max_bag_size {
        if width > limit {
            return Err(AttemptFailure::WidthExceeded);
        }
    }
    Ok((suffix, width))
}

fn suffix_bag_size(
    prep: &PreprocessedGraph,
    suffix: &[usize],
    flag: &TerminationFlag,
) -> Result<usize, AttemptFailure> {
    let mut graph = WorkGraph::from_preprocessed(prep);
    let mut result = 0;
    for v in suffix.iter().copied() {
        if flag.is_signalled() {
            return Err(AttemptFailure::Terminated);
        }
        result = max(result, graph.degree(v) + 1);
        graph.eliminate(v);
    }
    Ok(result)
}

#[derive(Clone, Copy)]
enum Criterion {
    Fill { advanced: bool },
    Degree,
}

fn run_selector(
    prep: &PreprocessedGraph,
    criterion: Criterion,
    max_bag_size: Option<usize>,
    flag: &TerminationFlag,
    mut rng: Option<&mut StdRng>,
) -> Result<(Vec<usize>, usize), AttemptFailure> {
    let mut state = EliminationState::new(prep, criterion);
    let mut suffix = Vec::with_capacity(prep.vertex_count());
    let mut width = prefix_bag_size(prep);
    if let Some(limit) = max_bag_size {
        if width > limit {
            return Err(AttemptFailure::WidthExceeded);
        }
    }

    while state.graph.order() > 0 {
        if flag.is_signalled() {
            return Err(AttemptFailure::Terminated);
        }
        let v = state.select(criterion, rng.as_deref_mut());
        let bag = state.graph.degree(v) + 1;
        if let Some(limit) = max_bag_size {
            if bag > limit {
                return Err(AttemptFailure::WidthExceeded);
            }
        }
        width = max(width, bag);
        suffix.push(v);
        state.eliminate(v);
    }
    Ok((suffix, width))
}

/// Maximum-cardinality search: repeatedly number the vertex with the most
/// already-numbered neighbors, ties by lowest vertex; the reversed numbering
/// is the elimination ordering (a perfect elimination ordering whenever the
/// graph is chordal).
fn mcs_suffix(
    prep: &PreprocessedGraph,
    flag: &TerminationFlag,
) -> Result<Vec<usize>, AttemptFailure> {
    mcs_ordering(prep.vertex_count(), |v| prep.neighborhood(v), flag)
}

pub(crate) fn mcs_ordering<'a, F>(
    vertex_count: usize,
    neighborhood: F,
    flag: &TerminationFlag,
) -> Result<Vec<usize>, AttemptFailure>
where
    F: Fn(usize) -> &'a FxHashSet<usize>,
{
    let mut weights = vec![0i64; vertex_count];
    let mut numbered = BitSet::new(vertex_count);
    let mut numbering = Vec::with_capacity(vertex_count);
    let mut pq = BinaryQueue::new();
    for v in 0..vertex_count {
        pq.insert(v, (0i64, v));
    }
    while let Some((v, _)) = pq.pop_min() {
        if flag.is_signalled() {
            return Err(AttemptFailure::Terminated);
        }
        numbered.set_bit(v);
        numbering.push(v);
        for u in neighborhood(v).iter().copied() {
            if !numbered[u] {
                weights[u] += 1;
                pq.insert(u, (-weights[u], u));
            }
        }
    }
    numbering.reverse();
    Ok(numbering)
}

/// Index-space working graph for the elimination game. Vertices are
/// `0..len`, dead vertices keep an empty adjacency set.
pub(crate) struct WorkGraph {
    neighborhood: Vec<FxHashSet<usize>>,
    alive: BitSet,
    remaining: usize,
}

impl WorkGraph {
    pub(crate) fn from_preprocessed(prep: &PreprocessedGraph) -> Self {
        let len = prep.vertex_count();
        Self {
            neighborhood: (0..len).map(|v| prep.neighborhood(v).clone()).collect(),
            alive: BitSet::new_all_set(len),
            remaining: len,
        }
    }

    pub(crate) fn order(&self) -> usize {
        self.remaining
    }

    pub(crate) fn alive_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive.iter()
    }

    pub(crate) fn degree(&self, v: usize) -> usize {
        self.neighborhood[v].len()
    }

    pub(crate) fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighborhood[u].contains(&v)
    }

    pub(crate) fn neighborhood(&self, v: usize) -> &FxHashSet<usize> {
        &self.neighborhood[v]
    }

    pub(crate) fn add_edge(&mut self, u: usize, v: usize) {
        self.neighborhood[u].insert(v);
        self.neighborhood[v].insert(u);
    }

    pub(crate) fn remove_edge(&mut self, u: usize, v: usize) {
        self.neighborhood[u].remove(&v);
        self.neighborhood[v].remove(&u);
    }

    pub(crate) fn eliminate(&mut self, v: usize) {
        let nb: Vec<usize> = std::mem::take(&mut self.neighborhood[v]).into_iter().collect();
        for u in nb.iter() {
            self.neighborhood[*u].remove(&v);
        }
        for (i, u) in nb.iter().enumerate() {
            for w in nb.iter().skip(i + 1) {
                self.neighborhood[*u].insert(*w);
                self.neighborhood[*w].insert(*u);
            }
        }
        self.alive.unset_bit(v);
        self.remaining -= 1;
    }
}

/// Selector state for the greedy elimination heuristics. The fill cache
/// holds, per vertex, the number of edges inside its neighborhood, so the
/// fill-in count of `v` is `deg(v) * (deg(v) - 1) / 2 - cache[v]` and stays
/// O(1) per query under incremental updates.
struct EliminationState {
    graph: WorkGraph,
    cache: Option<Vec<usize>>,
}

impl EliminationState {
    fn new(prep: &PreprocessedGraph, criterion: Criterion) -> Self {
        let graph = WorkGraph::from_preprocessed(prep);
        let cache = match criterion {
            Criterion::Fill { .. } => {
                let mut cache = vec![0usize; prep.vertex_count()];
                for v in 0..prep.vertex_count() {
                    let nb = graph.neighborhood(v);
                    let mut edges = 0;
                    for u in nb.iter() {
                        for w in nb.iter() {
                            if u < w && graph.has_edge(*u, *w) {
                                edges += 1;
                            }
                        }
                    }
                    cache[v] = edges;
                }
                Some(cache)
            }
            Criterion::Degree => None,
        };
        Self { graph, cache }
    }

    fn fill_in_count(&self, v: usize) -> usize {
        let deg = self.graph.degree(v);
        (deg * deg - deg) / 2 - self.cache.as_ref().unwrap()[v]
    }

    fn value(&self, criterion: Criterion, v: usize) -> usize {
        match criterion {
            Criterion::Fill { .. } => self.fill_in_count(v),
            Criterion::Degree => self.graph.degree(v),
        }
    }

    /// Total degree the elimination of `v` would leave on its neighborhood;
    /// the one-step look-ahead AdvancedMinFill breaks fill ties with.
    fn look_ahead(&self, v: usize) -> usize {
        let nb = self.graph.neighborhood(v);
        let mut total = 0;
        for u in nb.iter().copied() {
            let common = self
                .graph
                .neighborhood(u)
                .iter()
                .filter(|x| nb.contains(x))
                .count();
            let missing = nb.len() - 1 - common;
            total += self.graph.degree(u) - 1 + missing;
        }
        total
    }

    fn select(&self, criterion: Criterion, rng: Option<&mut StdRng>) -> usize {
        let mut pool: Vec<usize> = Vec::new();
        let mut best = usize::MAX;
        for v in self.graph.alive_vertices() {
            let value = self.value(criterion, v);
            if value < best {
                best = value;
                pool.clear();
                pool.push(v);
            } else if value == best {
                pool.push(v);
            }
        }
        debug_assert!(!pool.is_empty());
        if pool.len() > 1 {
            match criterion {
                Criterion::Fill { advanced: true } => {
                    retain_minima(&mut pool, |v| self.look_ahead(v))
                }
                Criterion::Fill { advanced: false } => {
                    retain_minima(&mut pool, |v| self.graph.degree(v))
                }
                Criterion::Degree => {}
            }
        }
        match rng {
            Some(rng) if pool.len() > 1 => pool[rng.gen_range(0..pool.len())],
            // alive_vertices iterates ascending, so the head is the lowest id
            _ => pool[0],
        }
    }

    fn eliminate(&mut self, v: usize) {
        if self.cache.is_none() {
            self.graph.eliminate(v);
            return;
        }
        if self.fill_in_count(v) == 0 {
            self.eliminate_fill0(v);
        } else {
            let nb = self.graph.neighborhood(v);
            let mut to_add: Vec<(usize, usize)> = Vec::new();
            for u in nb.iter().copied() {
                for w in nb
                    .iter()
                    .copied()
                    .filter(|w| u < *w && !self.graph.has_edge(u, *w))
                {
                    to_add.push((u, w));
                }
            }
            for (u, w) in to_add {
                self.add_edge(u, w);
            }
            self.remove_vertex(v);
        }
    }

    /// Zero fill: the neighborhood is a clique, so each neighbor loses
    /// `deg(v) - 1` adjacent pairs along with the vertex itself.
    fn eliminate_fill0(&mut self, v: usize) {
        if self.graph.degree(v) > 1 {
            let delta = self.graph.degree(v) - 1;
            let cache = self.cache.as_mut().unwrap();
            for u in self.graph.neighborhood(v).iter() {
                cache[*u] -= delta;
            }
        }
        self.graph.eliminate(v);
        self.cache.as_mut().unwrap()[v] = 0;
    }

    fn add_edge(&mut self, u: usize, w: usize) {
        self.graph.add_edge(u, w);
        let cache = self.cache.as_mut().unwrap();
        let mut common = 0;
        for x in self.graph.neighborhood[u].iter().copied() {
            if self.graph.neighborhood[w].contains(&x) {
                cache[x] += 1;
                common += 1;
            }
        }
        cache[u] += common;
        cache[w] += common;
    }

    fn remove_edge(&mut self, u: usize, w: usize) {
        self.graph.remove_edge(u, w);
        let cache = self.cache.as_mut().unwrap();
        let mut common = 0;
        for x in self.graph.neighborhood[u].iter().copied() {
            if self.graph.neighborhood[w].contains(&x) {
                cache[x] -= 1;
                common += 1;
            }
        }
        cache[u] -= common;
        cache[w] -= common;
    }

    fn remove_vertex(&mut self, v: usize) {
        let nb: Vec<usize> = self.graph.neighborhood(v).iter().copied().collect();
        for u in nb {
            self.remove_edge(v, u);
        }
        self.graph.alive.unset_bit(v);
        self.graph.remaining -= 1;
        self.cache.as_mut().unwrap()[v] = 0;
    }
}

fn retain_minima<F: Fn(usize) -> usize>(pool: &mut Vec<usize>, score: F) {
    let best = pool.iter().map(|v| score(*v)).min().unwrap();
    pool.retain(|v| score(*v) == best);
}

#[cfg(test)]
mod tests {
    use crate::elimination::{max_bag_size_of, EliminationOrdering, OrderingHeuristic};
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::preprocessing::Preprocessor;
    use crate::termination::TerminationFlag;

    fn path_graph() -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph
    }

    fn complete_graph(n: usize) -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        for u in 1..=n {
            for v in (u + 1)..=n {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    fn all_heuristics() -> Vec<OrderingHeuristic> {
        vec![
            OrderingHeuristic::MinFill,
            OrderingHeuristic::AdvancedMinFill,
            OrderingHeuristic::MinDegree,
            OrderingHeuristic::MaximumCardinalitySearch,
            OrderingHeuristic::Natural,
            OrderingHeuristic::Random,
            OrderingHeuristic::TriangulationMinimization(Box::new(OrderingHeuristic::MinFill)),
        ]
    }

    fn assert_permutation(graph: &HashMapGraph, ordering: &EliminationOrdering) {
        use crate::graph::Graph;
        let mut seen: Vec<usize> = ordering.vertices().to_vec();
        seen.sort_unstable();
        let mut expected: Vec<usize> = graph.vertices().collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn permutation_property() {
        let graphs = vec![path_graph(), complete_graph(4), {
            let mut g = HashMapGraph::new();
            g.add_edge(1, 2);
            g.add_edge(3, 4);
            g.add_vertex(9);
            g
        }];
        for graph in graphs {
            for heuristic in all_heuristics() {
                let ordering = heuristic.compute_ordering(&graph, Some(7));
                assert_permutation(&graph, &ordering);
            }
        }
    }

    #[test]
    fn path_graph_width_two() {
        // the random baseline needs no quality guarantee, every greedy
        // heuristic does
        let graph = path_graph();
        for heuristic in all_heuristics() {
            if let OrderingHeuristic::Random = heuristic {
                continue;
            }
            let ordering = heuristic.compute_ordering(&graph, Some(7));
            assert_eq!(max_bag_size_of(&graph, ordering.vertices()), 2);
        }
    }

    #[test]
    fn complete_graph_width_four() {
        let graph = complete_graph(4);
        for heuristic in all_heuristics() {
            let ordering = heuristic.compute_ordering(&graph, Some(7));
            assert_eq!(max_bag_size_of(&graph, ordering.vertices()), 4);
        }
    }

    #[test]
    fn natural_is_ascending() {
        let graph = path_graph();
        let ordering = OrderingHeuristic::Natural.compute_ordering(&graph, None);
        assert_eq!(ordering.vertices(), &[1, 2, 3, 4]);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let mut graph = HashMapGraph::new();
        for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (1, 3), (2, 5)].iter() {
            graph.add_edge(*u, *v);
        }
        for heuristic in all_heuristics() {
            let a = heuristic.compute_ordering(&graph, Some(99));
            let b = heuristic.compute_ordering(&graph, Some(99));
            assert_eq!(a.vertices(), b.vertices());
            assert_eq!(a.max_bag_size(), b.max_bag_size());
        }
    }

    #[test]
    fn min_fill_tracks_bag_size() {
        let graph = path_graph();
        let ordering = OrderingHeuristic::MinFill.compute_ordering(&graph, None);
        assert_eq!(ordering.max_bag_size(), Some(2));
        assert_eq!(ordering.iterations(), 1);
    }

    #[test]
    fn min_fill_prefers_zero_fill_vertices() {
        // 2 is the center of a star plus a triangle edge; eliminating the
        // degree-1 vertex first is the unique zero-fill move
        let mut graph = HashMapGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(2, 4);
        graph.add_edge(3, 4);

        let ordering = OrderingHeuristic::MinFill.compute_ordering(&graph, None);
        assert_eq!(ordering.vertices()[0], 1);
    }

    #[test]
    fn width_limited_succeeds_within_budget() {
        let graph = path_graph();
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();
        let ordering = OrderingHeuristic::MinFill.compute_width_limited(
            &prep,
            2,
            10,
            &flag,
            Some(3),
        );
        assert!(!ordering.is_empty());
        assert!(ordering.max_bag_size().unwrap() <= 2);
    }

    #[test]
    fn width_limited_exhausts_on_impossible_budget() {
        // K4 needs bags of size 4; a limit of 3 can never be met
        let graph = complete_graph(4);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();
        let ordering =
            OrderingHeuristic::MinFill.compute_width_limited(&prep, 3, 5, &flag, Some(3));
        assert!(ordering.is_empty());
        assert_eq!(ordering.iterations(), 5);
    }

    #[test]
    fn cancelled_computation_returns_empty() {
        let graph = complete_graph(4);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();
        flag.signal();
        let ordering =
            OrderingHeuristic::MinFill.compute_width_limited(&prep, 10, 5, &flag, Some(3));
        assert!(ordering.is_empty());
    }

    #[test]
    fn preprocessing_prefix_heads_ordering() {
        // pendant 5 hangs off a 4-cycle; preprocessing eliminates everything
        let mut graph = HashMapGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph.add_edge(4, 1);
        graph.add_edge(1, 5);

        let prep = Preprocessor::prepare(&graph, true);
        let prefix = prep.elimination_sequence().to_vec();
        let ordering = OrderingHeuristic::MinFill.compute_ordering_from(&prep, None);
        assert_eq!(&ordering.vertices()[0..prefix.len()], prefix.as_slice());
        assert_eq!(ordering.vertices().len(), 5);
    }

    #[test]
    fn mcs_is_perfect_on_chordal_graphs() {
        // a chordal graph: two triangles sharing an edge plus a pendant
        let mut graph = HashMapGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(1, 3);
        graph.add_edge(2, 3);
        graph.add_edge(2, 4);
        graph.add_edge(3, 4);
        graph.add_edge(4, 5);

        let ordering =
            OrderingHeuristic::MaximumCardinalitySearch.compute_ordering(&graph, None);
        // max clique is a triangle, so a perfect elimination ordering has
        // maximum bag size exactly 3
        assert_eq!(max_bag_size_of(&graph, ordering.vertices()), 3);
    }

    #[test]
    fn random_preserves_prefix_order() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph.add_edge(4, 1);
        graph.add_edge(1, 5);

        let prep = Preprocessor::prepare(&graph, true);
        let prefix = prep.elimination_sequence().to_vec();
        let ordering = OrderingHeuristic::Random.compute_ordering_from(&prep, Some(11));
        assert_eq!(&ordering.vertices()[0..prefix.len()], prefix.as_slice());
    }
}
