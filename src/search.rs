use crate::elimination::{max_bag_size_of, EliminationOrdering, OrderingHeuristic};
use crate::graph::HashMapGraph;
use crate::preprocessing::PreprocessedGraph;
use crate::termination::TerminationFlag;
#[cfg(feature = "log")]
use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

/// Result of an anytime search: the best ordering found and the number of
/// attempts spent. `best` is the empty ordering when no attempt completed
/// (zero budget, or cancellation before the first attempt finished).
pub struct SearchOutcome {
    pub best: EliminationOrdering,
    pub iterations_used: usize,
}

/// Anytime best-of-N driver over a single ordering heuristic.
///
/// Every attempt runs the heuristic with randomized tie-breaking under its
/// own RNG, derived from the configured seed and the attempt index, so a
/// fixed seed reproduces the same best ordering regardless of the worker
/// count. Attempts share nothing but the read-only input, the best slot and
/// the termination flag, which is polled per attempt and per elimination
/// step.
///
/// The driver performs no algorithmic work of its own: all iteration policy
/// lives here, visible to the caller, never inside a heuristic call.
pub struct WidthLimitedSearch {
    heuristic: OrderingHeuristic,
    iteration_count: usize,
    non_improvement_limit: Option<usize>,
    threads: usize,
    seed: Option<u64>,
}

impl WidthLimitedSearch {
    pub fn new(heuristic: OrderingHeuristic) -> Self {
        Self {
            heuristic,
            iteration_count: 1,
            non_improvement_limit: None,
            threads: 1,
            seed: None,
        }
    }

    /// Total attempt budget.
    pub fn iteration_count(mut self, iteration_count: usize) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    /// Stop once this many consecutive attempts failed to improve the best
    /// width. Advisory when running on multiple workers.
    pub fn non_improvement_limit(mut self, limit: usize) -> Self {
        self.non_improvement_limit = Some(limit);
        self
    }

    /// Number of worker threads attempts run on. Attempts are independent;
    /// anything above 1 only changes wall-clock time, not the result of a
    /// seeded search.
    pub fn threads(mut self, threads: usize) -> Self {
        assert!(threads > 0);
        self.threads = threads;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn compute(
        &self,
        graph: &HashMapGraph,
        prep: &PreprocessedGraph,
        flag: &TerminationFlag,
    ) -> SearchOutcome {
        let best: Mutex<Option<(usize, usize, EliminationOrdering)>> = Mutex::new(None);
        let next_attempt = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);
        let since_improvement = AtomicUsize::new(0);

        if self.threads <= 1 {
            self.work(graph, prep, flag, &best, &next_attempt, &completed, &since_improvement);
        } else {
            thread::scope(|scope| {
                for _ in 0..self.threads {
                    scope.spawn(|| {
                        self.work(
                            graph,
                            prep,
                            flag,
                            &best,
                            &next_attempt,
                            &completed,
                            &since_improvement,
                        );
                    });
                }
            });
        }

        let iterations_used = completed.load(Ordering::SeqCst);
        let best = best.into_inner().unwrap();
        match best {
            Some((_, _, ordering)) => SearchOutcome {
                best: ordering,
                iterations_used,
            },
            None => SearchOutcome {
                best: EliminationOrdering::empty(iterations_used),
                iterations_used,
            },
        }
    }

    fn work(
        &self,
        graph: &HashMapGraph,
        prep: &PreprocessedGraph,
        flag: &TerminationFlag,
        best: &Mutex<Option<(usize, usize, EliminationOrdering)>>,
        next_attempt: &AtomicUsize,
        completed: &AtomicUsize,
        since_improvement: &AtomicUsize,
    ) {
        loop {
            if flag.is_signalled() {
                return;
            }
            if let Some(limit) = self.non_improvement_limit {
                if since_improvement.load(Ordering::SeqCst) >= limit {
                    return;
                }
            }
            let attempt = next_attempt.fetch_add(1, Ordering::SeqCst);
            if attempt >= self.iteration_count {
                return;
            }

            let ordering =
                self.heuristic
                    .compute_ordering_randomized(prep, flag, derive_seed(self.seed, attempt));
            if ordering.is_empty() && ordering.max_bag_size().is_none() {
                // cancelled mid-attempt
                return;
            }
            let width = ordering
                .max_bag_size()
                .unwrap_or_else(|| max_bag_size_of(graph, ordering.vertices()));
            completed.fetch_add(1, Ordering::SeqCst);

            let mut slot = best.lock().unwrap();
            let improved = match slot.as_ref() {
                None => true,
                Some((best_width, best_attempt, _)) => {
                    (width, attempt) < (*best_width, *best_attempt)
                }
            };
            if improved {
                let strictly_better = slot.as_ref().map_or(true, |(w, _, _)| width < *w);
                #[cfg(feature = "log")]
                info!(
                    "attempt {} found ordering with maximum bag size {}",
                    attempt, width
                );
                *slot = Some((width, attempt, ordering));
                if strictly_better {
                    since_improvement.store(0, Ordering::SeqCst);
                } else {
                    since_improvement.fetch_add(1, Ordering::SeqCst);
                }
            } else {
                since_improvement.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

fn derive_seed(seed: Option<u64>, attempt: usize) -> u64 {
    seed.unwrap_or(0x51_7c_c1_b7_27_22_0a_95)
        .wrapping_add((attempt as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

#[cfg(test)]
mod tests {
    use crate::elimination::{max_bag_size_of, OrderingHeuristic};
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::preprocessing::Preprocessor;
    use crate::search::WidthLimitedSearch;
    use crate::termination::TerminationFlag;

    fn grid(rows: usize, cols: usize) -> HashMapGraph {
        let mut graph = HashMapGraph::new();
        let id = |r: usize, c: usize| r * cols + c + 1;
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    graph.add_edge(id(r, c), id(r, c + 1));
                }
                if r + 1 < rows {
                    graph.add_edge(id(r, c), id(r + 1, c));
                }
            }
        }
        graph
    }

    #[test]
    fn best_of_many_is_no_worse_than_single() {
        let graph = grid(4, 4);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();

        // attempt 0 is shared between both runs, so the larger budget can
        // only improve on the smaller one
        let single = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(1)
            .seed(Some(1))
            .compute(&graph, &prep, &flag);
        let single_width = max_bag_size_of(&graph, single.best.vertices());

        let outcome = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(8)
            .seed(Some(1))
            .compute(&graph, &prep, &flag);

        assert_eq!(outcome.iterations_used, 8);
        assert!(!outcome.best.is_empty());
        let best_width = max_bag_size_of(&graph, outcome.best.vertices());
        assert!(best_width <= single_width);
    }

    #[test]
    fn seeded_search_is_reproducible() {
        let graph = grid(3, 4);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();

        let a = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(6)
            .seed(Some(42))
            .compute(&graph, &prep, &flag);
        let b = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(6)
            .seed(Some(42))
            .compute(&graph, &prep, &flag);

        assert_eq!(a.best.vertices(), b.best.vertices());
    }

    #[test]
    fn parallel_matches_sequential_for_fixed_seed() {
        let graph = grid(3, 4);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();

        let sequential = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(6)
            .seed(Some(13))
            .compute(&graph, &prep, &flag);
        let parallel = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(6)
            .threads(4)
            .seed(Some(13))
            .compute(&graph, &prep, &flag);

        assert_eq!(sequential.best.vertices(), parallel.best.vertices());
    }

    #[test]
    fn cancelled_search_yields_empty_without_completed_attempts() {
        let graph = grid(3, 3);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();
        flag.signal();

        let outcome = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(100)
            .compute(&graph, &prep, &flag);
        assert!(outcome.best.is_empty());
        assert_eq!(outcome.iterations_used, 0);
    }

    #[test]
    fn zero_budget_yields_empty_ordering() {
        let graph = grid(2, 2);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();

        let outcome = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(0)
            .compute(&graph, &prep, &flag);
        assert!(outcome.best.is_empty());
        assert_eq!(outcome.iterations_used, 0);
    }

    #[test]
    fn non_improvement_limit_stops_early() {
        let graph = grid(3, 3);
        let prep = Preprocessor::prepare(&graph, false);
        let flag = TerminationFlag::new();

        let outcome = WidthLimitedSearch::new(OrderingHeuristic::MinFill)
            .iteration_count(1000)
            .non_improvement_limit(5)
            .seed(Some(3))
            .compute(&graph, &prep, &flag);
        assert!(outcome.iterations_used < 1000);
        assert!(!outcome.best.is_empty());
    }
}
