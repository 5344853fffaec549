//! Exhaustive and heuristic solvers.
//!
//! Both strategies keep an explicit frontier and a visited set instead of
//! recursing. The breadth-first search returns a shortest solution within its
//! depth bound. The best-first search orders its frontier by `f = g + h`,
//! prunes redundant successor moves, and gives up at a wall-clock deadline.
//!
//! A popped node is tested for the goal before the deadline is checked, so
//! an already solved start yields an empty solution even with a zero timeout.
//!
//! The best-first search keeps the first path it finds to each state. If a
//! shorter path to an already visited state turns up later it is dropped, so
//! its solutions are valid but not always minimal.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::cube::CubeState;
use crate::error::{Error, Result};
use crate::heuristic::MisplacedStickers;
use crate::moves::{Move, MoveSequence, Path};
use crate::parallel::{parallel_best_first, BranchSignal};
use crate::pruning::candidate_moves;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Longest solution to look for
    pub max_depth: usize,
    /// Maximum time to search (best-first strategies only)
    pub timeout: Duration,
    /// Distance estimate guiding the best-first strategies
    pub heuristic: MisplacedStickers,
    /// Stop the other branches of a parallel search once one succeeds
    pub early_stop: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            timeout: Duration::from_secs(5),
            heuristic: MisplacedStickers::default(),
            early_stop: false,
        }
    }
}

/// Search algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Unweighted shortest path, bounded by depth only
    BreadthFirst,
    /// Heuristic best-first search with pruning and a deadline
    BestFirst,
    /// Best-first search fanned out over the 12 first moves
    Parallel,
}

/// A successful search
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Moves that take the start state to the solved state (empty if already solved)
    pub moves: MoveSequence,
    /// Number of states expanded
    pub nodes_expanded: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Solve `start` with the chosen strategy.
pub fn solve(start: &CubeState, strategy: Strategy, config: &SolverConfig) -> Result<Solution> {
    match strategy {
        Strategy::BreadthFirst => breadth_first(start, config.max_depth),
        Strategy::BestFirst => best_first(start, config),
        Strategy::Parallel => parallel_best_first(start, config),
    }
}

/// A frame in the breadth-first search
#[derive(Debug, Clone)]
struct SearchFrame {
    state: CubeState,
    path: Path,
}

/// Find a shortest solution of at most `max_depth` moves.
///
/// States are marked visited when dequeued. Successors of states at
/// `max_depth` are not generated, so a bounded search that runs dry returns
/// [`Error::SearchExhausted`].
pub fn breadth_first(start: &CubeState, max_depth: usize) -> Result<Solution> {
    let start_time = Instant::now();
    debug!("breadth-first search: max_depth={}", max_depth);

    let mut nodes_expanded: usize = 0;
    let mut visited: HashSet<CubeState> = HashSet::new();
    let mut queue: VecDeque<SearchFrame> = VecDeque::new();
    queue.push_back(SearchFrame {
        state: *start,
        path: Path::new(),
    });

    while let Some(frame) = queue.pop_front() {
        if frame.state.is_solved() {
            let solution = Solution {
                moves: frame.path.into(),
                nodes_expanded,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
            info!(
                "breadth-first search solved in {} moves: {}",
                solution.moves.len(),
                solution.moves
            );
            return Ok(solution);
        }

        if !visited.insert(frame.state) {
            continue;
        }
        nodes_expanded += 1;

        if frame.path.len() >= max_depth {
            continue;
        }

        for mv in Move::ALL {
            let mut path = frame.path.clone();
            path.push(mv);
            queue.push_back(SearchFrame {
                state: frame.state.apply(mv),
                path,
            });
        }
    }

    debug!(
        "breadth-first search exhausted after {} nodes",
        nodes_expanded
    );
    Err(Error::SearchExhausted {
        elapsed_ms: start_time.elapsed().as_millis() as u64,
        nodes_expanded,
    })
}

/// Find a solution with best-first search, bounded by depth and time.
pub fn best_first(start: &CubeState, config: &SolverConfig) -> Result<Solution> {
    let start_time = Instant::now();
    let deadline = start_time + config.timeout;
    debug!(
        "best-first search: max_depth={} timeout={:?} divisor={}",
        config.max_depth,
        config.timeout,
        config.heuristic.divisor()
    );

    let run = best_first_from(
        start,
        None,
        config.max_depth,
        deadline,
        &config.heuristic,
        None,
    );
    let elapsed_ms = start_time.elapsed().as_millis() as u64;

    match run.status {
        SearchStatus::Solved(path) => {
            let solution = Solution {
                moves: path.into(),
                nodes_expanded: run.nodes_expanded,
                time_elapsed_ms: elapsed_ms,
            };
            info!(
                "best-first search solved in {} moves: {}",
                solution.moves.len(),
                solution.moves
            );
            Ok(solution)
        }
        SearchStatus::Exhausted | SearchStatus::Cancelled => {
            debug!(
                "best-first search exhausted after {} nodes",
                run.nodes_expanded
            );
            Err(Error::SearchExhausted {
                elapsed_ms,
                nodes_expanded: run.nodes_expanded,
            })
        }
        SearchStatus::TimedOut => {
            debug!(
                "best-first search timed out after {}ms ({} nodes)",
                elapsed_ms, run.nodes_expanded
            );
            Err(Error::SearchTimedOut {
                elapsed_ms,
                nodes_expanded: run.nodes_expanded,
            })
        }
    }
}

/// How a single best-first run ended
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchStatus {
    Solved(Path),
    Exhausted,
    TimedOut,
    /// Stopped by the parallel coordinator or a sibling branch
    Cancelled,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchRun {
    pub status: SearchStatus,
    pub nodes_expanded: usize,
}

/// A frontier entry, ordered by scaled `f` then insertion order
#[derive(Debug)]
struct SearchNode {
    cost: u64,
    sequence: u64,
    state: CubeState,
    path: Path,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.sequence == other.sequence
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    // Reversed so the max-heap pops the lowest cost, oldest entry first
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best-first search from `start`.
///
/// `prev` is the move already committed before `start` (used by the parallel
/// variant so pruning sees across the branch boundary). Returned paths do not
/// include it. `signal` lets sibling branches cancel this one or rule out
/// paths no shorter than a solution they already found.
pub(crate) fn best_first_from(
    start: &CubeState,
    prev: Option<Move>,
    max_depth: usize,
    deadline: Instant,
    heuristic: &MisplacedStickers,
    signal: Option<&BranchSignal>,
) -> SearchRun {
    let committed = usize::from(prev.is_some());
    let mut nodes_expanded: usize = 0;
    let mut sequence: u64 = 0;

    let mut visited: HashSet<CubeState> = HashSet::new();
    visited.insert(*start);

    let mut frontier: BinaryHeap<SearchNode> = BinaryHeap::new();
    frontier.push(SearchNode {
        cost: heuristic.scaled_cost(0, start),
        sequence,
        state: *start,
        path: Path::new(),
    });

    while let Some(node) = frontier.pop() {
        if node.path.len() > max_depth {
            continue;
        }
        if let Some(signal) = signal {
            if committed + node.path.len() >= signal.best_len() {
                continue;
            }
        }
        if node.state.is_solved() {
            return SearchRun {
                status: SearchStatus::Solved(node.path),
                nodes_expanded,
            };
        }

        if Instant::now() >= deadline {
            return SearchRun {
                status: SearchStatus::TimedOut,
                nodes_expanded,
            };
        }
        if signal.map_or(false, |signal| signal.is_stopped()) {
            return SearchRun {
                status: SearchStatus::Cancelled,
                nodes_expanded,
            };
        }
        nodes_expanded += 1;

        let last = node.path.last().copied().or(prev);
        for mv in candidate_moves(last) {
            let next = node.state.apply(mv);
            if !visited.insert(next) {
                continue;
            }

            let mut path = node.path.clone();
            path.push(mv);
            sequence += 1;
            frontier.push(SearchNode {
                cost: heuristic.scaled_cost(path.len(), &next),
                sequence,
                state: next,
                path,
            });
        }
    }

    SearchRun {
        status: SearchStatus::Exhausted,
        nodes_expanded,
    }
}
