//! Branch-parallel best-first search.
//!
//! Each of the 12 first moves gets its own worker thread running the
//! best-first search one move shallower, with its own frontier and visited
//! set. Workers report over a channel; the coordinator keeps the shortest
//! solution. Workers still running at the deadline are abandoned and their
//! results discarded.
//!
//! The only state the workers share is a [`BranchSignal`]. Each branch is
//! correct without it; it only lets branches quit early.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::cube::CubeState;
use crate::error::{Error, Result};
use crate::moves::{Move, Path};
use crate::solver::{best_first_from, SearchRun, SearchStatus, Solution, SolverConfig};

/// Extra time given to workers past the deadline to report
const JOIN_GRACE: Duration = Duration::from_millis(100);

/// Best-effort coordination between sibling branches
#[derive(Debug)]
pub(crate) struct BranchSignal {
    stop: AtomicBool,
    best_len: AtomicUsize,
}

impl BranchSignal {
    pub fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            best_len: AtomicUsize::new(usize::MAX),
        }
    }

    /// Ask every branch to give up
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Length of the shortest full solution reported so far
    pub fn best_len(&self) -> usize {
        self.best_len.load(Ordering::Relaxed)
    }

    pub fn record_solution(&self, len: usize) {
        self.best_len.fetch_min(len, Ordering::Relaxed);
    }
}

/// Result reported by one branch
struct BranchReport {
    first: Move,
    run: SearchRun,
}

/// Run the best-first search on all 12 first-move branches concurrently.
pub fn parallel_best_first(start: &CubeState, config: &SolverConfig) -> Result<Solution> {
    let start_time = Instant::now();
    let deadline = start_time + config.timeout;

    if start.is_solved() {
        return Ok(Solution {
            moves: Path::new().into(),
            nodes_expanded: 0,
            time_elapsed_ms: 0,
        });
    }
    if config.max_depth == 0 {
        return Err(Error::SearchExhausted {
            elapsed_ms: 0,
            nodes_expanded: 0,
        });
    }

    debug!(
        "parallel search: {} branches, max_depth={} timeout={:?}",
        Move::ALL.len(),
        config.max_depth,
        config.timeout
    );

    let signal = Arc::new(BranchSignal::new());
    let (tx, rx) = mpsc::channel::<BranchReport>();

    for first in Move::ALL {
        let tx = tx.clone();
        let signal = Arc::clone(&signal);
        let branch_start = start.apply(first);
        let max_depth = config.max_depth - 1;
        let heuristic = config.heuristic;
        let early_stop = config.early_stop;

        thread::spawn(move || {
            let run = best_first_from(
                &branch_start,
                Some(first),
                max_depth,
                deadline,
                &heuristic,
                Some(&signal),
            );
            if let SearchStatus::Solved(path) = &run.status {
                signal.record_solution(path.len() + 1);
                if early_stop {
                    signal.stop();
                }
            }
            // The coordinator may have stopped listening; the result is dropped then
            let _ = tx.send(BranchReport { first, run });
        });
    }
    drop(tx);

    let mut best: Option<(Move, Path)> = None;
    let mut nodes_expanded: usize = 0;
    let mut timed_out = false;
    let mut reports: usize = 0;

    while reports < Move::ALL.len() {
        let wait = (deadline + JOIN_GRACE).saturating_duration_since(Instant::now());
        let report = match rx.recv_timeout(wait) {
            Ok(report) => report,
            Err(_) => {
                warn!(
                    "parallel search: abandoning {} unfinished branches",
                    Move::ALL.len() - reports
                );
                signal.stop();
                timed_out = true;
                break;
            }
        };
        reports += 1;
        nodes_expanded += report.run.nodes_expanded;

        match report.run.status {
            SearchStatus::Solved(path) => {
                debug!(
                    "branch {} solved in {} moves",
                    report.first,
                    path.len() + 1
                );
                if is_better(&best, report.first, &path) {
                    best = Some((report.first, path));
                }
            }
            SearchStatus::TimedOut => timed_out = true,
            SearchStatus::Exhausted | SearchStatus::Cancelled => {}
        }
    }

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    match best {
        Some((first, rest)) => {
            let moves: Path = std::iter::once(first).chain(rest).collect();
            let solution = Solution {
                moves: moves.into(),
                nodes_expanded,
                time_elapsed_ms: elapsed_ms,
            };
            info!(
                "parallel search solved in {} moves: {}",
                solution.moves.len(),
                solution.moves
            );
            Ok(solution)
        }
        None if timed_out => Err(Error::SearchTimedOut {
            elapsed_ms,
            nodes_expanded,
        }),
        None => Err(Error::SearchExhausted {
            elapsed_ms,
            nodes_expanded,
        }),
    }
}

/// Shorter wins; equal lengths go to the earlier first move.
fn is_better(best: &Option<(Move, Path)>, first: Move, path: &Path) -> bool {
    match best {
        None => true,
        Some((best_first, best_path)) => {
            (path.len(), first.index()) < (best_path.len(), best_first.index())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveSequence;
    use crate::pruning::should_reject_path;

    fn scrambled(text: &str) -> CubeState {
        let scramble: MoveSequence = text.parse().unwrap();
        CubeState::solved().apply_all(&scramble)
    }

    #[test]
    fn test_parallel_solved_cube() {
        let result = parallel_best_first(&CubeState::solved(), &SolverConfig::default()).unwrap();
        assert!(result.moves.is_empty());
    }

    #[test]
    fn test_parallel_single_move() {
        let cube = scrambled("B");
        let result = parallel_best_first(&cube, &SolverConfig::default()).unwrap();
        assert_eq!(result.moves.to_string(), "B'");
    }

    #[test]
    fn test_parallel_solution_is_valid() {
        let cube = scrambled("U R' F");
        let config = SolverConfig {
            max_depth: 8,
            timeout: Duration::from_secs(20),
            ..Default::default()
        };
        let result = parallel_best_first(&cube, &config).unwrap();
        assert!(cube.apply_all(&result.moves).is_solved());
        assert!(!should_reject_path(&result.moves));
        assert!(result.moves.len() <= 8);
    }

    #[test]
    fn test_parallel_early_stop() {
        let cube = scrambled("L F R' U'");
        let config = SolverConfig {
            max_depth: 10,
            timeout: Duration::from_secs(20),
            early_stop: true,
            ..Default::default()
        };
        let result = parallel_best_first(&cube, &config).unwrap();
        assert!(cube.apply_all(&result.moves).is_solved());
    }

    #[test]
    fn test_parallel_zero_depth() {
        let cube = scrambled("U");
        let config = SolverConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            parallel_best_first(&cube, &config),
            Err(Error::SearchExhausted { .. })
        ));
    }

    #[test]
    fn test_parallel_zero_timeout() {
        let cube = scrambled("U R' F L D' B R U' F' L' D B'");
        let config = SolverConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        let start = Instant::now();
        let result = parallel_best_first(&cube, &config);
        assert!(matches!(result, Err(Error::SearchTimedOut { .. })));
        assert!(start.elapsed() < JOIN_GRACE + Duration::from_secs(1));
    }

    #[test]
    fn test_parallel_short_timeout() {
        let cube = scrambled("U R' F L D' B R U' F' L' D B'");
        let config = SolverConfig {
            timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let start = Instant::now();
        let result = parallel_best_first(&cube, &config);
        assert!(matches!(result, Err(Error::SearchTimedOut { .. })));
        assert!(start.elapsed() < config.timeout + JOIN_GRACE + Duration::from_secs(1));
    }

    #[test]
    fn test_is_better_prefers_shorter_then_earlier() {
        let short: Path = [Move::R].into_iter().collect();
        let long: Path = [Move::R, Move::U].into_iter().collect();

        assert!(is_better(&None, Move::B, &long));
        assert!(is_better(&Some((Move::U, long.clone())), Move::B, &short));
        assert!(!is_better(&Some((Move::U, short.clone())), Move::B, &short));
        assert!(is_better(&Some((Move::B, short.clone())), Move::U, &short));
    }
}
