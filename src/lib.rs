//! Quarter-turn solver for the 3x3x3 cube.
//!
//! This crate models a cube as 54 sticker labels, applies the 12 quarter
//! turns through constant index tables, and searches for a move sequence
//! back to the solved state with either an exhaustive breadth-first search or
//! a depth- and time-bounded best-first search (optionally fanned out over
//! the 12 first moves on separate threads).

pub mod cube;
pub mod error;
pub mod heuristic;
pub mod moves;
pub mod parallel;
pub mod pruning;
pub mod scramble;
pub mod solver;

// Re-export main types
pub use cube::{CubeState, Face};
pub use error::{Error, Result};
pub use heuristic::{misplaced_stickers, MisplacedStickers};
pub use moves::{apply, apply_token, Move, MoveSequence};
pub use parallel::parallel_best_first;
pub use pruning::{candidate_moves, is_banned_pair, should_reject_path};
pub use scramble::random_scramble;
pub use solver::{best_first, breadth_first, solve, Solution, SolverConfig, Strategy};
