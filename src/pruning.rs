//! Search space pruning rules for the best-first solver.
//!
//! Both rules look only at the immediately preceding move; longer redundant
//! cycles are left to the visited set.

use smallvec::SmallVec;

use crate::moves::Move;

/// Check if `next` is pointless right after `prev`
pub fn is_banned_pair(prev: Move, next: Move) -> bool {
    // Rule 1: a second turn of the same face merges with the first
    if prev.face() == next.face() {
        return true;
    }

    // Rule 2: the exact inverse of the previous turn
    next == prev.inverse()
}

/// Check if a path contains a banned consecutive pair
pub fn should_reject_path(path: &[Move]) -> bool {
    path.windows(2).any(|pair| is_banned_pair(pair[0], pair[1]))
}

/// Moves worth trying after `prev`, in [`Move::ALL`] order
pub fn candidate_moves(prev: Option<Move>) -> SmallVec<[Move; 12]> {
    Move::ALL
        .iter()
        .copied()
        .filter(|&mv| !prev.map_or(false, |p| is_banned_pair(p, mv)))
        .collect()
}
