//! Distance-to-goal estimate for the best-first search.

use crate::cube::{CubeState, FACE_SIZE};

/// Misplaced-sticker heuristic: stickers whose label differs from the solved
/// state, divided by a fixed normalizing constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MisplacedStickers {
    divisor: u32,
}

impl MisplacedStickers {
    /// The default weighting
    pub const DEFAULT_DIVISOR: u32 = 8;

    /// A quarter turn relocates 20 stickers, so it can repair at most 20.
    pub const STRICT: MisplacedStickers = MisplacedStickers { divisor: 20 };

    /// A divisor of zero is treated as one.
    pub fn with_divisor(divisor: u32) -> Self {
        Self {
            divisor: divisor.max(1),
        }
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Estimated remaining moves
    pub fn estimate(&self, state: &CubeState) -> f64 {
        misplaced_stickers(state) as f64 / self.divisor as f64
    }

    /// `f = g + h` scaled by the divisor, so it stays an exact integer
    pub fn scaled_cost(&self, depth: usize, state: &CubeState) -> u64 {
        depth as u64 * self.divisor as u64 + misplaced_stickers(state) as u64
    }
}

impl Default for MisplacedStickers {
    fn default() -> Self {
        Self {
            divisor: Self::DEFAULT_DIVISOR,
        }
    }
}

/// Number of stickers not showing the label of their face in the solved state
pub fn misplaced_stickers(state: &CubeState) -> u32 {
    state
        .stickers()
        .iter()
        .enumerate()
        .filter(|&(i, &label)| label as usize != i / FACE_SIZE)
        .count() as u32
}
