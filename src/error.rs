//! Error types for the cube solver.

use thiserror::Error;

/// Result type alias for cube solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing moves or searching for a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unrecognized move token.
    #[error("Invalid move: {0:?}")]
    InvalidMove(String),

    /// Sticker data that does not describe a 54-sticker, 6-label cube.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Frontier emptied without reaching the solved state.
    #[error("Search exhausted after {elapsed_ms}ms ({nodes_expanded} nodes expanded)")]
    SearchExhausted { elapsed_ms: u64, nodes_expanded: usize },

    /// Deadline reached before the search succeeded or ran dry.
    #[error("Search timed out after {elapsed_ms}ms ({nodes_expanded} nodes expanded)")]
    SearchTimedOut { elapsed_ms: u64, nodes_expanded: usize },
}

impl Error {
    /// True for the two search failures, which callers report as "no solution found".
    pub fn is_no_solution(&self) -> bool {
        matches!(
            self,
            Error::SearchExhausted { .. } | Error::SearchTimedOut { .. }
        )
    }

    /// Short machine-readable reason, used in the CLI report.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidMove(_) => "invalid_move",
            Error::InvalidState(_) => "invalid_state",
            Error::SearchExhausted { .. } => "search_exhausted",
            Error::SearchTimedOut { .. } => "search_timed_out",
        }
    }
}
