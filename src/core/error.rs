//! Errors surfaced by the search engines.
//!
//! Dead positions reached mid-search are not errors: both engines handle
//! them locally (MCTS backpropagates the terminal-equivalent outcome,
//! minimax falls back to static evaluation). Everything else propagates;
//! a swallowed failure inside the search loop would corrupt statistics
//! invisibly.

use thiserror::Error;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A move outside the current legal-move set was requested.
    /// Games fail fast in `apply`; nothing is silently corrected.
    #[error("illegal move {0} for the current position")]
    IllegalMove(String),

    /// `play` was called on a position with no legal moves (finished game).
    #[error("no legal moves available at the root")]
    NoLegalMoves,

    /// A best-child accessor was queried before any search iteration ran.
    /// This is a programmer-contract violation, not a recoverable state.
    #[error("root has no resolved best child; run a search first")]
    UnresolvedRoot,
}

impl SearchError {
    /// Build an [`SearchError::IllegalMove`] from any debuggable move value.
    pub fn illegal_move<M: std::fmt::Debug>(mv: &M) -> Self {
        Self::IllegalMove(format!("{mv:?}"))
    }
}
