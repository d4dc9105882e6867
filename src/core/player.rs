//! Player identity for two-player zero-sum search.
//!
//! Rewards and terminal outcomes are move-relative: a node needs to know
//! whose move produced its state to score an outcome from the right
//! perspective. `Player` is that perspective.

use serde::{Deserialize, Serialize};

/// One side of a two-player game.
///
/// The engine always searches on behalf of [`Player::Ai`]; everything it
/// plays against is [`Player::Opponent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The side the engine is choosing moves for.
    Ai,
    /// The other side.
    Opponent,
}

impl Player {
    /// The side that moves after this one.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::Ai => Player::Opponent,
            Player::Opponent => Player::Ai,
        }
    }

    /// Check if this is the engine's own side.
    #[inline]
    #[must_use]
    pub const fn is_ai(self) -> bool {
        matches!(self, Player::Ai)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Ai => write!(f, "AI"),
            Player::Opponent => write!(f, "opponent"),
        }
    }
}
