//! Core search types: players, node ids, results, RNG, errors.
//!
//! This module contains the fundamental building blocks shared by both
//! engines. Everything here is game-agnostic.

pub mod error;
pub mod player;
pub mod rng;
pub mod tree;

pub use error::SearchError;
pub use player::Player;
pub use rng::SearchRng;
pub use tree::{SearchTree, TreeNode};

use serde::{Deserialize, Serialize};

/// Search depth in plies.
pub type Depth = u8;

/// Index into a search-tree node arena. Using a newtype for type safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is a real node index.
    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Outcome of one `play` call: the chosen move plus the scalar the engine
/// optimized for it.
///
/// For MCTS `value` is the exploitation win ratio of the chosen child
/// (`wins / plays`); for minimax it is the memoized reward under optimal
/// play to the depth budget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<M> {
    /// The move the engine committed to.
    pub best_move: M,

    /// Win ratio (MCTS) or minimax reward (minimax) of that move.
    pub value: f64,
}
