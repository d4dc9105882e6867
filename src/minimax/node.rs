//! Minimax tree node.
//!
//! Same arena shape as the MCTS node, but the statistics are a memoized
//! minimax value and the resolved best child instead of visit counters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{NodeId, TreeNode};
use crate::game::GameState;

/// A node in the minimax tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G: Serialize, G::Move: Serialize",
    deserialize = "G: Deserialize<'de>, G::Move: Deserialize<'de>"
))]
pub struct MinimaxNode<G: GameState> {
    /// Parent node index (NONE for the root). Non-owning.
    pub parent: NodeId,

    /// Move that produced this node (`None` at a fresh root).
    pub mv: Option<G::Move>,

    /// Game state at this node. Owned exclusively.
    pub state: G,

    /// Memoized minimax value; `None` until computed.
    pub reward: Option<f64>,

    /// Child realizing `reward`; NONE until resolved.
    pub best_child: NodeId,

    /// Explored children, one per generated move. Moves pruned by
    /// alpha-beta never appear here.
    pub children: SmallVec<[NodeId; 8]>,
}

impl<G: GameState> MinimaxNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            state,
            reward: None,
            best_child: NodeId::NONE,
            children: SmallVec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: G::Move, state: G) -> Self {
        Self {
            parent,
            mv: Some(mv),
            state,
            reward: None,
            best_child: NodeId::NONE,
            children: SmallVec::new(),
        }
    }

    /// Check if a search has resolved this node's best child.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.best_child.is_some()
    }
}

impl<G: GameState> TreeNode for MinimaxNode<G> {
    type Move = G::Move;

    fn parent(&self) -> NodeId {
        self.parent
    }

    fn set_parent(&mut self, parent: NodeId) {
        self.parent = parent;
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut SmallVec<[NodeId; 8]> {
        &mut self.children
    }

    fn move_value(&self) -> Option<G::Move> {
        self.mv
    }
}
