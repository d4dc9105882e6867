//! MCTS tree node.
//!
//! Each node owns the state reached by one move from its parent plus the
//! visit statistics UCB1 selection needs. Nodes are arena-allocated and
//! refer to each other by [`NodeId`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{NodeId, TreeNode};
use crate::game::GameState;

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G: Serialize, G::Move: Serialize",
    deserialize = "G: Deserialize<'de>, G::Move: Deserialize<'de>"
))]
pub struct MctsNode<G: GameState> {
    /// Parent node index (NONE for the root). Non-owning: used only for
    /// the backpropagation walk-up, never for destruction.
    pub parent: NodeId,

    /// Move that produced this node (`None` at a fresh root).
    pub mv: Option<G::Move>,

    /// Game state at this node. Owned exclusively; never aliased between
    /// nodes.
    pub state: G,

    /// Accumulated reward sum. Fractional rewards are allowed (draws).
    pub wins: f64,

    /// Visit count.
    pub plays: u32,

    /// Children, at most one per legal move.
    /// SmallVec optimizes for typical branching factor < 8.
    pub children: SmallVec<[NodeId; 8]>,

    /// Number of legal moves from `state`, captured at creation. A node is
    /// a leaf while `children.len() < legal_count`.
    legal_count: usize,

    // Cached UCB1 score. `ucb_parent_plays` records the parent visit count
    // the score was computed with; ln(parent plays) changes on every trial
    // through the parent, so the flag alone is not enough.
    ucb: f64,
    ucb_parent_plays: u32,
    ucb_dirty: bool,
}

impl<G: GameState> MctsNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G) -> Self {
        let legal_count = state.legal_moves().len();
        Self {
            parent: NodeId::NONE,
            mv: None,
            state,
            wins: 0.0,
            plays: 0,
            children: SmallVec::new(),
            legal_count,
            ucb: 0.0,
            ucb_parent_plays: 0,
            ucb_dirty: true,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: G::Move, state: G) -> Self {
        let legal_count = state.legal_moves().len();
        Self {
            parent,
            mv: Some(mv),
            state,
            wins: 0.0,
            plays: 0,
            children: SmallVec::new(),
            legal_count,
            ucb: 0.0,
            ucb_parent_plays: 0,
            ucb_dirty: true,
        }
    }

    /// Check if this node still has untried moves.
    ///
    /// A leaf in the MCTS sense: fewer children than legal moves. Terminal
    /// nodes (zero legal moves) are never leaves.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.len() < self.legal_count
    }

    /// Number of legal moves from this node's state.
    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.legal_count
    }

    /// Exploitation win ratio `wins / plays`. Returns 0.0 if never visited.
    #[inline]
    #[must_use]
    pub fn win_ratio(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            self.wins / f64::from(self.plays)
        }
    }

    /// UCB1 score against `parent_plays` visits of the parent:
    /// `wins/plays + c * sqrt(ln(parent_plays) / plays)`.
    ///
    /// An unvisited node scores `f64::INFINITY` so it is always preferred
    /// over visited siblings; the score is not meaningful (or cached)
    /// until the first backpropagation.
    ///
    /// The cached score is recomputed when the node's own statistics
    /// changed or when `parent_plays` differs from the cached snapshot, so
    /// a read is never stale relative to the latest `wins`/`plays`.
    #[inline]
    pub fn ucb(&mut self, parent_plays: u32, c: f64) -> f64 {
        if self.plays == 0 {
            return f64::INFINITY;
        }
        if self.ucb_dirty || self.ucb_parent_plays != parent_plays {
            let plays = f64::from(self.plays);
            let exploit = self.wins / plays;
            let explore = c * (f64::from(parent_plays).ln() / plays).sqrt();
            self.ucb = exploit + explore;
            self.ucb_parent_plays = parent_plays;
            self.ucb_dirty = false;
        }
        self.ucb
    }

    /// Record one backpropagated trial.
    #[inline]
    pub fn record(&mut self, reward: f64) {
        self.wins += reward;
        self.plays += 1;
        self.ucb_dirty = true;
    }
}

impl<G: GameState> TreeNode for MctsNode<G> {
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
