//! Alpha-beta minimax search.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Depth, NodeId, SearchError, SearchResult, SearchTree};
use crate::game::{GameState, MinimaxGame};

use super::node::MinimaxNode;
use super::MinimaxTree;

/// Counters for one minimax search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MinimaxStats {
    /// Children materialized.
    pub nodes_expanded: u32,

    /// Terminal or cutoff evaluations taken.
    pub evaluations: u32,

    /// Alpha-beta cutoffs (sibling loops stopped early).
    pub cutoffs: u32,
}

impl MinimaxStats {
    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Depth-limited minimax engine with alpha-beta pruning.
///
/// The depth budget is fixed per engine instance and should be tuned per
/// game: shallow for a large branching factor, deep for a small one.
///
/// Known caveat, by construction of any depth-bounded search: the terminal
/// test cuts off strictly at the depth budget, so a guaranteed win one ply
/// past `max_depth` is invisible to the engine.
pub struct MinimaxEngine<G: MinimaxGame> {
    max_depth: Depth,
    tree: Option<MinimaxTree<G>>,
    stats: MinimaxStats,
}

impl<G: MinimaxGame> MinimaxEngine<G> {
    /// Create a new engine searching `max_depth` plies.
    pub fn new(max_depth: Depth) -> Self {
        Self {
            max_depth,
            tree: None,
            stats: MinimaxStats::default(),
        }
    }

    /// Search for the best move from `state`.
    ///
    /// Root reuse works as in MCTS: with a matching `opponent_move` the
    /// root rebases onto the existing child, and if that child is already
    /// resolved from a previous deeper search its memoized decision is
    /// returned without recomputation. Otherwise a fresh root is built
    /// from `state` and searched with `minimax(root, 0, -inf, +inf)`.
    pub fn play(
        &mut self,
        state: &G,
        opponent_move: Option<G::Move>,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        self.prepare_root(state, opponent_move);

        if let Ok(memoized) = self.resolved_best() {
            debug!(best_move = ?memoized.best_move, "returning memoized decision");
            return Ok(memoized);
        }

        let mut tree = self.tree.take().ok_or(SearchError::UnresolvedRoot)?;
        if tree.root_node().state.legal_moves().is_empty() {
            self.tree = Some(tree);
            return Err(SearchError::NoLegalMoves);
        }

        self.stats.reset();
        let root = tree.root();
        let searched = Self::minimax(
            &mut tree,
            &mut self.stats,
            self.max_depth,
            root,
            0,
            f64::NEG_INFINITY,
            f64::INFINITY,
        );
        self.tree = Some(tree);
        let reward = searched?;

        let result = match self.resolved_best() {
            Ok(result) => result,
            // The root proved terminal by its own rules (e.g. neither side
            // can act): there is no move to choose.
            Err(SearchError::UnresolvedRoot) => return Err(SearchError::NoLegalMoves),
            Err(err) => return Err(err),
        };
        debug!(
            best_move = ?result.best_move,
            reward,
            expanded = self.stats.nodes_expanded,
            cutoffs = self.stats.cutoffs,
            "minimax search complete"
        );
        Ok(result)
    }

    /// Advance the root to the child produced by `mv`, keeping its
    /// memoized subtree and releasing every sibling branch. Returns true
    /// if the subtree was reused; on a miss the tree is discarded and the
    /// next `play` builds a fresh root.
    pub fn advance(&mut self, mv: G::Move) -> bool {
        match self.tree.as_mut() {
            Some(tree) => match tree.find_child(tree.root(), mv) {
                Some(child) => {
                    tree.rebase(child);
                    true
                }
                None => {
                    self.tree = None;
                    false
                }
            },
            None => false,
        }
    }

    /// The root's resolved decision, if any search has produced one.
    ///
    /// Fails with [`SearchError::UnresolvedRoot`] before the first search.
    pub fn resolved_best(&self) -> Result<SearchResult<G::Move>, SearchError> {
        let tree = self.tree.as_ref().ok_or(SearchError::UnresolvedRoot)?;
        let root = tree.root_node();
        if !root.is_resolved() {
            return Err(SearchError::UnresolvedRoot);
        }
        let child = tree.get(root.best_child);
        Ok(SearchResult {
            best_move: child.mv.expect("non-root node has a move"),
            value: child.reward.expect("resolved child has a reward"),
        })
    }

    /// Get the search tree, if any search has run.
    #[must_use]
    pub fn tree(&self) -> Option<&MinimaxTree<G>> {
        self.tree.as_ref()
    }

    /// Get statistics for the most recent `play`.
    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    /// The fixed depth budget.
    #[must_use]
    pub fn max_depth(&self) -> Depth {
        self.max_depth
    }

    /// Rebase onto the opponent's reply or rebuild the root from `state`.
    fn prepare_root(&mut self, state: &G, opponent_move: Option<G::Move>) {
        if let Some(mv) = opponent_move {
            if let Some(tree) = self.tree.as_mut() {
                if !tree.root_node().children.is_empty() {
                    if let Some(child) = tree.find_child(tree.root(), mv) {
                        tree.rebase(child);
                        trace!(?mv, nodes = tree.len(), "root rebased onto opponent reply");
                        return;
                    }
                }
            }
            self.tree = Some(SearchTree::with_root(MinimaxNode::new_root(state.clone())));
        } else if self.tree.is_none() {
            self.tree = Some(SearchTree::with_root(MinimaxNode::new_root(state.clone())));
        }
    }

    /// Recursive alpha-beta search.
    ///
    /// `alpha`/`beta` are per-call copies: a child's search can only
    /// influence its siblings through the cutoff decision already taken
    /// before they are visited. Maximizing exactly when the AI is to move.
    /// Ties keep the first-generated child, so the choice is deterministic
    /// in the game's `legal_moves` order.
    fn minimax(
        tree: &mut MinimaxTree<G>,
        stats: &mut MinimaxStats,
        max_depth: Depth,
        id: NodeId,
        depth: Depth,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError> {
        if let Some(value) = tree.get(id).state.terminal_value(depth, max_depth) {
            stats.evaluations += 1;
            tree.get_mut(id).reward = Some(value);
            return Ok(value);
        }

        let maximizing = !tree.get(id).state.last_mover().is_ai();
        let moves = tree.get(id).state.legal_moves();
        if moves.is_empty() {
            // Dead position short of the horizon: score with the forced
            // static evaluation.
            let value = tree
                .get(id)
                .state
                .terminal_value(max_depth, max_depth)
                .expect("terminal_value must resolve at the depth budget");
            stats.evaluations += 1;
            tree.get_mut(id).reward = Some(value);
            return Ok(value);
        }

        let mut best: Option<(NodeId, f64)> = None;
        for mv in moves {
            let child = match tree.find_child(id, mv) {
                Some(existing) => existing,
                None => {
                    let state = tree.get(id).state.child(mv)?;
                    stats.nodes_expanded += 1;
                    tree.attach(id, MinimaxNode::new_child(id, mv, state))
                }
            };

            let value = Self::minimax(tree, stats, max_depth, child, depth + 1, alpha, beta)?;

            match best {
                Some((_, top)) if (maximizing && value <= top) || (!maximizing && value >= top) => {}
                _ => best = Some((child, value)),
            }

            let top = best.map(|(_, v)| v).expect("best set above");
            if maximizing {
                alpha = alpha.max(top);
            } else {
                beta = beta.min(top);
            }
            if beta <= alpha {
                stats.cutoffs += 1;
                break;
            }
        }

        let (best_child, value) = best.expect("non-empty move list explored");
        let node = tree.get_mut(id);
        node.best_child = best_child;
        node.reward = Some(value);
        Ok(value)
    }
}
