//! Core MCTS search loop.
//!
//! Implements the four-phase trial (select, expand, simulate,
//! backpropagate) over the arena tree, plus the root-reuse surface the
//! driver advances between moves.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{NodeId, SearchError, SearchResult, SearchRng, SearchTree};
use crate::game::{GameState, MctsGame, Outcome};

use super::config::MctsConfig;
use super::node::MctsNode;
use super::stats::SearchStats;
use super::MctsTree;

/// Monte-Carlo Tree Search engine.
///
/// Owns its tree exclusively; a `play` call runs the full trial budget to
/// completion with no suspension points.
pub struct MctsEngine<G: MctsGame> {
    config: MctsConfig,
    tree: Option<MctsTree<G>>,
    rng: SearchRng,
    stats: SearchStats,
}

impl<G: MctsGame> MctsEngine<G> {
    /// Create a new engine with the given configuration.
    pub fn new(config: MctsConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        Self {
            config,
            tree: None,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Search for the best move from `state`.
    ///
    /// If `opponent_move` is given and the current root has children, the
    /// root is rebased onto the matching child, preserving its accumulated
    /// statistics; otherwise the search starts from a fresh root built
    /// from `state`. With `opponent_move == None` an existing tree is kept
    /// as-is, so a pretrained root keeps its statistics.
    ///
    /// Runs the configured trial budget, then returns the root child with
    /// the highest exploitation win ratio (`wins/plays`, not UCB) together
    /// with that ratio as a confidence signal.
    pub fn play(
        &mut self,
        state: &G,
        opponent_move: Option<G::Move>,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        let start = Instant::now();
        self.stats.reset();
        self.prepare_root(state, opponent_move);

        let mut tree = self.tree.take().ok_or(SearchError::UnresolvedRoot)?;
        if tree.root_node().legal_count() == 0 {
            self.tree = Some(tree);
            return Err(SearchError::NoLegalMoves);
        }

        let mut failed = Ok(());
        for _ in 0..self.config.trials {
            if let Err(err) = Self::trial(&mut tree, &mut self.rng, &mut self.stats, &self.config)
            {
                failed = Err(err);
                break;
            }
            self.stats.trials += 1;
        }
        self.stats.time_us = start.elapsed().as_micros() as u64;
        self.tree = Some(tree);
        failed?;

        let result = self.best_by_ratio()?;
        debug!(
            best_move = ?result.best_move,
            win_ratio = result.value,
            trials = self.stats.trials,
            "MCTS search complete"
        );
        Ok(result)
    }

    /// Advance the root to the child produced by `mv` (the engine's own
    /// committed move), keeping that subtree's statistics and releasing
    /// every sibling branch. Returns true if the subtree was reused; on a
    /// miss the tree is discarded and the next `play` builds a fresh root.
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

    /// Win ratio of every explored root child, in child-creation order.
    ///
    /// This is the per-move summary the parallel driver merges.
    #[must_use]
    pub fn root_ratios(&self) -> Vec<(G::Move, f64)> {
        match &self.tree {
            Some(tree) => tree
                .root_node()
                .children
                .iter()
                .map(|&c| {
                    let node = tree.get(c);
                    (node.mv.expect("non-root node has a move"), node.win_ratio())
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get the search tree, if any search has run.
    #[must_use]
    pub fn tree(&self) -> Option<&MctsTree<G>> {
        self.tree.as_ref()
    }

    /// Get statistics for the most recent `play`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MctsConfig {
        &self.config
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
            self.tree = Some(SearchTree::with_root(MctsNode::new_root(state.clone())));
        } else if self.tree.is_none() {
            self.tree = Some(SearchTree::with_root(MctsNode::new_root(state.clone())));
        }
    }

    /// One select/expand/simulate/backpropagate cycle.
    fn trial(
        tree: &mut MctsTree<G>,
        rng: &mut SearchRng,
        stats: &mut SearchStats,
        config: &MctsConfig,
    ) -> Result<(), SearchError> {
        if let Some(leaf) = Self::select(tree, stats, config) {
            let child = Self::expand(tree, rng, stats, leaf)?;
            let outcome = Self::simulate(tree, rng, stats, child)?;
            Self::backprop(tree, child, outcome);
        }
        Ok(())
    }

    /// Walk from the root to a node with untried moves.
    ///
    /// While the current node is fully expanded, descend into the child
    /// with the highest UCB1 score (first strictly-greater score wins, so
    /// traversal order is deterministic per instance). Returns `None` when
    /// the trial was resolved during the walk: either the selected child
    /// is terminal (its outcome is backpropagated directly) or the current
    /// node is a dead position.
    fn select(
        tree: &mut MctsTree<G>,
        stats: &mut SearchStats,
        config: &MctsConfig,
    ) -> Option<NodeId> {
        let c = config.exploration_constant;
        let mut current = tree.root();

        loop {
            if tree.get(current).is_leaf() {
                return Some(current);
            }

            let children: SmallVec<[NodeId; 8]> = tree.get(current).children.clone();

            if children.is_empty() {
                // Fully expanded with no children: zero legal moves. Treat
                // as terminal, scoring a missing outcome as a draw.
                let outcome = tree
                    .get(current)
                    .state
                    .outcome()
                    .unwrap_or(Outcome::Draw);
                Self::backprop(tree, current, outcome);
                if current == tree.root() {
                    stats.absorbed += 1;
                } else {
                    stats.terminal_hits += 1;
                }
                return None;
            }

            let parent_plays = tree.get(current).plays;
            let mut best: Option<(NodeId, f64)> = None;
            for child in children {
                let score = tree.get_mut(child).ucb(parent_plays, c);
                match best {
                    Some((_, top)) if score <= top => {}
                    _ => best = Some((child, score)),
                }
            }
            let (next, _) = best.expect("fully expanded node has children");

            if let Some(outcome) = tree.get(next).state.outcome() {
                Self::backprop(tree, next, outcome);
                stats.terminal_hits += 1;
                return None;
            }
            current = next;
        }
    }

    /// Materialize one untried move of `leaf`, chosen uniformly at random.
    fn expand(
        tree: &mut MctsTree<G>,
        rng: &mut SearchRng,
        stats: &mut SearchStats,
        leaf: NodeId,
    ) -> Result<NodeId, SearchError> {
        let node = tree.get(leaf);
        let tried: SmallVec<[G::Move; 8]> = node
            .children
            .iter()
            .map(|&c| tree.get(c).mv.expect("non-root node has a move"))
            .collect();

        let mut untried = node.state.legal_moves();
        untried.retain(|m| !tried.contains(m));
        let &mv = rng.choose(&untried).expect("leaf node has an untried move");

        let state = tree.get(leaf).state.child(mv)?;
        let child = tree.attach(leaf, MctsNode::new_child(leaf, mv, state));
        stats.expansions += 1;
        Ok(child)
    }

    /// Play uniformly-random legal moves from `from` until the game ends.
    fn simulate(
        tree: &MctsTree<G>,
        rng: &mut SearchRng,
        stats: &mut SearchStats,
        from: NodeId,
    ) -> Result<Outcome, SearchError> {
        let mut state = tree.get(from).state.clone();
        stats.simulations += 1;

        loop {
            if let Some(outcome) = state.outcome() {
                trace!(?outcome, "playout finished");
                return Ok(outcome);
            }
            let moves = state.legal_moves();
            let Some(&mv) = rng.choose(&moves) else {
                // Dead position mid-playout: terminal-equivalent.
                return Ok(Outcome::Draw);
            };
            state.apply(mv)?;
        }
    }

    /// Fold `outcome` into every node from `from` up to the root.
    ///
    /// The reward is recomputed per node: it flips perspective with the
    /// node's own mover.
    fn backprop(tree: &mut MctsTree<G>, from: NodeId, outcome: Outcome) {
        let mut current = from;
        while current.is_some() {
            let node = tree.get_mut(current);
            let reward = node.state.reward(outcome);
            node.record(reward);
            current = node.parent;
        }
    }

    /// Root child with the highest win ratio (exploitation only).
    fn best_by_ratio(&self) -> Result<SearchResult<G::Move>, SearchError> {
        let tree = self.tree.as_ref().ok_or(SearchError::UnresolvedRoot)?;
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &tree.root_node().children {
            let ratio = tree.get(child).win_ratio();
            match best {
                Some((_, top)) if ratio <= top => {}
                _ => best = Some((child, ratio)),
            }
        }
        let (child, value) = best.ok_or(SearchError::UnresolvedRoot)?;
        let best_move = tree.get(child).mv.expect("non-root node has a move");
        Ok(SearchResult { best_move, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::games::nim::Nim;

    #[test]
    fn test_play_returns_a_legal_move() {
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(200));
        let game = Nim::new(10, Player::Ai);

        let result = engine.play(&game, None).unwrap();
        assert!((1..=3).contains(&result.best_move));
        assert!((0.0..=1.0).contains(&result.value));
    }

    #[test]
    fn test_play_finds_the_winning_take() {
        // From 5 the only move keeping a multiple of 4 for the opponent
        // is taking 1.
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(3000).with_seed(7));
        let game = Nim::new(5, Player::Ai);

        let result = engine.play(&game, None).unwrap();
        assert_eq!(result.best_move, 1);
    }

    #[test]
    fn test_visit_accounting() {
        let trials = 500;
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(trials));
        let game = Nim::new(12, Player::Ai);

        engine.play(&game, None).unwrap();

        let tree = engine.tree().unwrap();
        let child_plays: u32 = tree
            .root_node()
            .children
            .iter()
            .map(|&c| tree.get(c).plays)
            .sum();
        let stats = engine.stats();
        assert_eq!(stats.trials, trials);
        assert_eq!(child_plays, trials - stats.absorbed);
        assert_eq!(tree.root_node().plays, trials);
    }

    #[test]
    fn test_play_on_finished_game_is_an_error() {
        let mut engine = MctsEngine::new(MctsConfig::default());
        let game = Nim::new(0, Player::Ai);

        assert!(matches!(
            engine.play(&game, None),
            Err(SearchError::NoLegalMoves)
        ));
    }

    #[test]
    fn test_advance_keeps_statistics() {
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(300));
        let game = Nim::new(9, Player::Ai);

        let result = engine.play(&game, None).unwrap();
        let plays_before = {
            let tree = engine.tree().unwrap();
            let child = tree.find_child(tree.root(), result.best_move).unwrap();
            tree.get(child).plays
        };

        assert!(engine.advance(result.best_move));

        let tree = engine.tree().unwrap();
        assert_eq!(tree.root_node().plays, plays_before);
        assert_eq!(tree.root_node().mv, Some(result.best_move));
    }

    #[test]
    fn test_advance_miss_discards_tree() {
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(50));
        let game = Nim::new(9, Player::Ai);
        engine.play(&game, None).unwrap();

        // 0 is never a legal take, so no child can match.
        assert!(!engine.advance(0));
        assert!(engine.tree().is_none());
    }

    #[test]
    fn test_opponent_rebase_reuses_subtree() {
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(400));
        let game = Nim::new(9, Player::Ai);

        let result = engine.play(&game, None).unwrap();
        let game = game.child(result.best_move).unwrap();
        engine.advance(result.best_move);

        // Opponent takes 2; the matching grandchild subtree survives.
        let opp_state = game.child(2).unwrap();
        let reused_plays = {
            let tree = engine.tree().unwrap();
            tree.find_child(tree.root(), 2).map(|c| tree.get(c).plays)
        };

        engine.play(&opp_state, Some(2)).unwrap();
        if let Some(plays) = reused_plays {
            assert!(engine.tree().unwrap().root_node().plays >= plays);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let game = Nim::new(13, Player::Ai);
        let config = MctsConfig::default().with_trials(400).with_seed(99);

        let mut a = MctsEngine::new(config.clone());
        let mut b = MctsEngine::new(config);

        assert_eq!(
            a.play(&game, None).unwrap().best_move,
            b.play(&game, None).unwrap().best_move
        );
    }
}
