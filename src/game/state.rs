//! Game state traits consumed by the engines.
//!
//! The two engines need different terminal signatures: MCTS asks a state
//! directly for its outcome, while minimax asks relative to a depth budget
//! and may get a heuristic score back. The capabilities are split:
//! [`GameState`] is the shared transition surface, [`MctsGame`] and
//! [`MinimaxGame`] layer the engine-specific terminal tests on top.
//! Engines are generic over these traits and never branch on game type.

use serde::{Deserialize, Serialize};

use crate::core::{Depth, Player, SearchError};

/// Result of a finished game, from the board's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One side has won.
    Win(Player),
    /// Neither side has won.
    Draw,
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_win_for(self, player: Player) -> bool {
        matches!(self, Outcome::Win(p) if p == player)
    }
}

/// Shared transition surface for two-player, perfect-information games.
///
/// ## Contract
///
/// - `legal_moves` is non-empty unless the game is over; the returned
///   order is fixed for a given state (it is the engines' documented
///   tie-break order).
/// - `apply` mutates in place, flips the mover, and must reject any move
///   not currently legal; it never silently corrects one.
/// - States are never shared between tree nodes: every transition goes
///   through a fresh clone ([`GameState::child`]).
pub trait GameState: Clone {
    /// A single move in this game.
    type Move: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Moves playable from this state, in a deterministic order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` on this state, flipping the mover.
    ///
    /// Fails with [`SearchError::IllegalMove`] if `mv` is not legal here.
    fn apply(&mut self, mv: Self::Move) -> Result<(), SearchError>;

    /// The side whose move produced this state.
    ///
    /// A fresh game reports the side that will *not* move first, so the
    /// first `apply` flips it to the actual first mover.
    fn last_mover(&self) -> Player;

    /// The state reached by playing `mv`, as an independent copy.
    fn child(&self, mv: Self::Move) -> Result<Self, SearchError> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }
}

/// Capability required by the MCTS engine.
pub trait MctsGame: GameState {
    /// Terminal test: `Some(outcome)` once the game is decided, `None`
    /// while it continues.
    fn outcome(&self) -> Option<Outcome>;

    /// Convert a playout outcome into this node's reward.
    ///
    /// Perspective-dependent: the same outcome scores differently at
    /// nodes produced by different movers. The default gives 1.0 when
    /// this node's mover won, 0.0 when it lost, 0.5 on a draw. Games may
    /// override to scale rewards, as long as larger stays better for the
    /// node's own mover.
    fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Win(winner) if winner == self.last_mover() => 1.0,
            Outcome::Win(_) => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

/// Capability required by the minimax engine.
pub trait MinimaxGame: GameState {
    /// Depth-relative terminal test.
    ///
    /// Returns `Some(value)` when the game is over by its own rules
    /// (regardless of depth), or a heuristic static evaluation once
    /// `depth >= max_depth`. Values are on one absolute scale: positive
    /// favors [`Player::Ai`].
    ///
    /// ## Contract
    ///
    /// `depth >= max_depth` must always produce `Some`; the engine relies
    /// on this to score dead positions.
    fn terminal_value(&self, depth: Depth, max_depth: Depth) -> Option<f64>;
}
