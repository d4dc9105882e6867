//! Counting game: take 1-3 from a pile, whoever takes the last one wins.

use serde::{Deserialize, Serialize};

use crate::core::{Depth, Player, SearchError};
use crate::game::{GameState, MctsGame, MinimaxGame, Outcome};

/// The most that can be taken in one move.
const MAX_TAKE: u32 = 3;

/// Nim position: a single pile and the side whose move produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nim {
    remaining: u32,
    last_mover: Player,
}

impl Nim {
    /// A pile of `remaining` with `to_move` about to take.
    #[must_use]
    pub fn new(remaining: u32, to_move: Player) -> Self {
        Self {
            remaining,
            last_mover: to_move.other(),
        }
    }

    /// What is left in the pile.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn value_for(winner: Player) -> f64 {
        if winner.is_ai() {
            1.0
        } else {
            -1.0
        }
    }
}

impl GameState for Nim {
    type Move = u32;

    fn legal_moves(&self) -> Vec<u32> {
        (1..=MAX_TAKE.min(self.remaining)).collect()
    }

    fn apply(&mut self, mv: u32) -> Result<(), SearchError> {
        if mv == 0 || mv > MAX_TAKE.min(self.remaining) {
            return Err(SearchError::illegal_move(&mv));
        }
        self.remaining -= mv;
        self.last_mover = self.last_mover.other();
        Ok(())
    }

    fn last_mover(&self) -> Player {
        self.last_mover
    }
}

impl MctsGame for Nim {
    fn outcome(&self) -> Option<Outcome> {
        (self.remaining == 0).then_some(Outcome::Win(self.last_mover))
    }
}

impl MinimaxGame for Nim {
    fn terminal_value(&self, depth: Depth, max_depth: Depth) -> Option<f64> {
        if self.remaining == 0 {
            return Some(Self::value_for(self.last_mover));
        }
        if depth >= max_depth {
            // Parity heuristic: the side facing a multiple of four loses
            // under optimal play, and that side is the one to move now.
            let winner = if self.remaining % 4 == 0 {
                self.last_mover
            } else {
                self.last_mover.other()
            };
            return Some(Self::value_for(winner));
        }
        None
    }
}
