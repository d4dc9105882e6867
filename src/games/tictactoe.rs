//! 3x3 grid game. X always moves first.

use serde::{Deserialize, Serialize};

use crate::core::{Player, SearchError};
use crate::game::{GameState, MctsGame, Outcome};

const LENGTH: usize = 3;
const CELLS: usize = LENGTH * LENGTH;

/// X mark. X moves first.
const X: i8 = -1;
/// O mark.
const O: i8 = 1;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe board.
///
/// Cells are indexed row-major 0..9; a move is the index of an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    cells: [i8; CELLS],
    to_move: Player,
    to_move_sign: i8,
}

impl TicTacToe {
    /// An empty board where `x_player` plays the X marks (and moves
    /// first).
    #[must_use]
    pub fn new(x_player: Player) -> Self {
        Self {
            cells: [0; CELLS],
            to_move: x_player,
            to_move_sign: X,
        }
    }

    /// The mark in `cell`: -1 for X, 1 for O, 0 for empty.
    #[must_use]
    pub fn cell(&self, cell: usize) -> i8 {
        self.cells[cell]
    }

    fn winning_sign(&self) -> Option<i8> {
        LINES.iter().find_map(|line| {
            let sign = self.cells[line[0]];
            (sign != 0 && line.iter().all(|&c| self.cells[c] == sign)).then_some(sign)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }
}

impl GameState for TicTacToe {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.winning_sign().is_some() {
            return Vec::new();
        }
        (0..CELLS as u8)
            .filter(|&c| self.cells[c as usize] == 0)
            .collect()
    }

    fn apply(&mut self, mv: u8) -> Result<(), SearchError> {
        let cell = mv as usize;
        if cell >= CELLS || self.cells[cell] != 0 || self.winning_sign().is_some() {
            return Err(SearchError::illegal_move(&mv));
        }
        self.cells[cell] = self.to_move_sign;
        self.to_move = self.to_move.other();
        self.to_move_sign = -self.to_move_sign;
        Ok(())
    }

    fn last_mover(&self) -> Player {
        self.to_move.other()
    }
}

impl MctsGame for TicTacToe {
    fn outcome(&self) -> Option<Outcome> {
        if let Some(sign) = self.winning_sign() {
            // The sign that completed a line belongs to whichever side
            // currently holds it.
            let winner = if sign == self.to_move_sign {
                self.to_move
            } else {
                self.to_move.other()
            };
            return Some(Outcome::Win(winner));
        }
        self.is_full().then_some(Outcome::Draw)
    }
}
