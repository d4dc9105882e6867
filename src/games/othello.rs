//! 8x8 board-capture game (Othello rules, no opening variations).
//!
//! White is always the AI side. A side with no placement available must
//! pass; when neither side can place, the game is scored by piece count.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Depth, Player, SearchError};
use crate::game::{GameState, MinimaxGame};

const SIZE: i8 = 8;
const MID: i8 = SIZE / 2;
const SQUARES: usize = (SIZE as usize) * (SIZE as usize);

/// Reward magnitude for a decided game.
const WIN_VALUE: f64 = 999.0;

const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// A move: place a disc on a square (row-major index) or pass.
///
/// Passing is only legal when no placement is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OthelloMove {
    /// Place a disc on square `0..64`.
    Place(u8),
    /// No placement available; the turn flips.
    Pass,
}

impl std::fmt::Display for OthelloMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OthelloMove::Place(square) => write!(f, "{}{}", (b'a' + square % 8) as char, square / 8 + 1),
            OthelloMove::Pass => write!(f, "pass"),
        }
    }
}

/// Othello position.
///
/// White discs belong to [`Player::Ai`], black to [`Player::Opponent`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Othello {
    board: [[i8; SIZE as usize]; SIZE as usize],
    white: FxHashSet<(i8, i8)>,
    black: FxHashSet<(i8, i8)>,
    to_move: Player,
}

impl Othello {
    /// The standard four-disc starting position with `to_move` to act.
    #[must_use]
    pub fn new(to_move: Player) -> Self {
        let mut board = [[0i8; SIZE as usize]; SIZE as usize];
        let mut white = FxHashSet::default();
        let mut black = FxHashSet::default();

        for (y, x, disc) in [
            (MID - 1, MID - 1, 1),
            (MID, MID, 1),
            (MID - 1, MID, -1),
            (MID, MID - 1, -1),
        ] {
            board[y as usize][x as usize] = disc;
            if disc == 1 {
                white.insert((y, x));
            } else {
                black.insert((y, x));
            }
        }

        Self {
            board,
            white,
            black,
            to_move,
        }
    }

    /// Disc on `(y, x)`: 1 white, -1 black, 0 empty.
    #[must_use]
    pub fn disc(&self, y: usize, x: usize) -> i8 {
        self.board[y][x]
    }

    /// Disc counts as `(white, black)`.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.white.len(), self.black.len())
    }

    fn sign(side: Player) -> i8 {
        if side.is_ai() {
            1
        } else {
            -1
        }
    }

    fn sets(&self, side: Player) -> (&FxHashSet<(i8, i8)>, &FxHashSet<(i8, i8)>) {
        match side {
            Player::Ai => (&self.white, &self.black),
            Player::Opponent => (&self.black, &self.white),
        }
    }

    fn in_bounds(y: i8, x: i8) -> bool {
        (0..SIZE).contains(&y) && (0..SIZE).contains(&x)
    }

    /// True if placing for `side` at `(y, x)` flips at least one disc
    /// along `(dy, dx)`.
    fn captures(&self, side: Player, y: i8, x: i8, dy: i8, dx: i8) -> bool {
        let (mine, theirs) = self.sets(side);
        let (mut y, mut x) = (y + dy, x + dx);
        let mut crossed = false;

        while Self::in_bounds(y, x) && theirs.contains(&(y, x)) {
            crossed = true;
            y += dy;
            x += dx;
        }
        crossed && Self::in_bounds(y, x) && mine.contains(&(y, x))
    }

    /// All capturing placements for `side`, in row-major order.
    fn placements(&self, side: Player) -> Vec<(i8, i8)> {
        let mut moves = Vec::new();
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.board[y as usize][x as usize] != 0 {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&(dy, dx)| self.captures(side, y, x, dy, dx))
                {
                    moves.push((y, x));
                }
            }
        }
        moves
    }

    fn place(&mut self, y: i8, x: i8) {
        let side = self.to_move;
        let flips: Vec<(i8, i8)> = DIRECTIONS
            .iter()
            .filter(|&&(dy, dx)| self.captures(side, y, x, dy, dx))
            .copied()
            .collect();

        let disc = Self::sign(side);
        self.board[y as usize][x as usize] = disc;
        match side {
            Player::Ai => self.white.insert((y, x)),
            Player::Opponent => self.black.insert((y, x)),
        };

        for (dy, dx) in flips {
            let (mut fy, mut fx) = (y + dy, x + dx);
            while self.board[fy as usize][fx as usize] == -disc {
                self.board[fy as usize][fx as usize] = disc;
                if side.is_ai() {
                    self.black.remove(&(fy, fx));
                    self.white.insert((fy, fx));
                } else {
                    self.white.remove(&(fy, fx));
                    self.black.insert((fy, fx));
                }
                fy += dy;
                fx += dx;
            }
        }
    }

    /// Positional weight of a coordinate: edges and corners count up,
    /// center squares count down, doubling outward.
    fn ring_weight(v: i8) -> f64 {
        let ring = if v < MID { MID - v } else { v - MID + 1 };
        let magnitude = f64::from(2i32.pow(ring as u32));
        if ring % 2 == 0 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Static evaluation from White's (the AI's) perspective: positional
    /// disc weights plus a mobility bonus.
    fn evaluate(&self) -> f64 {
        let accum = |set: &FxHashSet<(i8, i8)>| -> f64 {
            set.iter()
                .map(|&(y, x)| Self::ring_weight(y) + Self::ring_weight(x))
                .sum()
        };

        let positional = (accum(&self.white) - accum(&self.black)) / SQUARES as f64;
        let mobility = self.placements(Player::Ai).len() as f64
            - self.placements(Player::Opponent).len() as f64;
        positional + 0.25 * mobility
    }
}

impl GameState for Othello {
    type Move = OthelloMove;

    fn legal_moves(&self) -> Vec<OthelloMove> {
        let placements = self.placements(self.to_move);
        if placements.is_empty() {
            return vec![OthelloMove::Pass];
        }
        placements
            .into_iter()
            .map(|(y, x)| OthelloMove::Place((y * SIZE + x) as u8))
            .collect()
    }

    fn apply(&mut self, mv: OthelloMove) -> Result<(), SearchError> {
        match mv {
            OthelloMove::Place(square) => {
                let (y, x) = ((square / 8) as i8, (square % 8) as i8);
                let legal = square < SQUARES as u8
                    && self.board[y as usize][x as usize] == 0
                    && DIRECTIONS
                        .iter()
                        .any(|&(dy, dx)| self.captures(self.to_move, y, x, dy, dx));
                if !legal {
                    return Err(SearchError::illegal_move(&mv));
                }
                self.place(y, x);
            }
            OthelloMove::Pass => {
                if !self.placements(self.to_move).is_empty() {
                    return Err(SearchError::illegal_move(&mv));
                }
            }
        }
        self.to_move = self.to_move.other();
        Ok(())
    }

    fn last_mover(&self) -> Player {
        self.to_move.other()
    }
}

impl MinimaxGame for Othello {
    fn terminal_value(&self, depth: Depth, max_depth: Depth) -> Option<f64> {
        let (whites, blacks) = self.counts();

        if blacks == 0 {
            return Some(WIN_VALUE);
        }
        if whites == 0 {
            return Some(-WIN_VALUE);
        }

        let stuck = self.placements(Player::Ai).is_empty()
            && self.placements(Player::Opponent).is_empty();
        if whites + blacks == SQUARES || stuck {
            let margin = match whites.cmp(&blacks) {
                std::cmp::Ordering::Greater => 1.0,
                std::cmp::Ordering::Less => -1.0,
                std::cmp::Ordering::Equal => 0.0,
            };
            return Some(WIN_VALUE * margin);
        }

        (depth >= max_depth).then(|| self.evaluate())
    }
}
