//! Example games implementing the engine traits.
//!
//! These are collaborators, not part of the search core: each one shows
//! how a game plugs its rules into [`crate::game::GameState`] and the
//! engine-specific capability traits, and they back the integration
//! tests.

pub mod nim;
pub mod othello;
pub mod tictactoe;

pub use nim::Nim;
pub use othello::{Othello, OthelloMove};
pub use tictactoe::TicTacToe;
