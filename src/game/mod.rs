//! Game trait family for engine/game decoupling.
//!
//! Games implement these traits to define their rules:
//! - What moves are legal
//! - How a move transforms the state
//! - When the game is over and who is favored

pub mod state;

pub use state::{GameState, MctsGame, MinimaxGame, Outcome};
