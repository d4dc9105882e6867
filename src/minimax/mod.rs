//! Depth-limited minimax with alpha-beta pruning.
//!
//! ## Overview
//!
//! An exhaustive recursive search to a fixed depth budget. Nodes memoize
//! their minimax `reward` and resolved `best_child`, so a root rebased
//! onto a previously-searched subtree answers without recomputation.
//! Alpha-beta bounds travel down the recursion as per-call copies;
//! siblings cut off by `beta <= alpha` are never even generated.
//!
//! ## Usage
//!
//! ```rust
//! use gametree::games::nim::Nim;
//! use gametree::minimax::MinimaxEngine;
//! use gametree::Player;
//!
//! let game = Nim::new(7, Player::Ai);
//! let mut engine = MinimaxEngine::new(6);
//!
//! let result = engine.play(&game, None).unwrap();
//! println!("take {} | reward {} under optimal play", result.best_move, result.value);
//! ```

pub mod node;
pub mod search;

// Re-export main types
pub use node::MinimaxNode;
pub use search::{MinimaxEngine, MinimaxStats};

/// Minimax view of the shared arena tree.
pub type MinimaxTree<G> = crate::core::SearchTree<MinimaxNode<G>>;
