//! Monte-Carlo Tree Search with UCB1 selection.
//!
//! ## Overview
//!
//! Each trial runs four phases:
//!
//! 1. **Select**: walk from the root while the current node is fully
//!    expanded, descending into the child with the highest UCB1 score
//! 2. **Expand**: materialize one untried move as a new child
//! 3. **Simulate**: play uniformly-random moves from the new child until
//!    the game ends
//! 4. **Backpropagate**: fold the outcome into `wins`/`plays` on the path
//!    back to the root, perspective-adjusted per node
//!
//! After the trial budget is spent, the child of the root with the best
//! exploitation win ratio (not UCB) is returned.
//!
//! ## Usage
//!
//! ```rust
//! use gametree::games::nim::Nim;
//! use gametree::mcts::{MctsConfig, MctsEngine};
//! use gametree::Player;
//!
//! let game = Nim::new(11, Player::Ai);
//! let config = MctsConfig::default().with_trials(500).with_seed(7);
//! let mut engine = MctsEngine::new(config);
//!
//! let result = engine.play(&game, None).unwrap();
//! println!("take {} | {:.1}% confidence", result.best_move, result.value * 100.0);
//! ```
//!
//! Between moves the driver advances the root with [`MctsEngine::advance`]
//! (its own committed move) and the `opponent_move` argument of
//! [`MctsEngine::play`] (the reply), both of which preserve the surviving
//! subtree's statistics and release everything else.

pub mod config;
pub mod node;
pub mod parallel;
pub mod search;
pub mod stats;

// Re-export main types
pub use config::MctsConfig;
pub use node::MctsNode;
pub use parallel::parallel_search;
pub use search::MctsEngine;
pub use stats::SearchStats;

/// MCTS view of the shared arena tree.
pub type MctsTree<G> = crate::core::SearchTree<MctsNode<G>>;
