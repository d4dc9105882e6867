//! # gametree
//!
//! Two interchangeable adversarial-search engines for two-player,
//! perfect-information, zero-sum games:
//!
//! - [`MctsEngine`]: Monte-Carlo Tree Search with UCB1 selection
//! - [`MinimaxEngine`]: depth-limited minimax with alpha-beta pruning
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Engines are generic over the [`GameState`] trait
//!    family. No game rule is hardcoded; the same tree and search code
//!    drives a counting game and an 8x8 capture game unchanged.
//!
//! 2. **Deterministic**: All randomness flows through a seeded
//!    [`SearchRng`]. Same seed, same search.
//!
//! 3. **Arena Trees**: Nodes live in a flat `Vec` addressed by [`NodeId`],
//!    with non-owning parent indices for backpropagation. Advancing the
//!    root compacts the arena so discarded branches are released.
//!
//! ## Modules
//!
//! - `core`: players, node ids, results, RNG, errors
//! - `game`: the `GameState` / `MctsGame` / `MinimaxGame` traits
//! - `mcts`: MCTS engine, tree, config, stats, parallel root search
//! - `minimax`: alpha-beta engine and tree
//! - `games`: example games (nim, tic-tac-toe, othello)

pub mod core;
pub mod game;
pub mod games;
pub mod mcts;
pub mod minimax;

// Re-export commonly used types
pub use crate::core::{
    Depth, NodeId, Player, SearchError, SearchResult, SearchRng, SearchTree, TreeNode,
};

pub use crate::game::{GameState, MctsGame, MinimaxGame, Outcome};

pub use crate::mcts::{MctsConfig, MctsEngine, MctsNode, MctsTree, SearchStats};

pub use crate::minimax::{MinimaxEngine, MinimaxNode, MinimaxTree};
