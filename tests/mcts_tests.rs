//! MCTS integration tests on the example games.

use gametree::games::nim::Nim;
use gametree::games::tictactoe::TicTacToe;
use gametree::mcts::{MctsConfig, MctsEngine, MctsTree};
use gametree::{GameState, MctsGame, Outcome, Player};

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_a_legal_move() {
    let game = Nim::new(15, Player::Ai);
    let mut engine = MctsEngine::new(MctsConfig::default().with_trials(300));

    let result = engine.play(&game, None).unwrap();

    assert!(game.legal_moves().contains(&result.best_move));
    assert!((0.0..=1.0).contains(&result.value));
}

#[test]
fn test_mcts_with_tiny_budget_still_answers() {
    let game = Nim::new(15, Player::Ai);
    let mut engine = MctsEngine::new(MctsConfig::default().with_trials(3));

    let result = engine.play(&game, None).unwrap();
    assert!(game.legal_moves().contains(&result.best_move));
}

#[test]
fn test_mcts_tree_grows_with_budget() {
    let game = Nim::new(20, Player::Ai);

    let mut small = MctsEngine::new(MctsConfig::default().with_trials(50));
    let mut large = MctsEngine::new(MctsConfig::default().with_trials(1000));

    small.play(&game, None).unwrap();
    large.play(&game, None).unwrap();

    assert!(large.tree().unwrap().len() > small.tree().unwrap().len());
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let game = Nim::new(17, Player::Ai);
    let config = MctsConfig::default().with_trials(400).with_seed(12345);

    let mut a = MctsEngine::new(config.clone());
    let mut b = MctsEngine::new(config);

    let ra = a.play(&game, None).unwrap();
    let rb = b.play(&game, None).unwrap();

    assert_eq!(ra.best_move, rb.best_move, "same seed, same move");
    assert_eq!(ra.value, rb.value);
    assert_eq!(a.tree().unwrap().len(), b.tree().unwrap().len());
}

// =============================================================================
// Root Reuse Tests
// =============================================================================

#[test]
fn test_root_reuse_preserves_statistics_across_a_game() {
    let config = MctsConfig::default().with_trials(500).with_seed(3);
    let mut engine = MctsEngine::new(config);
    let mut game = Nim::new(13, Player::Ai);

    let first = engine.play(&game, None).unwrap();
    game.apply(first.best_move).unwrap();
    assert!(engine.advance(first.best_move));

    let root_plays = engine.tree().unwrap().root_node().plays;
    assert!(root_plays > 0, "advanced root keeps its visit count");

    // Opponent replies; the matching grandchild keeps its statistics and
    // the search continues on top of them.
    let opponent_move = 2;
    game.apply(opponent_move).unwrap();

    let reused = {
        let tree = engine.tree().unwrap();
        tree.find_child(tree.root(), opponent_move)
            .map(|c| tree.get(c).plays)
    };

    engine.play(&game, Some(opponent_move)).unwrap();

    if let Some(plays_before) = reused {
        let root = engine.tree().unwrap().root_node();
        assert!(root.plays >= plays_before + 500 - engine.stats().absorbed);
    }
}

#[test]
fn test_unknown_opponent_move_starts_fresh() {
    let mut engine = MctsEngine::new(MctsConfig::default().with_trials(200));
    let mut game = Nim::new(9, Player::Ai);

    let first = engine.play(&game, None).unwrap();
    game.apply(first.best_move).unwrap();
    engine.advance(first.best_move);

    // Drop the subtree by replaying a move the tree never explored from
    // this root; play must rebuild from the supplied state.
    game.apply(1).unwrap();
    let result = engine.play(&game, Some(99)).unwrap();
    assert!(game.legal_moves().contains(&result.best_move));
}

// =============================================================================
// Playing Strength
// =============================================================================

#[test]
fn test_mcts_takes_the_immediate_win() {
    // X on 0 and 1: cell 2 completes the row.
    let mut game = TicTacToe::new(Player::Ai);
    for &mv in &[0u8, 3, 1, 4] {
        game.apply(mv).unwrap();
    }

    let config = MctsConfig::default().with_trials(2000).with_seed(11);
    let mut engine = MctsEngine::new(config);

    let result = engine.play(&game, None).unwrap();
    assert_eq!(result.best_move, 2);
    assert!(result.value > 0.9, "winning child ratio, got {}", result.value);
}

#[test]
fn test_equal_budget_self_play_draws() {
    // Two 10k-trial engines on an empty 3x3 board play out to a draw.
    let config_x = MctsConfig::default().with_trials(10_000).with_seed(101);
    let config_o = MctsConfig::default().with_trials(10_000).with_seed(202);

    let mut engine_x = MctsEngine::new(config_x);
    let mut engine_o = MctsEngine::new(config_o);

    // Each engine sees itself as the AI side.
    let mut board_x = TicTacToe::new(Player::Ai);
    let mut board_o = TicTacToe::new(Player::Opponent);

    let mut last_x: Option<u8> = None;
    let mut last_o: Option<u8> = None;

    loop {
        let rx = engine_x.play(&board_x, last_o).unwrap();
        board_x.apply(rx.best_move).unwrap();
        board_o.apply(rx.best_move).unwrap();
        engine_x.advance(rx.best_move);
        last_x = Some(rx.best_move);
        if board_x.outcome().is_some() {
            break;
        }

        let ro = engine_o.play(&board_o, last_x).unwrap();
        board_x.apply(ro.best_move).unwrap();
        board_o.apply(ro.best_move).unwrap();
        engine_o.advance(ro.best_move);
        last_o = Some(ro.best_move);
        if board_x.outcome().is_some() {
            break;
        }
    }

    assert_eq!(board_x.outcome(), Some(Outcome::Draw));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_trained_tree_round_trips() {
    let mut engine = MctsEngine::new(MctsConfig::default().with_trials(400));
    let game = Nim::new(11, Player::Ai);
    engine.play(&game, None).unwrap();

    let tree = engine.tree().unwrap();

    let json = serde_json::to_string(tree).unwrap();
    let restored: MctsTree<Nim> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), tree.len());
    assert_eq!(restored.root_node().plays, tree.root_node().plays);
    assert_eq!(restored.root_node().wins, tree.root_node().wins);

    let bytes = bincode::serialize(tree).unwrap();
    let restored: MctsTree<Nim> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored.len(), tree.len());
}
