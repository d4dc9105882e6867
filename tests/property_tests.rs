//! Property tests for the search invariants.

use proptest::prelude::*;

use gametree::games::nim::Nim;
use gametree::games::othello::Othello;
use gametree::games::tictactoe::TicTacToe;
use gametree::mcts::{MctsConfig, MctsEngine, MctsNode};
use gametree::minimax::MinimaxEngine;
use gametree::{Depth, GameState, MctsGame, MinimaxGame, Player, SearchRng};

/// Walk a random playout, checking at every position that each legal move
/// applies cleanly to an independent copy.
fn assert_legal_moves_apply<G: GameState>(mut state: G, seed: u64, max_plies: usize) {
    let mut rng = SearchRng::new(seed);

    for _ in 0..max_plies {
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        for &mv in &moves {
            state
                .child(mv)
                .unwrap_or_else(|err| panic!("legal move {mv:?} rejected: {err}"));
        }
        let &mv = rng.choose(&moves).unwrap();
        state.apply(mv).unwrap();
    }
}

proptest! {
    #[test]
    fn legal_moves_never_violate_update_nim(start in 0u32..64, seed in any::<u64>()) {
        assert_legal_moves_apply(Nim::new(start, Player::Ai), seed, 64);
    }

    #[test]
    fn legal_moves_never_violate_update_tictactoe(seed in any::<u64>()) {
        assert_legal_moves_apply(TicTacToe::new(Player::Ai), seed, 9);
    }

    #[test]
    fn ucb_is_monotone_in_wins(
        plays in 1u32..500,
        parent_plays in 1u32..10_000,
        win_lo in 0.0f64..1.0,
        win_hi in 0.0f64..1.0,
    ) {
        let (lo, hi) = if win_lo <= win_hi { (win_lo, win_hi) } else { (win_hi, win_lo) };
        let c = std::f64::consts::SQRT_2;

        let mut node_lo: MctsNode<Nim> = MctsNode::new_root(Nim::new(10, Player::Ai));
        let mut node_hi: MctsNode<Nim> = MctsNode::new_root(Nim::new(10, Player::Ai));
        node_lo.wins = lo * f64::from(plays);
        node_lo.plays = plays;
        node_hi.wins = hi * f64::from(plays);
        node_hi.plays = plays;

        prop_assert!(node_lo.ucb(parent_plays, c) <= node_hi.ucb(parent_plays, c));
    }

    #[test]
    fn default_reward_is_perspective_adjusted(start in 1u32..40) {
        // `to_move` opponent means the AI produced this state, and vice
        // versa.
        let ai_moved = Nim::new(start, Player::Opponent);
        let opponent_moved = Nim::new(start, Player::Ai);

        for outcome in [
            gametree::Outcome::Win(Player::Ai),
            gametree::Outcome::Win(Player::Opponent),
            gametree::Outcome::Draw,
        ] {
            let a = ai_moved.reward(outcome);
            let b = opponent_moved.reward(outcome);
            match outcome {
                gametree::Outcome::Draw => prop_assert_eq!(a, b),
                _ => prop_assert_eq!(a, 1.0 - b),
            }
        }
    }
}

proptest! {
    // Engine-driving properties get a smaller case budget.
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn legal_moves_never_violate_update_othello(seed in any::<u64>()) {
        assert_legal_moves_apply(Othello::new(Player::Opponent), seed, 70);
    }

    #[test]
    fn alpha_beta_matches_exhaustive_minimax(start in 0u32..20, depth in 1u8..7) {
        fn unpruned<G: MinimaxGame>(state: &G, depth: Depth, max_depth: Depth) -> f64 {
            if let Some(value) = state.terminal_value(depth, max_depth) {
                return value;
            }
            let maximizing = !state.last_mover().is_ai();
            let values = state
                .legal_moves()
                .into_iter()
                .map(|mv| unpruned(&state.child(mv).unwrap(), depth + 1, max_depth));
            if maximizing {
                values.fold(f64::NEG_INFINITY, f64::max)
            } else {
                values.fold(f64::INFINITY, f64::min)
            }
        }

        let game = Nim::new(start, Player::Ai);
        prop_assume!(!game.legal_moves().is_empty());

        let mut engine = MinimaxEngine::new(depth);
        let pruned = engine.play(&game, None).unwrap().value;
        prop_assert_eq!(pruned, unpruned(&game, 0, depth));
    }

    #[test]
    fn mcts_visit_counts_add_up(start in 1u32..30, trials in 50u32..400) {
        let game = Nim::new(start, Player::Ai);
        let mut engine = MctsEngine::new(MctsConfig::default().with_trials(trials));
        engine.play(&game, None).unwrap();

        let tree = engine.tree().unwrap();
        let child_plays: u32 = tree
            .root_node()
            .children
            .iter()
            .map(|&c| tree.get(c).plays)
            .sum();

        prop_assert_eq!(child_plays, trials - engine.stats().absorbed);
    }
}
