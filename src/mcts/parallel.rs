//! Root-parallel MCTS.
//!
//! Runs several independent single-threaded engines, each with a private
//! tree and random stream, and merges their final per-move win ratios by
//! summation divided by the worker count. The merge is a statistically
//! naive average of independent estimates, not a property-preserving
//! combination of UCB1 statistics; it is an approximation layered outside
//! the core engine contract.
//!
//! No mutable state crosses worker boundaries; every worker's tree is
//! dropped when it finishes reporting.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{SearchError, SearchResult, SearchRng};
use crate::game::MctsGame;

use super::config::MctsConfig;
use super::search::MctsEngine;

/// Search `state` with `workers` independent engines and average their
/// per-move win ratios.
///
/// Each worker gets a seed forked from `config.seed`, so the whole run is
/// deterministic for a fixed config and worker count. Ties in the merged
/// ratios resolve to the smallest move, which is why `G::Move: Ord`.
pub fn parallel_search<G>(
    state: &G,
    workers: usize,
    config: &MctsConfig,
) -> Result<SearchResult<G::Move>, SearchError>
where
    G: MctsGame + Sync,
    G::Move: Ord + Send,
{
    assert!(workers > 0, "at least one worker required");

    let mut seed_rng = SearchRng::new(config.seed);
    let seeds: Vec<u64> = (0..workers).map(|_| seed_rng.fork().seed()).collect();

    let reports: Vec<Result<Vec<(G::Move, f64)>, SearchError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .into_iter()
            .map(|seed| {
                let worker_config = config.clone().with_seed(seed);
                scope.spawn(move || -> Result<Vec<(G::Move, f64)>, SearchError> {
                    let mut engine = MctsEngine::new(worker_config);
                    engine.play(state, None)?;
                    Ok(engine.root_ratios())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("search worker panicked"))
            .collect()
    });

    let mut summed: FxHashMap<G::Move, f64> = FxHashMap::default();
    for report in reports {
        for (mv, ratio) in report? {
            *summed.entry(mv).or_insert(0.0) += ratio;
        }
    }

    let mut merged: Vec<(G::Move, f64)> = summed.into_iter().collect();
    merged.sort_by(|a, b| a.0.cmp(&b.0));

    let mut best: Option<(G::Move, f64)> = None;
    for (mv, sum) in merged {
        match best {
            Some((_, top)) if sum <= top => {}
            _ => best = Some((mv, sum)),
        }
    }

    let (best_move, sum) = best.ok_or(SearchError::NoLegalMoves)?;
    let value = sum / workers as f64;
    debug!(?best_move, value, workers, "parallel search merged");
    Ok(SearchResult { best_move, value })
}
