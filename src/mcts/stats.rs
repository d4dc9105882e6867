//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `play` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Trials performed.
    pub trials: u32,

    /// Nodes expanded (added to the tree).
    pub expansions: u32,

    /// Random playouts run.
    pub simulations: u32,

    /// Trials where selection reached an already-terminal node and
    /// backpropagated its outcome without expanding.
    pub terminal_hits: u32,

    /// Trials whose backpropagation started at the root itself (dead
    /// position at the root), incrementing no root child. The visit-count
    /// identity is `sum(child.plays) == trials - absorbed` on a fresh
    /// tree.
    pub absorbed: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate trials per second.
    #[must_use]
    pub fn trials_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.trials) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.trials, 0);
        assert_eq!(stats.simulations, 0);
        assert_eq!(stats.trials_per_second(), 0.0);
    }

    #[test]
    fn test_trials_per_second() {
        let mut stats = SearchStats::new();
        stats.trials = 1000;
        stats.time_us = 500_000;
        assert_eq!(stats.trials_per_second(), 2000.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.trials = 100;
        stats.expansions = 50;

        stats.reset();

        assert_eq!(stats.trials, 0);
        assert_eq!(stats.expansions, 0);
    }
}
