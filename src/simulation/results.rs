//! Aggregated simulation results
//!
//! Trials are folded into three buckets keyed by the primary winner. Each
//! bucket also splits its count by crit winner. All fields are plain sums, so
//! partial results from separate workers merge exactly.

use serde::{Deserialize, Serialize};

use crate::combat::TrialOutcome;
use crate::core::types::Winner;

/// Trials that share a primary winner, split by crit winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeBucket {
    pub count: u64,
    pub attacker_crit_wins: u64,
    pub defender_crit_wins: u64,
}

impl OutcomeBucket {
    /// Count one trial whose crit contest went to `crit_winner`
    pub fn record(&mut self, crit_winner: Winner) {
        self.count += 1;
        match crit_winner {
            Winner::Attacker => self.attacker_crit_wins += 1,
            Winner::Defender => self.defender_crit_wins += 1,
            Winner::Tie => {}
        }
    }

    /// Trials in this bucket where crits were level.
    ///
    /// Saturates at zero for a bucket that over-counts crits; see [`is_consistent`].
    ///
    /// [`is_consistent`]: OutcomeBucket::is_consistent
    pub fn crit_ties(&self) -> u64 {
        self.count
            .saturating_sub(self.attacker_crit_wins)
            .saturating_sub(self.defender_crit_wins)
    }

    pub fn merge(&mut self, other: &OutcomeBucket) {
        self.count += other.count;
        self.attacker_crit_wins += other.attacker_crit_wins;
        self.defender_crit_wins += other.defender_crit_wins;
    }

    /// Crit wins never exceed the bucket count
    pub fn is_consistent(&self) -> bool {
        self.attacker_crit_wins
            .checked_add(self.defender_crit_wins)
            .is_some_and(|crits| crits <= self.count)
    }
}

/// Summary of a whole run, handed to whatever renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub attacker_wins: OutcomeBucket,
    pub defender_wins: OutcomeBucket,
    pub ties: OutcomeBucket,
    pub num_simulations: u64,
}

impl SimulationResult {
    /// Accumulator with no trials recorded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold one trial into the tallies
    pub fn record(&mut self, outcome: &TrialOutcome) {
        self.bucket_mut(outcome.winner).record(outcome.crit_winner);
        self.num_simulations += 1;
    }

    /// Bucket for a primary winner
    pub fn bucket(&self, winner: Winner) -> &OutcomeBucket {
        match winner {
            Winner::Attacker => &self.attacker_wins,
            Winner::Defender => &self.defender_wins,
            Winner::Tie => &self.ties,
        }
    }

    fn bucket_mut(&mut self, winner: Winner) -> &mut OutcomeBucket {
        match winner {
            Winner::Attacker => &mut self.attacker_wins,
            Winner::Defender => &mut self.defender_wins,
            Winner::Tie => &mut self.ties,
        }
    }

    /// Combine tallies from another (disjoint) set of trials
    pub fn merge(&mut self, other: &SimulationResult) {
        self.attacker_wins.merge(&other.attacker_wins);
        self.defender_wins.merge(&other.defender_wins);
        self.ties.merge(&other.ties);
        self.num_simulations += other.num_simulations;
    }

    /// Buckets add up to the trial count and no bucket over-counts crits
    pub fn check_invariants(&self) -> bool {
        let total = self.attacker_wins.count + self.defender_wins.count + self.ties.count;
        total == self.num_simulations
            && Winner::ALL.iter().all(|&w| self.bucket(w).is_consistent())
    }
}
