//! Exact outcome probabilities
//!
//! Each die lands in one of three classes: a crit (6), a plain success
//! (target..6) or a miss. Rerolls turn `min(misses, budget)` dice back into
//! fresh draws, so a side's final (successes, crits) distribution is a sum over
//! two multinomials. Crossing both sides' distributions through the resolver
//! gives the nine (winner, crit winner) cells exactly.

use serde::Serialize;

use crate::combat::{resolve_tallies, PoolTally};
use crate::core::error::{OddsError, Result};
use crate::core::types::{Side, Winner, DIE_FACES};
use crate::simulation::config::{CombatConfig, SimulationConfig};
use crate::simulation::results::SimulationResult;

/// Largest pool the exact calculator accepts per side
pub const MAX_EXACT_DICE: u32 = 64;

/// Probability of every (winner, crit winner) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExactOdds {
    /// Indexed `[winner.index()][crit_winner.index()]`
    cells: [[f64; 3]; 3],
}

impl ExactOdds {
    pub fn cell(&self, winner: Winner, crit_winner: Winner) -> f64 {
        self.cells[winner.index()][crit_winner.index()]
    }

    /// Probability the primary contest goes to `winner`
    pub fn primary(&self, winner: Winner) -> f64 {
        self.cells[winner.index()].iter().sum()
    }

    pub fn attacker_win(&self) -> f64 {
        self.primary(Winner::Attacker)
    }

    pub fn defender_win(&self) -> f64 {
        self.primary(Winner::Defender)
    }

    pub fn tie(&self) -> f64 {
        self.primary(Winner::Tie)
    }

    /// Probability the crit contest goes to `crit_winner`
    pub fn crit(&self, crit_winner: Winner) -> f64 {
        self.cells.iter().map(|row| row[crit_winner.index()]).sum()
    }

    /// Largest gap between these odds and the observed frequencies of a run
    pub fn max_deviation(&self, result: &SimulationResult) -> f64 {
        if result.num_simulations == 0 {
            return 0.0;
        }
        let n = result.num_simulations as f64;
        let mut worst: f64 = 0.0;
        for winner in Winner::ALL {
            let bucket = result.bucket(winner);
            let observed = [
                bucket.attacker_crit_wins,
                bucket.defender_crit_wins,
                bucket.crit_ties(),
            ];
            for (crit_winner, count) in Winner::ALL.iter().zip(observed) {
                let gap = (self.cell(winner, *crit_winner) - count as f64 / n).abs();
                worst = worst.max(gap);
            }
        }
        worst
    }
}

/// Compute exact odds for a config
pub fn exact_odds(config: &SimulationConfig) -> Result<ExactOdds> {
    config.validate()?;
    for side in [Side::Attacker, Side::Defender] {
        let dice = config.side(side).dice;
        if dice > MAX_EXACT_DICE {
            return Err(OddsError::PoolTooLarge {
                side,
                dice,
                max: MAX_EXACT_DICE,
            });
        }
    }

    let binomials = Binomials::new(MAX_EXACT_DICE as usize);
    let attacker = side_distribution(&config.attacker, &binomials);
    let defender = side_distribution(&config.defender, &binomials);

    let mut cells = [[0.0; 3]; 3];
    for &(a_tally, a_prob) in &attacker {
        for &(d_tally, d_prob) in &defender {
            let outcome = resolve_tallies(a_tally, d_tally);
            cells[outcome.winner.index()][outcome.crit_winner.index()] += a_prob * d_prob;
        }
    }

    tracing::debug!(?config, ?cells, "Computed exact odds");
    Ok(ExactOdds { cells })
}

/// Pascal's triangle in floating point
struct Binomials {
    rows: Vec<Vec<f64>>,
}

impl Binomials {
    fn new(max_n: usize) -> Self {
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(max_n + 1);
        for n in 0..=max_n {
            let mut row = vec![1.0; n + 1];
            for k in 1..n {
                row[k] = rows[n - 1][k - 1] + rows[n - 1][k];
            }
            rows.push(row);
        }
        Self { rows }
    }

    fn choose(&self, n: usize, k: usize) -> f64 {
        self.rows[n][k]
    }

    /// Probability of exactly (crits, hits, misses) among `n` dice
    fn trinomial(&self, n: usize, crits: usize, hits: usize, p: &FaceOdds) -> f64 {
        let misses = n - crits - hits;
        self.choose(n, crits)
            * self.choose(n - crits, hits)
            * p.crit.powi(crits as i32)
            * p.hit.powi(hits as i32)
            * p.miss.powi(misses as i32)
    }
}

/// Single-die class probabilities for a success target
struct FaceOdds {
    crit: f64,
    hit: f64,
    miss: f64,
}

impl FaceOdds {
    fn for_target(target: u8) -> Self {
        let faces = DIE_FACES as f64;
        Self {
            crit: 1.0 / faces,
            hit: (DIE_FACES - target) as f64 / faces,
            miss: (target - 1) as f64 / faces,
        }
    }
}

/// Final (successes, crits) distribution for one side, zero-probability cells dropped
fn side_distribution(side: &CombatConfig, binomials: &Binomials) -> Vec<(PoolTally, f64)> {
    let n = side.dice as usize;
    let p = FaceOdds::for_target(side.target);
    // table[successes][crits]
    let mut table = vec![vec![0.0; n + 1]; n + 1];

    for crits in 0..=n {
        for hits in 0..=(n - crits) {
            let first = binomials.trinomial(n, crits, hits, &p);
            if first == 0.0 {
                continue;
            }
            let misses = n - crits - hits;
            let rerolled = misses.min(side.rerolls as usize);

            for re_crits in 0..=rerolled {
                for re_hits in 0..=(rerolled - re_crits) {
                    let second = binomials.trinomial(rerolled, re_crits, re_hits, &p);
                    let successes = crits + hits + re_crits + re_hits;
                    table[successes][crits + re_crits] += first * second;
                }
            }
        }
    }

    let mut distribution = Vec::new();
    for (successes, row) in table.iter().enumerate() {
        for (crits, &prob) in row.iter().enumerate() {
            if prob > 0.0 {
                distribution.push((
                    PoolTally {
                        successes: successes as u32,
                        crits: crits as u32,
                    },
                    prob,
                ));
            }
        }
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn single_die(target: u8, rerolls: u32) -> SimulationConfig {
        SimulationConfig::new(
            CombatConfig::new(1, target, rerolls),
            CombatConfig::new(1, target, 0),
            1,
        )
    }

    #[test]
    fn test_cells_sum_to_one() {
        let config = SimulationConfig::new(
            CombatConfig::new(5, 3, 2),
            CombatConfig::new(4, 5, 1),
            1,
        );
        let odds = exact_odds(&config).expect("valid config");
        let total = odds.attacker_win() + odds.defender_win() + odds.tie();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_die_each_at_four_plus() {
        let odds = exact_odds(&single_die(4, 0)).expect("valid config");
        assert!((odds.attacker_win() - 0.25).abs() < EPS);
        assert!((odds.tie() - 0.25).abs() < EPS);
        assert!((odds.defender_win() - 0.5).abs() < EPS);
        // Both six or neither six
        assert!((odds.crit(Winner::Tie) - 26.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn test_reroll_improves_single_die() {
        // Success chance 1/2 + 1/2 * 1/2 = 3/4 against a 1/2 defender
        let odds = exact_odds(&single_die(4, 1)).expect("valid config");
        assert!((odds.attacker_win() - 0.75 * 0.5).abs() < EPS);
        assert!((odds.tie() - 0.75 * 0.5).abs() < EPS);
        // Crit chance 1/6 + 1/2 * 1/6 = 1/4
        let attacker_crit_only = 0.25 * (5.0 / 6.0);
        assert!((odds.crit(Winner::Attacker) - attacker_crit_only).abs() < EPS);
    }

    #[test]
    fn test_empty_pools_always_defender_and_crit_tie() {
        let config = SimulationConfig::new(
            CombatConfig::new(0, 4, 2),
            CombatConfig::new(0, 4, 0),
            1,
        );
        let odds = exact_odds(&config).expect("valid config");
        assert!((odds.cell(Winner::Defender, Winner::Tie) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_target_one_never_misses() {
        let config = SimulationConfig::new(
            CombatConfig::new(2, 1, 0),
            CombatConfig::new(1, 1, 0),
            1,
        );
        let odds = exact_odds(&config).expect("valid config");
        assert!((odds.attacker_win() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let config = SimulationConfig::new(
            CombatConfig::new(MAX_EXACT_DICE + 1, 4, 0),
            CombatConfig::new(1, 4, 0),
            1,
        );
        assert!(matches!(
            exact_odds(&config),
            Err(OddsError::PoolTooLarge { side: Side::Attacker, .. })
        ));
    }

    #[test]
    fn test_max_deviation_of_perfect_match_is_zero() {
        let config = SimulationConfig::new(
            CombatConfig::new(0, 4, 0),
            CombatConfig::new(0, 4, 0),
            1,
        );
        let odds = exact_odds(&config).expect("valid config");
        let mut result = SimulationResult::empty();
        result.record(&crate::combat::TrialOutcome {
            winner: Winner::Defender,
            crit_winner: Winner::Tie,
        });
        assert!(odds.max_deviation(&result) < EPS);
    }

    #[test]
    fn test_max_deviation_tolerates_overcounted_bucket() {
        let config = SimulationConfig::new(
            CombatConfig::new(1, 4, 0),
            CombatConfig::new(1, 4, 0),
            1,
        );
        let odds = exact_odds(&config).expect("valid config");
        let mut result = SimulationResult::empty();
        result.attacker_wins.count = 1;
        result.attacker_wins.attacker_crit_wins = 1;
        result.attacker_wins.defender_crit_wins = 1;
        result.num_simulations = 1;

        assert!(odds.max_deviation(&result).is_finite());
    }
}
