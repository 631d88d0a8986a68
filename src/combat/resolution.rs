//! Single combat resolution
//!
//! Successes decide the primary winner, sixes decide the crit winner.
//! The two contests break level scores differently: level crits (including
//! none on either side) are a tie, but the attacker needs at least one success
//! to force a primary tie. Zero against zero goes to the defender.

use serde::{Deserialize, Serialize};

use crate::core::types::{Winner, CRIT_FACE};

/// Scoring summary of one rolled pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoolTally {
    pub successes: u32,
    pub crits: u32,
}

/// Result of one attacker/defender contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    pub winner: Winner,
    pub crit_winner: Winner,
}

impl TrialOutcome {
    /// The outcome as seen with attacker and defender exchanged
    pub fn swapped(self) -> Self {
        Self {
            winner: self.winner.swapped(),
            crit_winner: self.crit_winner.swapped(),
        }
    }
}

/// Count successes (die >= target) and crits (die == 6) in a pool
pub fn tally(pool: &[u8], target: u8) -> PoolTally {
    pool.iter().fold(PoolTally::default(), |mut acc, &die| {
        if die >= target {
            acc.successes += 1;
        }
        if die == CRIT_FACE {
            acc.crits += 1;
        }
        acc
    })
}

/// Resolve one combat from the final (post-reroll) pools
pub fn resolve(
    attacker_dice: &[u8],
    attacker_target: u8,
    defender_dice: &[u8],
    defender_target: u8,
) -> TrialOutcome {
    resolve_tallies(
        tally(attacker_dice, attacker_target),
        tally(defender_dice, defender_target),
    )
}

/// Resolve one combat from already-counted pools
pub fn resolve_tallies(attacker: PoolTally, defender: PoolTally) -> TrialOutcome {
    TrialOutcome {
        winner: primary_winner(attacker.successes, defender.successes),
        crit_winner: crit_winner(attacker.crits, defender.crits),
    }
}

fn primary_winner(attacker: u32, defender: u32) -> Winner {
    if attacker == defender && attacker > 0 {
        Winner::Tie
    } else if attacker > defender {
        Winner::Attacker
    } else {
        Winner::Defender
    }
}

fn crit_winner(attacker: u32, defender: u32) -> Winner {
    use std::cmp::Ordering;

    match attacker.cmp(&defender) {
        Ordering::Equal => Winner::Tie,
        Ordering::Greater => Winner::Attacker,
        Ordering::Less => Winner::Defender,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_successes_and_crits() {
        assert_eq!(
            tally(&[6, 5, 4], 5),
            PoolTally {
                successes: 2,
                crits: 1
            }
        );
        assert_eq!(tally(&[], 3), PoolTally::default());
    }

    #[test]
    fn test_six_is_always_a_success() {
        assert_eq!(
            tally(&[6, 6], 6),
            PoolTally {
                successes: 2,
                crits: 2
            }
        );
    }

    #[test]
    fn test_attacker_wins_with_crit() {
        let outcome = resolve(&[6, 5, 4], 5, &[3, 2, 1], 5);
        assert_eq!(outcome.winner, Winner::Attacker);
        assert_eq!(outcome.crit_winner, Winner::Attacker);
    }

    #[test]
    fn test_zero_successes_go_to_defender() {
        let outcome = resolve(&[4, 4, 4], 5, &[4, 4, 4], 5);
        assert_eq!(outcome.winner, Winner::Defender);
        assert_eq!(outcome.crit_winner, Winner::Tie);
    }

    #[test]
    fn test_level_successes_tie() {
        let outcome = resolve(&[5, 5], 5, &[5, 5], 5);
        assert_eq!(outcome.winner, Winner::Tie);
        assert_eq!(outcome.crit_winner, Winner::Tie);
    }

    #[test]
    fn test_defender_outscores() {
        let outcome = resolve(&[5, 1], 5, &[6, 6], 4);
        assert_eq!(outcome.winner, Winner::Defender);
        assert_eq!(outcome.crit_winner, Winner::Defender);
    }

    #[test]
    fn test_crit_winner_independent_of_primary() {
        // Defender takes the primary contest, attacker still has the only six
        let outcome = resolve(&[6], 6, &[3, 3], 2);
        assert_eq!(outcome.winner, Winner::Defender);
        assert_eq!(outcome.crit_winner, Winner::Attacker);
    }

    #[test]
    fn test_empty_pools() {
        let outcome = resolve(&[], 4, &[], 4);
        assert_eq!(outcome.winner, Winner::Defender);
        assert_eq!(outcome.crit_winner, Winner::Tie);
    }

    #[test]
    fn test_swap_sides_swaps_winners() {
        let forward = resolve(&[6, 4, 2], 4, &[5, 1], 3);
        let backward = resolve(&[5, 1], 3, &[6, 4, 2], 4);
        assert_eq!(backward, forward.swapped());
    }
}
