//! Reroll policy
//!
//! A single left-to-right pass: each die under the success target is re-drawn
//! while budget remains. A re-drawn die is never looked at again.

use crate::core::types::DicePool;
use crate::dice::roller::{roll_die, DiceSource};

/// A pool after rerolls, plus how much of the budget went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerollReport {
    pub pool: DicePool,
    pub rerolls_used: u32,
}

/// Spend up to `budget` rerolls on dice below `success_target`.
///
/// Returns a new pool of the same length; `pool` is left untouched.
pub fn apply_rerolls<D: DiceSource + ?Sized>(
    pool: &[u8],
    success_target: u8,
    budget: u32,
    dice: &mut D,
) -> DicePool {
    reroll_with_report(pool, success_target, budget, dice).pool
}

/// Same as [`apply_rerolls`], also reporting the number of dice re-drawn
pub fn reroll_with_report<D: DiceSource + ?Sized>(
    pool: &[u8],
    success_target: u8,
    budget: u32,
    dice: &mut D,
) -> RerollReport {
    let mut rerolls_used = 0;
    let pool = pool
        .iter()
        .map(|&die| {
            if die < success_target && rerolls_used < budget {
                rerolls_used += 1;
                roll_die(dice)
            } else {
                die
            }
        })
        .collect();

    RerollReport { pool, rerolls_used }
}
