//! Dice rolling and the reroll policy

pub mod reroll;
pub mod roller;

pub use reroll::{apply_rerolls, reroll_with_report, RerollReport};
pub use roller::{roll_die, roll_pool, DiceSource, FixedDice, RngDice, ScriptedDice};
