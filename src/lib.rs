//! Dicepool Odds - Monte Carlo odds for opposed d6 pool combat
//!
//! Attacker and defender each roll a pool of d6s against a success target,
//! optionally rerolling failed dice, and compare successes and sixes.

pub mod combat;
pub mod core;
pub mod dice;
pub mod simulation;

pub use crate::combat::{resolve, TrialOutcome};
pub use crate::core::{OddsError, Result, Side, Winner};
pub use crate::dice::{apply_rerolls, roll_die, roll_pool, DiceSource, RngDice};
pub use crate::simulation::{
    exact_odds, run, run_seeded, run_with, CombatConfig, ExactOdds, OutcomeBucket,
    SimulationConfig, SimulationResult,
};
