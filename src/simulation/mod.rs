//! Monte Carlo combat simulation
//!
//! Drives many independent trials through the dice and combat modules and
//! folds them into a [`SimulationResult`]. Exact odds for the same configs are
//! available through [`exact_odds`].

pub mod config;
pub mod driver;
pub mod odds;
pub mod results;

pub use config::{CombatConfig, SimulationConfig};
pub use driver::{run, run_seeded, run_trial, run_with, CHUNK_TRIALS};
pub use odds::{exact_odds, ExactOdds, MAX_EXACT_DICE};
pub use results::{OutcomeBucket, SimulationResult};
