//! Monte Carlo driver
//!
//! Each trial rolls both pools, applies rerolls and resolves the combat. The
//! seeded runner splits trials into fixed-size chunks, each with its own
//! ChaCha stream, and runs them on rayon. Chunk boundaries depend only on the
//! trial count, so a seed reproduces the same result on any number of threads.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::combat::{resolve, TrialOutcome};
use crate::core::error::Result;
use crate::dice::{apply_rerolls, roll_pool, DiceSource, RngDice};
use crate::simulation::config::{CombatConfig, SimulationConfig};
use crate::simulation::results::SimulationResult;

/// Trials handled by one worker chunk
pub const CHUNK_TRIALS: u64 = 4096;

/// Run with a fresh random seed
pub fn run(config: &SimulationConfig) -> Result<SimulationResult> {
    run_seeded(config, rand::random())
}

/// Run in parallel, reproducibly for a given seed
pub fn run_seeded(config: &SimulationConfig, seed: u64) -> Result<SimulationResult> {
    config.validate()?;
    tracing::debug!(?config, seed, "Starting parallel simulation");

    let start = Instant::now();
    let chunks = config.trials.div_ceil(CHUNK_TRIALS);

    let result = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let trials = CHUNK_TRIALS.min(config.trials - chunk * CHUNK_TRIALS);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(chunk);
            let mut dice = RngDice::new(rng);
            simulate_trials(config, trials, &mut dice)
        })
        .reduce(SimulationResult::empty, |mut acc, part| {
            acc.merge(&part);
            acc
        });

    tracing::info!(
        trials = result.num_simulations,
        chunks,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Simulation complete"
    );
    Ok(result)
}

/// Run sequentially, drawing every die from `dice`
pub fn run_with<D: DiceSource + ?Sized>(
    config: &SimulationConfig,
    dice: &mut D,
) -> Result<SimulationResult> {
    config.validate()?;
    tracing::debug!(?config, "Starting sequential simulation");

    let start = Instant::now();
    let result = simulate_trials(config, config.trials, dice);

    tracing::info!(
        trials = result.num_simulations,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Simulation complete"
    );
    Ok(result)
}

/// Roll, reroll and resolve one combat
pub fn run_trial<D: DiceSource + ?Sized>(
    config: &SimulationConfig,
    dice: &mut D,
) -> TrialOutcome {
    let attacker = roll_side(&config.attacker, dice);
    let defender = roll_side(&config.defender, dice);
    resolve(
        &attacker,
        config.attacker.target,
        &defender,
        config.defender.target,
    )
}

fn roll_side<D: DiceSource + ?Sized>(side: &CombatConfig, dice: &mut D) -> Vec<u8> {
    let pool = roll_pool(dice, side.dice);
    apply_rerolls(&pool, side.target, side.rerolls, dice)
}

fn simulate_trials<D: DiceSource + ?Sized>(
    config: &SimulationConfig,
    trials: u64,
    dice: &mut D,
) -> SimulationResult {
    let mut result = SimulationResult::empty();
    for _ in 0..trials {
        result.record(&run_trial(config, dice));
    }
    result
}
