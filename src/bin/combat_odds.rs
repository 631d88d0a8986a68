//! Headless odds runner
//!
//! Simulates a dice-pool combat and prints the tallies as JSON or text.
//! Logs go to stderr so JSON output can be piped.

use std::path::PathBuf;

use clap::Parser;
use dicepool_odds::core::error::Result;
use dicepool_odds::{
    exact_odds, run_seeded, run_with, CombatConfig, ExactOdds, OutcomeBucket, RngDice,
    SimulationConfig, SimulationResult, Winner,
};
use serde::Serialize;

/// Dice-pool combat odds via Monte Carlo simulation
#[derive(Parser, Debug)]
#[command(name = "combat_odds")]
#[command(about = "Estimate attacker/defender odds for opposed d6 pools")]
struct Args {
    /// Scenario TOML file; overrides the per-field flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 10_000)]
    trials: u64,

    #[arg(long, default_value_t = 2)]
    attacker_dice: u32,

    #[arg(long, default_value_t = 5)]
    attacker_target: u8,

    #[arg(long, default_value_t = 0)]
    attacker_rerolls: u32,

    #[arg(long, default_value_t = 1)]
    defender_dice: u32,

    #[arg(long, default_value_t = 5)]
    defender_target: u8,

    #[arg(long, default_value_t = 0)]
    defender_rerolls: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run on a single thread
    #[arg(long)]
    sequential: bool,

    /// Also compute exact odds
    #[arg(long)]
    exact: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        if let Some(path) = &self.config {
            return SimulationConfig::load(path);
        }
        Ok(SimulationConfig::new(
            CombatConfig::new(
                self.attacker_dice,
                self.attacker_target,
                self.attacker_rerolls,
            ),
            CombatConfig::new(
                self.defender_dice,
                self.defender_target,
                self.defender_rerolls,
            ),
            self.trials,
        ))
    }
}

/// JSON output structure
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    config: SimulationConfig,
    seed: u64,
    result: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<ExactSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExactSummary {
    attacker_win: f64,
    defender_win: f64,
    tie: f64,
    max_deviation: f64,
}

impl ExactSummary {
    fn new(odds: &ExactOdds, result: &SimulationResult) -> Self {
        Self {
            attacker_win: odds.attacker_win(),
            defender_win: odds.defender_win(),
            tie: odds.tie(),
            max_deviation: odds.max_deviation(result),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dicepool_odds=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.simulation_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let result = if args.sequential {
        run_with(&config, &mut RngDice::seeded(seed))?
    } else {
        run_seeded(&config, seed)?
    };

    let exact = if args.exact {
        Some(ExactSummary::new(&exact_odds(&config)?, &result))
    } else {
        None
    };

    let report = Report {
        config,
        seed,
        result,
        exact,
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        _ => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &Report) {
    let config = &report.config;
    let result = &report.result;
    let n = result.num_simulations as f64;
    let pct = |count: u64| 100.0 * count as f64 / n;

    println!("Dice-pool combat odds");
    println!("=====================");
    println!(
        "Attacker: {} dice, {}+ to hit, {} rerolls",
        config.attacker.dice, config.attacker.target, config.attacker.rerolls
    );
    println!(
        "Defender: {} dice, {}+ to hit, {} rerolls",
        config.defender.dice, config.defender.target, config.defender.rerolls
    );
    println!("Trials: {} (seed {})", result.num_simulations, report.seed);
    println!();

    for (label, winner) in [
        ("Attacker wins", Winner::Attacker),
        ("Ties", Winner::Tie),
        ("Defender wins", Winner::Defender),
    ] {
        let bucket: &OutcomeBucket = result.bucket(winner);
        println!("{:<14} {:>6.2}%", label, pct(bucket.count));
        println!(
            "  crits: attacker {:>6.2}%  defender {:>6.2}%  level {:>6.2}%",
            pct(bucket.attacker_crit_wins),
            pct(bucket.defender_crit_wins),
            pct(bucket.crit_ties())
        );
    }

    if let Some(exact) = &report.exact {
        println!();
        println!(
            "Exact: attacker {:.2}%  tie {:.2}%  defender {:.2}%",
            100.0 * exact.attacker_win,
            100.0 * exact.tie,
            100.0 * exact.defender_win
        );
        println!("Largest cell deviation: {:.3}%", 100.0 * exact.max_deviation);
    }
}
