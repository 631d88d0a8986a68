pub mod resolution;

pub use resolution::{resolve, resolve_tallies, tally, PoolTally, TrialOutcome};
