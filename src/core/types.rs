//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of faces on every die in a pool
pub const DIE_FACES: u8 = 6;

/// Face value that counts as a critical
pub const CRIT_FACE: u8 = DIE_FACES;

/// A rolled pool of d6 results.
///
/// Order does not matter for scoring, but rerolls work positionally so it is
/// preserved everywhere a pool is transformed.
pub type DicePool = Vec<u8>;

/// One side of a combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Attacker,
    Defender,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

/// Who came out ahead in a contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Attacker,
    Defender,
    Tie,
}

impl Winner {
    /// All outcomes, in table order
    pub const ALL: [Winner; 3] = [Winner::Attacker, Winner::Defender, Winner::Tie];

    /// Row/column index used by fixed-size outcome tables
    pub fn index(self) -> usize {
        match self {
            Winner::Attacker => 0,
            Winner::Defender => 1,
            Winner::Tie => 2,
        }
    }

    /// The same outcome seen from the other side of the table
    pub fn swapped(self) -> Self {
        match self {
            Winner::Attacker => Winner::Defender,
            Winner::Defender => Winner::Attacker,
            Winner::Tie => Winner::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Attacker => write!(f, "attacker"),
            Winner::Defender => write!(f, "defender"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}
