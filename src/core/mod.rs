pub mod error;
pub mod types;

pub use error::{OddsError, Result};
pub use types::{DicePool, Side, Winner, CRIT_FACE, DIE_FACES};
