use thiserror::Error;

use crate::core::types::Side;

#[derive(Error, Debug)]
pub enum OddsError {
    #[error("Trial count must be at least 1")]
    ZeroTrials,

    #[error("Success target for the {side} must be between 1 and 6, got {target}")]
    TargetOutOfRange { side: Side, target: u8 },

    #[error("Exact odds support at most {max} dice per side, the {side} has {dice}")]
    PoolTooLarge { side: Side, dice: u32, max: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OddsError>;
