//! Simulation configuration
//!
//! Configs are plain data, usually loaded from a scenario TOML file or built
//! from CLI flags. Nothing downstream of [`SimulationConfig::validate`]
//! re-checks ranges.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{OddsError, Result};
use crate::core::types::{Side, DIE_FACES};

/// One side's dice: pool size, success target and reroll budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombatConfig {
    /// Dice rolled
    pub dice: u32,
    /// Minimum face that counts as a success (1-6)
    pub target: u8,
    /// Failed dice that may be rerolled once; budget beyond the pool size is unused
    #[serde(default)]
    pub rerolls: u32,
}

impl CombatConfig {
    pub fn new(dice: u32, target: u8, rerolls: u32) -> Self {
        Self {
            dice,
            target,
            rerolls,
        }
    }

    fn validate(&self, side: Side) -> Result<()> {
        if !(1..=DIE_FACES).contains(&self.target) {
            return Err(OddsError::TargetOutOfRange {
                side,
                target: self.target,
            });
        }
        Ok(())
    }
}

/// Everything needed for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub attacker: CombatConfig,
    pub defender: CombatConfig,
    /// Number of independent trials
    pub trials: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            attacker: CombatConfig::new(2, 5, 0),
            defender: CombatConfig::new(1, 5, 0),
            trials: 10_000,
        }
    }
}

impl SimulationConfig {
    pub fn new(attacker: CombatConfig, defender: CombatConfig, trials: u64) -> Self {
        Self {
            attacker,
            defender,
            trials,
        }
    }

    /// Config for one side
    pub fn side(&self, side: Side) -> &CombatConfig {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    /// Reject configs that would produce meaningless statistics
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(OddsError::ZeroTrials);
        }
        self.attacker.validate(Side::Attacker)?;
        self.defender.validate(Side::Defender)?;
        Ok(())
    }

    /// Parse and validate a scenario from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let mut config = SimulationConfig::default();
        config.trials = 0;
        assert!(matches!(config.validate(), Err(OddsError::ZeroTrials)));
    }

    #[test]
    fn test_target_out_of_range_rejected() {
        let mut config = SimulationConfig::default();
        config.defender.target = 7;
        match config.validate() {
            Err(OddsError::TargetOutOfRange { side, target }) => {
                assert_eq!(side, Side::Defender);
                assert_eq!(target, 7);
            }
            other => panic!("expected TargetOutOfRange, got {:?}", other),
        }

        config.defender.target = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pools_are_valid() {
        let config = SimulationConfig::new(
            CombatConfig::new(0, 4, 0),
            CombatConfig::new(0, 4, 3),
            1,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_scenario() {
        let config = SimulationConfig::from_toml_str(
            r#"
            trials = 500

            [attacker]
            dice = 3
            target = 4
            rerolls = 1

            [defender]
            dice = 2
            target = 5
            "#,
        )
        .expect("scenario should parse");

        assert_eq!(config.trials, 500);
        assert_eq!(config.attacker, CombatConfig::new(3, 4, 1));
        assert_eq!(config.defender, CombatConfig::new(2, 5, 0));
        assert_eq!(config.side(Side::Attacker).dice, 3);
    }

    #[test]
    fn test_parse_toml_validates() {
        let result = SimulationConfig::from_toml_str(
            r#"
            trials = 0
            [attacker]
            dice = 1
            target = 4
            [defender]
            dice = 1
            target = 4
            "#,
        );
        assert!(matches!(result, Err(OddsError::ZeroTrials)));
    }

    #[test]
    fn test_parse_toml_rejects_negative_dice() {
        let result = SimulationConfig::from_toml_str(
            r#"
            trials = 10
            [attacker]
            dice = -1
            target = 4
            [defender]
            dice = 1
            target = 4
            "#,
        );
        assert!(matches!(result, Err(OddsError::ConfigParse(_))));
    }

    #[test]
    fn test_parse_toml_rejects_misspelled_side_key() {
        let result = SimulationConfig::from_toml_str(
            r#"
            trials = 10
            [attacker]
            dice = 3
            target = 4
            reroll = 2
            [defender]
            dice = 1
            target = 4
            "#,
        );
        assert!(matches!(result, Err(OddsError::ConfigParse(_))));
    }

    #[test]
    fn test_parse_toml_rejects_unknown_top_level_key() {
        let result = SimulationConfig::from_toml_str(
            r#"
            trials = 10
            simulations = 500
            [attacker]
            dice = 1
            target = 4
            [defender]
            dice = 1
            target = 4
            "#,
        );
        assert!(matches!(result, Err(OddsError::ConfigParse(_))));
    }
}
