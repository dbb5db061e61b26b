use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constant::{ChipError, Const};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChipConfig {
    pub accuracy_factor: usize,
    pub range: usize,
    pub trading_days: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChipConfigPatch {
    #[serde(default, alias = "accuracyFactor")]
    pub accuracy_factor: Option<usize>,
    #[serde(default)]
    pub range: Option<usize>,
    #[serde(default, alias = "tradingDays")]
    pub trading_days: Option<usize>,
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            accuracy_factor: Const::DEFAULT_ACCURACY_FACTOR,
            range: 0,
            trading_days: Const::DEFAULT_TRADING_DAYS,
        }
    }
}

impl ChipConfig {
    pub fn new(accuracy_factor: usize, range: usize, trading_days: usize) -> Self {
        Self {
            accuracy_factor,
            range,
            trading_days,
        }
    }

    pub fn apply_patch(mut self, patch: ChipConfigPatch) -> Self {
        if let Some(v) = patch.accuracy_factor {
            self.accuracy_factor = v;
        }
        if let Some(v) = patch.range {
            self.range = v;
        }
        if let Some(v) = patch.trading_days {
            self.trading_days = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ChipError> {
        if self.accuracy_factor < Const::MIN_ACCURACY_FACTOR {
            return Err(ChipError::InvalidAccuracyFactor(self.accuracy_factor));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ChipError> {
        let patch: ChipConfigPatch = serde_yaml::from_str(yaml)?;
        let config = Self::default().apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ChipError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }
}
