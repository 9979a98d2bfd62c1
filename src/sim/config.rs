use crate::error::{SimError, SimResult};
use crate::phy::{LineCodingKind, Modulation};
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive SNR sweep in whole dB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnrSweep {
    pub min_db: i32,
    pub max_db: i32,
    pub step_db: i32,
}

impl Default for SnrSweep {
    fn default() -> Self {
        Self {
            min_db: DEFAULT_SNR_MIN_DB,
            max_db: DEFAULT_SNR_MAX_DB,
            step_db: DEFAULT_SNR_STEP_DB,
        }
    }
}

impl SnrSweep {
    pub fn new(min_db: i32, max_db: i32, step_db: i32) -> Self {
        Self {
            min_db,
            max_db,
            step_db,
        }
    }

    /// Rejects sweeps that would produce no SNR points
    pub fn validate(&self) -> SimResult<()> {
        if self.step_db <= 0 {
            return Err(SimError::Configuration(format!(
                "SNR step must be positive, got {}",
                self.step_db
            )));
        }
        if self.min_db > self.max_db {
            return Err(SimError::Configuration(format!(
                "SNR minimum ({} dB) is above the maximum ({} dB)",
                self.min_db, self.max_db
            )));
        }
        Ok(())
    }

    /// SNR values from `min_db` up to and including `max_db` when it falls on
    /// a step. An invalid sweep yields nothing.
    pub fn values(&self) -> Vec<i32> {
        if self.step_db <= 0 || self.min_db > self.max_db {
            return Vec::new();
        }
        (self.min_db..=self.max_db)
            .step_by(self.step_db as usize)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub message: String,
    pub modulation: Modulation,
    pub line_coding: LineCodingKind,
    pub sweep: SnrSweep,
    /// Fixed noise seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            modulation: Modulation::Bpsk,
            line_coding: LineCodingKind::Manchester,
            sweep: SnrSweep::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.sweep.validate()
    }
}
