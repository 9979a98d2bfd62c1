use super::config::SimulationConfig;
use crate::phy::{BitErrors, ModulatedSignal};
use serde::{Deserialize, Serialize};

/// BER measured at one SNR value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerPoint {
    pub snr_db: i32,
    pub ber: f64,
    pub errors: usize,
    pub compared: usize,
}

impl BerPoint {
    pub fn new(snr_db: i32, bit_errors: BitErrors) -> Self {
        Self {
            snr_db,
            ber: bit_errors.ber(),
            errors: bit_errors.errors,
            compared: bit_errors.compared,
        }
    }
}

/// Result of a full sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    pub config: SimulationConfig,
    /// Ascending by SNR
    pub points: Vec<BerPoint>,
    pub original_bits: Vec<u8>,
    pub coded_bits: Vec<u8>,
    /// Modulated signal from the last SNR tested, `None` for an empty sweep
    pub last_modulated: Option<ModulatedSignal>,
    /// Decoded bits from the last SNR tested
    pub last_recovered: Vec<u8>,
    #[serde(skip)]
    pub log: Vec<String>,
}

impl SimulationRun {
    pub fn snr_values(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.snr_db).collect()
    }

    pub fn ber_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ber).collect()
    }

    /// Lowest BER; ties go to the lowest SNR
    pub fn best(&self) -> Option<&BerPoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.ber < best.ber { p } else { best })
    }

    /// Highest BER; ties go to the lowest SNR
    pub fn worst(&self) -> Option<&BerPoint> {
        self.points
            .iter()
            .reduce(|worst, p| if p.ber > worst.ber { p } else { worst })
    }
}
