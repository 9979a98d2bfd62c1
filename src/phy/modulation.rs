//! Baseband BPSK and QPSK mapping with hard-decision demodulation
use crate::error::{SimError, SimResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Symbol stream stored flat, `components` values per symbol
/// (1 for BPSK, 2 for QPSK as I then Q).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SignalParts")]
pub struct ModulatedSignal {
    components: usize,
    samples: Vec<f64>,
}

/// Unchecked serde form of [`ModulatedSignal`]
#[derive(Deserialize)]
struct SignalParts {
    components: usize,
    samples: Vec<f64>,
}

impl TryFrom<SignalParts> for ModulatedSignal {
    type Error = SimError;

    fn try_from(parts: SignalParts) -> SimResult<Self> {
        ModulatedSignal::new(parts.components, parts.samples)
    }
}

impl ModulatedSignal {
    /// Fails when `components` is zero or `samples` does not split into
    /// whole symbols.
    pub fn new(components: usize, samples: Vec<f64>) -> SimResult<Self> {
        if components == 0 {
            return Err(SimError::Configuration(
                "a symbol needs at least one component".to_string(),
            ));
        }
        if samples.len() % components != 0 {
            return Err(SimError::Configuration(format!(
                "{} samples do not split into symbols of {} components",
                samples.len(),
                components
            )));
        }
        Ok(Self { components, samples })
    }

    /// Modems build whole symbols with a fixed non-zero component count
    fn from_symbols(components: usize, samples: Vec<f64>) -> Self {
        debug_assert!(components > 0 && samples.len() % components == 0);
        Self { components, samples }
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.samples.len() / self.components
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn symbols(&self) -> std::slice::ChunksExact<'_, f64> {
        self.samples.chunks_exact(self.components)
    }
}

/// Modulate / demodulate contract shared by all schemes
pub trait Modem: Send {
    fn bits_per_symbol(&self) -> usize;
    fn modulate(&self, bits: &[u8]) -> ModulatedSignal;
    fn demodulate(&self, signal: &ModulatedSignal) -> Vec<u8>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modulation {
    #[default]
    Bpsk,
    Qpsk,
}

impl Modulation {
    pub fn create(self) -> Box<dyn Modem> {
        match self {
            Modulation::Bpsk => Box::new(BpskModem),
            Modulation::Qpsk => Box::new(QpskModem),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Modulation::Bpsk => "BPSK",
            Modulation::Qpsk => "QPSK",
        }
    }

    pub fn bits_per_symbol(self) -> usize {
        match self {
            Modulation::Bpsk => 1,
            Modulation::Qpsk => 2,
        }
    }
}

/// 1 -> +1, 0 -> -1
pub struct BpskModem;

impl Modem for BpskModem {
    fn bits_per_symbol(&self) -> usize {
        1
    }

    fn modulate(&self, bits: &[u8]) -> ModulatedSignal {
        let samples = bits
            .iter()
            .map(|&bit| if bit == 1 { 1.0 } else { -1.0 })
            .collect();
        ModulatedSignal::from_symbols(1, samples)
    }

    fn demodulate(&self, signal: &ModulatedSignal) -> Vec<u8> {
        signal
            .samples()
            .iter()
            .map(|&x| if x > 0.0 { 1 } else { 0 })
            .collect()
    }
}

/// Bit pairs onto I/Q: a 0 bit maps to +1, a 1 bit to -1 on each axis.
///
/// Odd-length input gets a trailing 0 bit before mapping. The pad is not
/// removed on the way back, so demodulated output is always even length.
pub struct QpskModem;

impl Modem for QpskModem {
    fn bits_per_symbol(&self) -> usize {
        2
    }

    fn modulate(&self, bits: &[u8]) -> ModulatedSignal {
        let mut samples = Vec::with_capacity(bits.len() + 1);
        for chunk in bits.chunks(2) {
            let b1 = chunk[0];
            let b2 = chunk.get(1).copied().unwrap_or(0);
            samples.push(if b1 == 0 { 1.0 } else { -1.0 });
            samples.push(if b2 == 0 { 1.0 } else { -1.0 });
        }
        ModulatedSignal::from_symbols(2, samples)
    }

    fn demodulate(&self, signal: &ModulatedSignal) -> Vec<u8> {
        let mut bits = Vec::with_capacity(signal.len() * 2);
        for symbol in signal.symbols() {
            let (i, q) = (symbol[0], symbol[1]);
            bits.push(if i > 0.0 { 0 } else { 1 });
            bits.push(if q > 0.0 { 0 } else { 1 });
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpsk_modulation_demodulation() {
        let modem = Modulation::Bpsk.create();
        let test_bits = vec![1, 0, 1, 1, 0, 0, 1, 0, 1];
        let modulated = modem.modulate(&test_bits);

        assert_eq!(modulated.len(), test_bits.len());
        assert_eq!(modulated.samples()[..3], [1.0, -1.0, 1.0]);
        assert_eq!(modem.demodulate(&modulated), test_bits);
    }

    #[test]
    fn test_bpsk_zero_amplitude_decides_zero() {
        let signal = ModulatedSignal::new(1, vec![0.0, -0.0, 1e-9]).unwrap();
        assert_eq!(BpskModem.demodulate(&signal), vec![0, 0, 1]);
    }

    #[test]
    fn test_qpsk_mapping() {
        let modulated = QpskModem.modulate(&[0, 0, 0, 1, 1, 0, 1, 1]);
        let symbols: Vec<&[f64]> = modulated.symbols().collect();
        assert_eq!(symbols[0], [1.0, 1.0]);
        assert_eq!(symbols[1], [1.0, -1.0]);
        assert_eq!(symbols[2], [-1.0, 1.0]);
        assert_eq!(symbols[3], [-1.0, -1.0]);
    }

    #[test]
    fn test_qpsk_round_trip_even_length() {
        let modem = Modulation::Qpsk.create();
        let bits = vec![1, 0, 0, 1, 1, 1, 0, 0, 1, 0];
        let modulated = modem.modulate(&bits);
        assert_eq!(modulated.len(), 5);
        assert_eq!(modem.demodulate(&modulated), bits);
    }

    #[test]
    fn test_qpsk_odd_length_is_padded() {
        let bits = vec![1, 0, 1];
        let modulated = QpskModem.modulate(&bits);
        assert_eq!(modulated.len(), 2);
        // pad bit survives demodulation
        assert_eq!(QpskModem.demodulate(&modulated), vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_empty_input() {
        for modulation in [Modulation::Bpsk, Modulation::Qpsk] {
            let modem = modulation.create();
            let modulated = modem.modulate(&[]);
            assert!(modulated.is_empty());
            assert!(modem.demodulate(&modulated).is_empty());
        }
    }

    #[test]
    fn test_signal_shape_is_checked() {
        assert!(ModulatedSignal::new(0, Vec::new()).is_err());
        assert!(ModulatedSignal::new(2, vec![1.0, -1.0, 1.0]).is_err());
        assert_eq!(ModulatedSignal::new(2, vec![1.0, -1.0]).unwrap().len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_bad_shape() {
        let zero: Result<ModulatedSignal, _> =
            serde_json::from_str(r#"{"components":0,"samples":[]}"#);
        assert!(zero.is_err());

        let ragged: Result<ModulatedSignal, _> =
            serde_json::from_str(r#"{"components":2,"samples":[1.0,-1.0,1.0]}"#);
        let message = ragged.unwrap_err().to_string();
        assert!(message.contains("do not split"), "{message}");
    }

    #[test]
    fn test_deserialize_round_trip() {
        let signal = QpskModem.modulate(&[0, 1, 1, 0]);
        let json = serde_json::to_string(&signal).unwrap();
        let back: ModulatedSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signal);
    }

    #[test]
    fn test_bits_per_symbol_matches_modem() {
        for modulation in [Modulation::Bpsk, Modulation::Qpsk] {
            let modem = modulation.create();
            assert_eq!(modem.bits_per_symbol(), modulation.bits_per_symbol());
            let signal = modem.modulate(&[1, 0, 1, 1, 0, 0]);
            assert_eq!(signal.len() * modem.bits_per_symbol(), 6);
        }
    }
}
