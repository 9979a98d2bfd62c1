use crate::phy::ModulatedSignal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::trace;

/// Additive White Gaussian Noise channel
///
/// Noise power is derived from the measured power of each input signal, so
/// the requested SNR holds for BPSK and QPSK alike. Each component (I and Q)
/// gets independent N(0, sigma) with sigma = sqrt(noise_power / 2).
///
/// The random source is injected; the generator keeps advancing across
/// calls so every SNR point sees fresh noise.
pub struct AwgnChannel<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> AwgnChannel<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a noisy copy of `signal` at `snr_db`
    pub fn add_noise(&mut self, signal: &ModulatedSignal, snr_db: f64) -> ModulatedSignal {
        let mut noisy = signal.clone();
        if signal.is_empty() {
            return noisy;
        }

        let power = signal_power(signal);
        let sigma = noise_std(power, snr_db);
        trace!(
            "AWGN: snr={} dB, signal_power={:.4}, sigma={:.6}",
            snr_db, power, sigma
        );

        for sample in noisy.samples_mut() {
            let n: f64 = self.rng.sample(StandardNormal);
            *sample += n * sigma;
        }
        noisy
    }
}

impl AwgnChannel<StdRng> {
    /// Reproducible noise
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

/// Mean per-symbol energy (squared norm over all components)
pub fn signal_power(signal: &ModulatedSignal) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let energy: f64 = signal.samples().iter().map(|x| x * x).sum();
    energy / signal.len() as f64
}

/// Per-component noise standard deviation for a given signal power and SNR
pub fn noise_std(signal_power: f64, snr_db: f64) -> f64 {
    let snr_linear = 10f64.powf(snr_db / 10.0);
    let noise_power = signal_power / snr_linear;
    (noise_power / 2.0).sqrt()
}
