use super::config::SimulationConfig;
use super::log::RunLog;
use super::run::{BerPoint, SimulationRun};
use crate::channel::AwgnChannel;
use crate::error::SimResult;
use crate::phy::{LineCode, ModulatedSignal, Modem, count_bit_errors, format_bits, text_to_bits};
use crate::utils::consts::{BIT_PREVIEW_LEN, LOG_RULE_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use tracing::debug;

/// Output of one pass through modulate -> channel -> demodulate -> decode
struct Transmission {
    modulated: ModulatedSignal,
    recovered: Vec<u8>,
    point: BerPoint,
}

fn transmit<R: Rng>(
    modem: &dyn Modem,
    line_code: &dyn LineCode,
    channel: &mut AwgnChannel<R>,
    bits: &[u8],
    coded: &[u8],
    snr_db: i32,
) -> Transmission {
    let modulated = modem.modulate(coded);
    debug_assert_eq!(modulated.len(), coded.len().div_ceil(modem.bits_per_symbol()));
    let noisy = channel.add_noise(&modulated, snr_db as f64);
    let demodulated = modem.demodulate(&noisy);
    let recovered = line_code.decode(&demodulated);
    let point = BerPoint::new(snr_db, count_bit_errors(bits, &recovered));
    Transmission {
        modulated,
        recovered,
        point,
    }
}

/// Seed for the sweep iteration at `index` when running in parallel
fn iteration_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Drives the bits -> line code -> SNR sweep pipeline.
///
/// Holds only the run log, which is reset by every call to a `run*` method.
#[derive(Default)]
pub struct Simulator {
    log: RunLog,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Sequential sweep, noise seeded from `config.seed` or OS entropy
    pub fn run(&mut self, config: &SimulationConfig) -> SimResult<SimulationRun> {
        self.run_with_progress(config, |_| {})
    }

    pub fn run_with_progress<F>(
        &mut self,
        config: &SimulationConfig,
        on_point: F,
    ) -> SimResult<SimulationRun>
    where
        F: FnMut(&BerPoint),
    {
        let mut channel = match config.seed {
            Some(seed) => AwgnChannel::seeded(seed),
            None => AwgnChannel::from_entropy(),
        };
        self.run_with_channel(config, &mut channel, on_point)
    }

    /// Sequential sweep with a caller-supplied noise source
    pub fn run_with_channel<R, F>(
        &mut self,
        config: &SimulationConfig,
        channel: &mut AwgnChannel<R>,
        mut on_point: F,
    ) -> SimResult<SimulationRun>
    where
        R: Rng,
        F: FnMut(&BerPoint),
    {
        let (bits, coded) = self.prepare(config)?;
        let modem = config.modulation.create();
        let line_code = config.line_coding.create();

        let mut points = Vec::new();
        let mut last = None;
        for snr_db in config.sweep.values() {
            let tx = transmit(
                modem.as_ref(),
                line_code.as_ref(),
                channel,
                &bits,
                &coded,
                snr_db,
            );
            self.record_point(config, &tx);
            on_point(&tx.point);
            points.push(tx.point);
            last = Some(tx);
        }

        Ok(self.finish(config, points, bits, coded, last))
    }

    /// Sweep with SNR points spread over `threads` workers.
    ///
    /// Every point gets its own generator: derived from `config.seed` and the
    /// point's index when a seed is set, otherwise from OS entropy. Results
    /// are put back in sweep order before logging. `on_point` is called in
    /// completion order.
    pub fn run_parallel<F>(
        &mut self,
        config: &SimulationConfig,
        threads: usize,
        mut on_point: F,
    ) -> SimResult<SimulationRun>
    where
        F: FnMut(&BerPoint),
    {
        let (bits, coded) = self.prepare(config)?;
        let snr_values = config.sweep.values();
        let workers = threads.clamp(1, snr_values.len().max(1));
        debug!("Parallel sweep: {} points on {} workers", snr_values.len(), workers);

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, i32)>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, Transmission)>();
        for job in snr_values.iter().copied().enumerate() {
            // receiver is alive until the scope below ends
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let mut results: Vec<(usize, Transmission)> = thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let (bits, coded) = (&bits, &coded);
                scope.spawn(move || {
                    let modem = config.modulation.create();
                    let line_code = config.line_coding.create();
                    for (index, snr_db) in job_rx.iter() {
                        let rng = match config.seed {
                            Some(seed) => StdRng::seed_from_u64(iteration_seed(seed, index)),
                            None => StdRng::from_os_rng(),
                        };
                        let mut channel = AwgnChannel::new(rng);
                        let tx = transmit(
                            modem.as_ref(),
                            line_code.as_ref(),
                            &mut channel,
                            bits,
                            coded,
                            snr_db,
                        );
                        if result_tx.send((index, tx)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            result_rx
                .iter()
                .inspect(|(_, tx)| on_point(&tx.point))
                .collect()
        });
        results.sort_by_key(|(index, _)| *index);

        let mut points = Vec::with_capacity(results.len());
        let mut last = None;
        for (_, tx) in results {
            self.record_point(config, &tx);
            points.push(tx.point);
            last = Some(tx);
        }

        Ok(self.finish(config, points, bits, coded, last))
    }

    /// Init, bit conversion and line coding
    fn prepare(&mut self, config: &SimulationConfig) -> SimResult<(Vec<u8>, Vec<u8>)> {
        self.log.clear();
        let rule = "=".repeat(LOG_RULE_WIDTH);
        self.log.record(&rule);
        self.log.record("STARTING SIMULATION");
        self.log.record(&rule);
        self.log.record(format!("Message: {:?}", config.message));
        self.log.record(format!("Modulation: {}", config.modulation.name()));
        self.log.record(format!("Line coding: {}", config.line_coding.name()));
        self.log.record(format!(
            "SNR: {} to {} dB (step {})",
            config.sweep.min_db, config.sweep.max_db, config.sweep.step_db
        ));

        self.log.record("STAGE 1: text -> bits");
        let bits = text_to_bits(&config.message)?;
        self.log.record(format!(
            "Text converted to {} bits: {}",
            bits.len(),
            format_bits(&bits, BIT_PREVIEW_LEN)
        ));

        self.log.record(format!("STAGE 2: {} encoding", config.line_coding.name()));
        let line_code = config.line_coding.create();
        let coded = line_code.encode(&bits);
        debug_assert_eq!(coded.len(), bits.len() * line_code.expansion());
        self.log.record(format!(
            "{} bits -> {} bits (x{}): {}",
            bits.len(),
            coded.len(),
            line_code.expansion(),
            format_bits(&coded, BIT_PREVIEW_LEN)
        ));

        self.log.record("STAGE 3: SNR sweep");
        Ok((bits, coded))
    }

    fn record_point(&mut self, config: &SimulationConfig, tx: &Transmission) {
        let point = &tx.point;
        self.log.record(format!("--- SNR = {} dB ---", point.snr_db));
        self.log.record(format!(
            "{}: {} symbols modulated ({} bits/symbol)",
            config.modulation.name(),
            tx.modulated.len(),
            config.modulation.bits_per_symbol()
        ));
        self.log.record(format!(
            "BER = {:.6} ({} errors in {} bits)",
            point.ber, point.errors, point.compared
        ));
    }

    fn finish(
        &mut self,
        config: &SimulationConfig,
        points: Vec<BerPoint>,
        original_bits: Vec<u8>,
        coded_bits: Vec<u8>,
        last: Option<Transmission>,
    ) -> SimulationRun {
        let rule = "=".repeat(LOG_RULE_WIDTH);
        self.log.record(&rule);
        self.log.record("SIMULATION COMPLETE");
        self.log.record(&rule);

        let (last_modulated, last_recovered) = match last {
            Some(tx) => (Some(tx.modulated), tx.recovered),
            None => (None, Vec::new()),
        };

        SimulationRun {
            config: config.clone(),
            points,
            original_bits,
            coded_bits,
            last_modulated,
            last_recovered,
            log: self.log.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::{LineCodingKind, Modulation};
    use crate::sim::SnrSweep;

    fn config(message: &str, modulation: Modulation, sweep: SnrSweep) -> SimulationConfig {
        SimulationConfig {
            message: message.to_string(),
            modulation,
            sweep,
            seed: Some(2024),
            ..Default::default()
        }
    }

    #[test]
    fn test_hi_bpsk_at_high_snr() {
        let mut sim = Simulator::new();
        let run = sim
            .run(&config("HI", Modulation::Bpsk, SnrSweep::new(100, 100, 1)))
            .unwrap();

        assert_eq!(run.original_bits.len(), 16);
        assert_eq!(run.coded_bits.len(), 32);
        let modulated = run.last_modulated.as_ref().unwrap();
        assert_eq!(modulated.len(), 32);
        assert!(modulated.samples().iter().all(|&x| x == 1.0 || x == -1.0));
        assert_eq!(run.last_recovered, run.original_bits);
        assert_eq!(run.points.len(), 1);
        assert_eq!(run.points[0].ber, 0.0);
    }

    #[test]
    fn test_qpsk_snapshot_shape() {
        let mut sim = Simulator::new();
        let run = sim
            .run(&config("HI", Modulation::Qpsk, SnrSweep::new(0, 4, 2)))
            .unwrap();
        let modulated = run.last_modulated.as_ref().unwrap();
        assert_eq!(modulated.components(), 2);
        assert_eq!(modulated.len(), 16);
        assert_eq!(run.snr_values(), vec![0, 2, 4]);
    }

    #[test]
    fn test_empty_message_gives_zero_ber() {
        let mut sim = Simulator::new();
        let run = sim
            .run(&config("", Modulation::Qpsk, SnrSweep::default()))
            .unwrap();
        assert!(run.original_bits.is_empty());
        assert!(run.coded_bits.is_empty());
        assert!(run.last_modulated.as_ref().is_some_and(|s| s.is_empty()));
        assert_eq!(run.points.len(), 6);
        assert!(run.points.iter().all(|p| p.ber == 0.0));
    }

    #[test]
    fn test_empty_sweep_gives_empty_series() {
        let mut sim = Simulator::new();
        let run = sim
            .run(&config("HI", Modulation::Bpsk, SnrSweep::new(10, 0, 2)))
            .unwrap();
        assert!(run.points.is_empty());
        assert!(run.last_modulated.is_none());
        assert_eq!(run.coded_bits.len(), 32);

        let run = sim
            .run(&config("HI", Modulation::Bpsk, SnrSweep::new(0, 10, 0)))
            .unwrap();
        assert!(run.points.is_empty());
    }

    #[test]
    fn test_wide_character_is_rejected() {
        let mut sim = Simulator::new();
        let result = sim.run(&config("π", Modulation::Bpsk, SnrSweep::default()));
        assert!(matches!(result, Err(crate::SimError::InputDomain { .. })));
    }

    #[test]
    fn test_log_is_reset_between_runs() {
        let mut sim = Simulator::new();
        let cfg = config("A", Modulation::Bpsk, SnrSweep::new(0, 0, 1));
        sim.run(&cfg).unwrap();
        let first = sim.log().entries().len();
        let run = sim.run(&cfg).unwrap();
        assert_eq!(sim.log().entries().len(), first);
        assert_eq!(run.log.len(), first);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cfg = config("HELLO", Modulation::Qpsk, SnrSweep::new(-6, 2, 2));
        let a = Simulator::new().run(&cfg).unwrap();
        let b = Simulator::new().run(&cfg).unwrap();
        assert_eq!(a.points, b.points);
        assert_eq!(a.last_modulated, b.last_modulated);
    }

    #[test]
    fn test_injected_channel() {
        let mut sim = Simulator::new();
        let mut channel = AwgnChannel::new(StdRng::seed_from_u64(5));
        let mut seen = Vec::new();
        let run = sim
            .run_with_channel(
                &config("OK", Modulation::Bpsk, SnrSweep::new(0, 6, 3)),
                &mut channel,
                |p| seen.push(p.snr_db),
            )
            .unwrap();
        assert_eq!(seen, vec![0, 3, 6]);
        assert_eq!(run.snr_values(), seen);
    }

    #[test]
    fn test_parallel_matches_sweep_order() {
        let cfg = config("PARALLEL", Modulation::Bpsk, SnrSweep::new(-10, 10, 1));
        let mut sim = Simulator::new();
        let mut callbacks = 0;
        let run = sim.run_parallel(&cfg, 4, |_| callbacks += 1).unwrap();

        assert_eq!(callbacks, 21);
        assert_eq!(run.snr_values(), (-10..=10).collect::<Vec<_>>());
        assert_eq!(run.last_modulated.as_ref().map(|s| s.len()), Some(128));

        // same seed, same per-point generators
        let again = Simulator::new().run_parallel(&cfg, 2, |_| {}).unwrap();
        assert_eq!(run.points, again.points);
    }

    #[test]
    fn test_parallel_empty_sweep() {
        let cfg = config("HI", Modulation::Qpsk, SnrSweep::new(4, 2, 1));
        let run = Simulator::new().run_parallel(&cfg, 8, |_| {}).unwrap();
        assert!(run.points.is_empty());
        assert!(run.last_modulated.is_none());
    }

    #[test]
    fn test_nrz_line_coding() {
        let cfg = SimulationConfig {
            line_coding: LineCodingKind::Nrz,
            ..config("HI", Modulation::Bpsk, SnrSweep::new(60, 60, 1))
        };
        let run = Simulator::new().run(&cfg).unwrap();
        assert_eq!(run.coded_bits, run.original_bits);
        assert_eq!(run.points[0].ber, 0.0);
    }

    #[test]
    fn test_log_reports_expansion_and_symbol_size() {
        let mut sim = Simulator::new();
        sim.run(&config("HI", Modulation::Qpsk, SnrSweep::new(0, 0, 1)))
            .unwrap();
        let entries = sim.log().entries();
        assert!(entries.iter().any(|e| e.contains("16 bits -> 32 bits (x2)")));
        assert!(entries.iter().any(|e| e.contains("16 symbols modulated (2 bits/symbol)")));
    }
}
