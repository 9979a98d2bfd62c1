use crate::sim::SimulationRun;
use crate::utils::consts::{BER_FLOOR, LOG_RULE_WIDTH};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

/// Bar length for a BER on a log scale from `BER_FLOOR` (empty) to 1 (full)
pub fn ber_bar_len(ber: f64) -> usize {
    let floor_exp = BER_FLOOR.log10();
    let exp = ber.max(BER_FLOOR).min(1.0).log10();
    let fraction = (exp - floor_exp) / -floor_exp;
    (fraction * BAR_WIDTH as f64).round() as usize
}

/// Text rendition of the BER vs SNR curve
pub fn format_ber_table(run: &SimulationRun) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "BER vs SNR | {:?} | {} | {}",
        run.config.message,
        run.config.line_coding.name(),
        run.config.modulation.name()
    );
    let _ = writeln!(out, "{:>8}  {:>10}  {:>12}  log10 scale", "SNR (dB)", "BER", "errors");
    for p in &run.points {
        let _ = writeln!(
            out,
            "{:>8}  {:>10.6}  {:>12}  |{}",
            p.snr_db,
            p.ber,
            format!("{}/{}", p.errors, p.compared),
            "#".repeat(ber_bar_len(p.ber))
        );
    }
    out
}

pub fn format_summary(run: &SimulationRun) -> String {
    let rule = "=".repeat(LOG_RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "FINAL STATISTICS");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Original message: {:?}", run.config.message);
    let _ = writeln!(out, "Original bits: {}", run.original_bits.len());
    let _ = writeln!(
        out,
        "Bits after {}: {}",
        run.config.line_coding.name(),
        run.coded_bits.len()
    );
    let _ = writeln!(out, "Modulation: {}", run.config.modulation.name());
    let _ = writeln!(out, "Line coding: {}", run.config.line_coding.name());
    let _ = writeln!(out, "Noise: AWGN (Additive White Gaussian Noise)");
    match (run.best(), run.worst()) {
        (Some(best), Some(worst)) => {
            let _ = writeln!(out, "Best BER: {:.6} (SNR = {} dB)", best.ber, best.snr_db);
            let _ = writeln!(out, "Worst BER: {:.6} (SNR = {} dB)", worst.ber, worst.snr_db);
        }
        _ => {
            let _ = writeln!(out, "No SNR points simulated");
        }
    }
    let _ = write!(out, "{}", rule);
    out
}
