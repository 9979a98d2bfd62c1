use crate::error::SimResult;
use crate::phy::{Modulation, text_to_bits};
use crate::sim::{SimulationConfig, SnrSweep};
use dialoguer::{Confirm, Input, Select};
use tracing::warn;

/// Ask for message, modulation and SNR sweep, starting from `defaults`
pub fn prompt_config(defaults: &SimulationConfig) -> SimResult<SimulationConfig> {
    let message: String = Input::new()
        .with_prompt("Message (8-bit characters)")
        .default(defaults.message.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            text_to_bits(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let modulations = [Modulation::Bpsk, Modulation::Qpsk];
    let choice = Select::new()
        .with_prompt("Modulation")
        .items(&[
            "BPSK (Binary Phase Shift Keying)",
            "QPSK (Quadrature Phase Shift Keying)",
        ])
        .default(if defaults.modulation == Modulation::Qpsk { 1 } else { 0 })
        .interact()?;

    let sweep = loop {
        let min_db: i32 = Input::new()
            .with_prompt("Minimum SNR (dB)")
            .default(defaults.sweep.min_db)
            .interact_text()?;
        let max_db: i32 = Input::new()
            .with_prompt("Maximum SNR (dB)")
            .default(defaults.sweep.max_db)
            .interact_text()?;
        let step_db: i32 = Input::new()
            .with_prompt("SNR step (dB)")
            .default(defaults.sweep.step_db)
            .interact_text()?;

        let sweep = SnrSweep::new(min_db, max_db, step_db);
        match sweep.validate() {
            Ok(()) => break sweep,
            Err(e) => warn!("{}", e),
        }
    };

    Ok(SimulationConfig {
        message,
        modulation: modulations[choice],
        sweep,
        ..defaults.clone()
    })
}

pub fn ask_run_again() -> SimResult<bool> {
    Ok(Confirm::new()
        .with_prompt("Run another simulation?")
        .default(false)
        .interact()?)
}
