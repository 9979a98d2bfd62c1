use crate::error::SimResult;
use crate::phy::ModulatedSignal;
use crate::sim::{SimulationConfig, SimulationRun};
use crate::utils::consts::*;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written for one run
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub log_path: PathBuf,
    pub json_path: PathBuf,
    pub wav_path: Option<PathBuf>,
}

/// Keep ASCII alphanumerics, `-` and `_`; everything else becomes `_`
pub fn sanitize_file_component(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "empty".to_string()
    } else {
        cleaned
    }
}

/// `<message>_SNR_<min>_<max>_<step>_<MOD>_<timestamp>`
pub fn results_basename(config: &SimulationConfig, timestamp: &str) -> String {
    format!(
        "{}_SNR_{}_{}_{}_{}_{}",
        sanitize_file_component(&config.message),
        config.sweep.min_db,
        config.sweep.max_db,
        config.sweep.step_db,
        config.modulation.name(),
        timestamp
    )
}

pub fn save_run_log(entries: &[String], dir: &Path, timestamp: &str) -> SimResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("simulation_{}.log", timestamp));
    fs::write(&path, entries.join("\n"))?;
    info!("Log saved to: {}", path.display());
    Ok(path)
}

pub fn save_results_json(run: &SimulationRun, path: &Path) -> SimResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(run)?;
    fs::write(path, json)?;
    info!("Results saved to: {}", path.display());
    Ok(())
}

pub fn load_results_json(path: &Path) -> SimResult<SimulationRun> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Signal snapshot as 16-bit PCM, one channel per symbol component
/// (mono for BPSK, I/Q stereo for QPSK). Each symbol is held for
/// `SNAPSHOT_SAMPLES_PER_SYMBOL` samples.
pub fn write_signal_wav(signal: &ModulatedSignal, path: &Path) -> SimResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let spec = hound::WavSpec {
        channels: signal.components() as u16,
        sample_rate: SNAPSHOT_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    let amplitude = i16::MAX as f64;
    for symbol in signal.symbols() {
        for _ in 0..SNAPSHOT_SAMPLES_PER_SYMBOL {
            for &value in symbol {
                writer.write_sample((value.clamp(-1.0, 1.0) * amplitude) as i16)?;
            }
        }
    }
    writer.finalize()?;
    info!("Signal snapshot saved to: {}", path.display());
    Ok(())
}

/// Write the log, the results JSON and (when there is one) the signal snapshot
pub fn save_run(run: &SimulationRun, log_dir: &Path, results_dir: &Path) -> SimResult<RunArtifacts> {
    let timestamp = Local::now().format(FILE_TIMESTAMP_FORMAT).to_string();
    let log_path = save_run_log(&run.log, log_dir, &timestamp)?;

    let basename = results_basename(&run.config, &timestamp);
    let json_path = results_dir.join(format!("{}.json", basename));
    save_results_json(run, &json_path)?;

    let wav_path = match &run.last_modulated {
        Some(signal) if !signal.is_empty() => {
            let path = results_dir.join(format!("signal_{}.wav", basename));
            write_signal_wav(signal, &path)?;
            Some(path)
        }
        _ => None,
    };

    Ok(RunArtifacts {
        log_path,
        json_path,
        wav_path,
    })
}
