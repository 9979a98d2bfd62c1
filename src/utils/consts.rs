/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

/// Width of the `=====` rules in the run log
pub const LOG_RULE_WIDTH: usize = 60;

/// Bits shown in log previews of bit strings
pub const BIT_PREVIEW_LEN: usize = 40;

// ============================================================================
// Simulation Defaults
// ============================================================================

/// Message used when none is given
pub const DEFAULT_MESSAGE: &str = "HELLO";

/// Lowest SNR in the default sweep (dB)
pub const DEFAULT_SNR_MIN_DB: i32 = 0;

/// Highest SNR in the default sweep (dB)
pub const DEFAULT_SNR_MAX_DB: i32 = 10;

/// SNR step of the default sweep (dB)
pub const DEFAULT_SNR_STEP_DB: i32 = 2;

/// Worker threads for `--threads` when not given
pub const DEFAULT_THREADS: usize = 1;

// ============================================================================
// Output
// ============================================================================

/// Directory for saved run logs
pub const LOG_DIR: &str = "logs";

/// Directory for result JSON and signal snapshots
pub const RESULTS_DIR: &str = "results";

/// Symbol rate used when a signal snapshot is written as WAV.
/// Only sets the playback speed of the file.
pub const SNAPSHOT_SAMPLE_RATE: u32 = 8000;

/// Samples per symbol in WAV snapshots, so each symbol is visible as a step
pub const SNAPSHOT_SAMPLES_PER_SYMBOL: usize = 8;

/// Timestamp format used in output file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Floor for BER bars on the log scale; matches the plotting floor of 1e-7
pub const BER_FLOOR: f64 = 1e-7;
