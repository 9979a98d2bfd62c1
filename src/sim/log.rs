use chrono::Local;
use tracing::debug;

/// Timestamped log of one simulation run.
///
/// Owned by the [`Simulator`](super::Simulator) and cleared at the start of
/// every run. Lines are mirrored to `tracing` at debug level as they are recorded.
#[derive(Debug, Default, Clone)]
pub struct RunLog {
    entries: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn record(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        debug!("{}", message);
        let timestamp = Local::now().format("%H:%M:%S");
        self.entries.push(format!("[{}] {}", timestamp, message));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
