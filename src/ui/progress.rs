use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct ProgressManager {
    mp: MultiProgress,
    bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            mp: MultiProgress::new(),
            bars: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 创建新的进度条
    /// - `id`: 进度条唯一标识
    /// - `total`: 总进度值
    /// - `template`: 进度条模板
    /// - `message`: 初始消息
    pub fn create_bar(
        &self,
        id: &str,
        total: u64,
        template: &str,
        message: &str,
    ) -> Result<(), String> {
        let mut bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;

        if bars.contains_key(id) {
            return Err(format!("Progress bar '{}' already exists", id));
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| format!("Template error: {}", e))?
            .progress_chars("█▉▊▋▌▍▎▏ ");
        let pb = self
            .mp
            .add(ProgressBar::new(total));
        pb.set_style(style);
        pb.set_message(message.to_string());

        bars.insert(id.to_string(), pb);
        Ok(())
    }

    fn with_bar<T>(
        &self,
        id: &str,
        f: impl FnOnce(&ProgressBar) -> T,
    ) -> Result<T, String> {
        let bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        bars.get(id)
            .map(f)
            .ok_or_else(|| format!("Progress bar '{}' not found", id))
    }

    /// 增加进度条位置
    pub fn inc(&self, id: &str, value: u64) -> Result<(), String> {
        self.with_bar(id, |pb| pb.inc(value))
    }

    /// 更新进度条消息
    pub fn set_message(&self, id: &str, message: &str) -> Result<(), String> {
        self.with_bar(id, |pb| pb.set_message(message.to_string()))
    }

    /// 完成进度条（保留显示）
    pub fn finish(&self, id: &str, message: &str) -> Result<(), String> {
        self.with_bar(id, |pb| pb.finish_with_message(message.to_string()))
    }

    /// 完成所有进度条
    pub fn finish_all(&self) {
        if let Ok(mut bars) = self.bars.lock() {
            for (_, pb) in bars.drain() {
                pb.finish();
            }
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub mod templates {
    pub const SWEEP: &str =
        "SNR  [{bar:30.cyan}] {percent}% ({pos}/{len} points) {msg}";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_lifecycle() {
        let pm = ProgressManager::new();
        pm.create_bar("sweep", 3, templates::SWEEP, "start").unwrap();
        assert!(pm.create_bar("sweep", 3, templates::SWEEP, "again").is_err());

        pm.inc("sweep", 2).unwrap();
        pm.set_message("sweep", "SNR 4 dB").unwrap();
        pm.finish("sweep", "done").unwrap();

        assert!(pm.inc("missing", 1).is_err());
        assert!(pm.finish("missing", "done").is_err());
        pm.finish_all();
        assert!(pm.inc("sweep", 1).is_err());
        assert!(pm.finish("sweep", "done").is_err());
    }
}
