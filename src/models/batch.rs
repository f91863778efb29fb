use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 批量轉換結果，以原始檔名為鍵，依檔名排序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pattern: String,
    pub per_file_results: BTreeMap<String, bool>,
    pub total_count: usize,
    pub success_count: usize,
    pub engine_unavailable: bool,
    /// 在轉換任何檔案前就中止的原因（輸入目錄不存在、無法建立輸出目錄等）
    pub aborted: Option<String>,
}

impl BatchResult {
    pub fn empty(input_dir: &Path, output_dir: &Path, pattern: &str) -> Self {
        BatchResult {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            pattern: pattern.to_string(),
            ..Default::default()
        }
    }

    pub fn abort(&mut self, reason: String) {
        self.aborted = Some(reason);
    }

    pub fn record(&mut self, file_name: String, succeeded: bool) {
        self.per_file_results.insert(file_name, succeeded);
        self.total_count = self.per_file_results.len();
        self.success_count = self.per_file_results.values().filter(|ok| **ok).count();
    }

    pub fn failure_count(&self) -> usize {
        self.total_count - self.success_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.aborted.is_none() && self.success_count == self.total_count
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &str> {
        self.per_file_results
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_recorded_entries() {
        let mut result = BatchResult::empty(Path::new("in"), Path::new("in/converted"), "*.md");
        result.record("a.md".to_string(), true);
        result.record("b.md".to_string(), false);
        result.record("c.md".to_string(), true);

        assert_eq!(result.total_count, 3);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count(), 1);
        assert_eq!(result.failed_files().collect::<Vec<_>>(), vec!["b.md"]);
        assert!(!result.all_succeeded());
    }

    #[test]
    fn aborted_batch_is_not_a_success() {
        let mut result = BatchResult::default();
        assert!(result.all_succeeded());

        result.abort("輸入目錄不存在：in".to_string());

        assert_eq!(result.total_count, 0);
        assert!(!result.all_succeeded());
    }

    #[test]
    fn re_recording_a_file_does_not_double_count() {
        let mut result = BatchResult::default();
        result.record("a.md".to_string(), false);
        result.record("a.md".to_string(), true);

        assert_eq!(result.total_count, 1);
        assert_eq!(result.success_count, 1);
    }
}
