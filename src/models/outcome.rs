use std::path::PathBuf;
use crate::models::batch::BatchResult;
use crate::models::conversion::ConversionResult;

// Facade 執行一次配置後的產出
#[derive(Debug)]
pub enum ConversionOutput {
    Single(ConversionResult),
    Batch(BatchResult),
    Sample(PathBuf),
}

/// 程式結束狀態與對應的結束碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ConversionFailed,
    EngineUnavailable,
    UsageError,
    Cancelled,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::ConversionFailed => 1,
            Outcome::EngineUnavailable => 2,
            Outcome::UsageError => 3,
            Outcome::Cancelled => 130,
        }
    }
}

impl From<&ConversionOutput> for Outcome {
    fn from(output: &ConversionOutput) -> Self {
        match output {
            ConversionOutput::Single(result) if result.succeeded() => Outcome::Success,
            ConversionOutput::Single(result) if result.is_engine_unavailable() => Outcome::EngineUnavailable,
            ConversionOutput::Single(_) => Outcome::ConversionFailed,
            ConversionOutput::Batch(batch) if batch.aborted.is_some() => Outcome::ConversionFailed,
            ConversionOutput::Batch(batch) if batch.engine_unavailable => Outcome::EngineUnavailable,
            ConversionOutput::Batch(batch) if batch.all_succeeded() => Outcome::Success,
            ConversionOutput::Batch(_) => Outcome::ConversionFailed,
            ConversionOutput::Sample(_) => Outcome::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn maps_single_results() {
        let ok = ConversionOutput::Single(ConversionResult::success(PathBuf::from("a.docx"), 10));
        let missing = ConversionOutput::Single(ConversionResult::failure(
            PathBuf::from("a.docx"),
            ConvertError::SourceNotFound(PathBuf::from("a.md")),
        ));
        let no_engine = ConversionOutput::Single(ConversionResult::failure(PathBuf::from("a.docx"), ConvertError::EngineUnavailable));

        assert_eq!(Outcome::from(&ok).code(), 0);
        assert_eq!(Outcome::from(&missing).code(), 1);
        assert_eq!(Outcome::from(&no_engine).code(), 2);
    }

    #[test]
    fn maps_batch_results() {
        let mut batch = BatchResult::default();
        assert_eq!(Outcome::from(&ConversionOutput::Batch(batch.clone())), Outcome::Success);

        batch.record("a.md".to_string(), true);
        batch.record("b.md".to_string(), false);
        assert_eq!(Outcome::from(&ConversionOutput::Batch(batch.clone())), Outcome::ConversionFailed);

        batch.engine_unavailable = true;
        assert_eq!(Outcome::from(&ConversionOutput::Batch(batch)), Outcome::EngineUnavailable);
    }

    #[test]
    fn aborted_batch_is_a_failure() {
        let mut batch = BatchResult::default();
        batch.abort("輸入目錄不存在：docs".to_string());
        assert_eq!(Outcome::from(&ConversionOutput::Batch(batch)).code(), 1);
    }

    #[test]
    fn usage_and_cancel_codes() {
        assert_eq!(Outcome::UsageError.code(), 3);
        assert_eq!(Outcome::Cancelled.code(), 130);
    }
}
