use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// 單一檔案轉換的失敗原因，收斂在 ConversionResult 內，不會越過檔案邊界傳遞
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("輸入檔案不存在：{}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("找不到可用的 pandoc 轉換引擎")]
    EngineUnavailable,

    #[error("pandoc 執行失敗（{status}）：{stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("pandoc 執行完成但未生成輸出檔案：{}", .0.display())]
    OutputMissing(PathBuf),

    #[error("pandoc 執行逾時（{:?}）", .0)]
    Timeout(Duration),

    #[error("{context}：{source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ConvertError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_keeps_sub_second_limits() {
        assert_eq!(ConvertError::Timeout(Duration::from_millis(200)).to_string(), "pandoc 執行逾時（200ms）");
        assert_eq!(ConvertError::Timeout(Duration::from_secs(30)).to_string(), "pandoc 執行逾時（30s）");
    }
}
