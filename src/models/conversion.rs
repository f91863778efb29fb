use std::path::{Path, PathBuf};
use crate::error::ConvertError;

/// 來源格式固定為 markdown
pub const SOURCE_FORMAT: &str = "markdown";
/// 目標格式固定為 Word 文件
pub const TARGET_FORMAT: &str = "docx";

// 轉換選項，每次轉換以複本傳入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub use_table_of_contents: bool,
    pub number_sections: bool,
    pub reference_template: Option<PathBuf>,
    pub extra_arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionSource {
    File(PathBuf),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: ConversionSource,
    pub output_path: PathBuf,
    pub options: ConversionOptions,
}

impl ConversionRequest {
    pub fn from_file(input: &Path, output: &Path, options: ConversionOptions) -> Self {
        ConversionRequest {
            source: ConversionSource::File(input.to_path_buf()),
            output_path: output.to_path_buf(),
            options,
        }
    }

    pub fn from_text(text: &str, output: &Path, options: ConversionOptions) -> Self {
        ConversionRequest {
            source: ConversionSource::Text(text.to_string()),
            output_path: output.to_path_buf(),
            options,
        }
    }

    pub fn source_format(&self) -> &'static str {
        SOURCE_FORMAT
    }
}

/// 單次轉換結果；`size_bytes` 僅在成功時存在
#[derive(Debug)]
pub struct ConversionResult {
    pub output_path: PathBuf,
    pub size_bytes: Option<u64>,
    pub error: Option<ConvertError>,
}

impl ConversionResult {
    pub fn success(output_path: PathBuf, size_bytes: u64) -> Self {
        ConversionResult {
            output_path,
            size_bytes: Some(size_bytes),
            error: None,
        }
    }

    pub fn failure(output_path: PathBuf, error: ConvertError) -> Self {
        ConversionResult {
            output_path,
            size_bytes: None,
            error: Some(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_engine_unavailable(&self) -> bool {
        matches!(self.error, Some(ConvertError::EngineUnavailable))
    }
}
