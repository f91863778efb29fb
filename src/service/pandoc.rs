use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use log::{debug, info, warn};
use crate::error::ConvertError;
use crate::models::conversion::{ConversionRequest, ConversionResult, ConversionSource, TARGET_FORMAT};
use crate::models::engine::EngineHandle;
use crate::service::process::run_engine;
use crate::service::traits::i_service::ConverterTrait;

const STDERR_LIMIT: usize = 2000;

/// 透過 pandoc 將 markdown 轉為 docx 的服務
pub struct PandocConverter {
    engine: Option<EngineHandle>,
    timeout: Option<Duration>,
}

impl PandocConverter {
    /// 創建新的 PandocConverter 實例
    /// # 參數
    /// - engine: 已定位的引擎，None 時所有轉換回報 EngineUnavailable
    /// - timeout: 單次轉換的時間上限，None 表示不限制
    pub fn new(engine: Option<EngineHandle>, timeout: Option<Duration>) -> Self {
        PandocConverter { engine, timeout }
    }

    pub fn engine(&self) -> Option<&EngineHandle> {
        self.engine.as_ref()
    }

    fn run(&self, engine: &EngineHandle, request: &ConversionRequest) -> Result<u64, ConvertError> {
        if let Some(parent) = request.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConvertError::io(format!("無法建立輸出目錄 {}", parent.display()), e))?;
                debug!("建立輸出目錄：{}", parent.display());
            }
        }

        let mut command = Command::new(engine.program());
        command.args(build_arguments(request));
        let stdin = match &request.source {
            ConversionSource::Text(text) => Some(text.as_bytes()),
            ConversionSource::File(_) => None,
        };

        let output = match run_engine(&mut command, stdin, self.timeout) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                return Err(ConvertError::Timeout(self.timeout.unwrap_or_default()));
            }
            Err(e) => return Err(ConvertError::io(format!("無法啟動 {}", engine.describe()), e)),
        };

        // 以輸出檔是否存在作為成功依據，結束狀態只用於區分失敗原因
        match fs::metadata(&request.output_path) {
            Ok(metadata) => {
                if !output.status.success() {
                    warn!(
                        "pandoc 回傳 {}，但輸出檔已存在：{}",
                        output.status,
                        request.output_path.display()
                    );
                }
                Ok(metadata.len())
            }
            Err(_) if output.status.success() => Err(ConvertError::OutputMissing(request.output_path.clone())),
            Err(_) => Err(ConvertError::EngineFailed {
                status: output.status.to_string(),
                stderr: truncate(&output.stderr_text(), STDERR_LIMIT),
            }),
        }
    }
}

impl ConverterTrait for PandocConverter {
    fn convert(&self, request: ConversionRequest) -> ConversionResult {
        if let ConversionSource::File(input) = &request.source {
            if !input.exists() {
                return ConversionResult::failure(request.output_path, ConvertError::SourceNotFound(input.clone()));
            }
        }
        let Some(engine) = &self.engine else {
            return ConversionResult::failure(request.output_path, ConvertError::EngineUnavailable);
        };

        match &request.source {
            ConversionSource::File(input) => info!("轉換檔案：{} -> {}", input.display(), request.output_path.display()),
            ConversionSource::Text(text) => info!("轉換文字（{} 位元組）-> {}", text.len(), request.output_path.display()),
        }

        match self.run(engine, &request) {
            Ok(size) => ConversionResult::success(request.output_path, size),
            Err(e) => ConversionResult::failure(request.output_path, e),
        }
    }
}

/// 組合 pandoc 參數：輸入、格式與輸出，其後為樣式範本、目錄、章節編號，最後是額外參數
pub fn build_arguments(request: &ConversionRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    if let ConversionSource::File(input) = &request.source {
        args.push(input.as_os_str().to_owned());
    }
    args.push("--from".into());
    args.push(request.source_format().into());
    args.push("--to".into());
    args.push(TARGET_FORMAT.into());
    args.push("--output".into());
    args.push(request.output_path.as_os_str().to_owned());

    let options = &request.options;
    if let Some(template) = &options.reference_template {
        if template.exists() {
            args.push("--reference-doc".into());
            args.push(template.as_os_str().to_owned());
        } else {
            warn!("樣式範本不存在，略過：{}", template.display());
        }
    }
    if options.use_table_of_contents {
        args.push("--toc".into());
    }
    if options.number_sections {
        args.push("--number-sections".into());
    }
    args.extend(options.extra_arguments.iter().map(OsString::from));
    args
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// 便利函式：判斷路徑是否以 .md 類副檔名結尾
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown" | "mdown" | "mkd"))
        .unwrap_or(false)
}
