use std::fs;
use std::path::{Path, PathBuf};
use glob::Pattern;
use log::{error, info, warn};
use walkdir::WalkDir;
use crate::models::batch::BatchResult;
use crate::models::conversion::{ConversionOptions, TARGET_FORMAT};
use crate::service::traits::i_service::{BatchServiceTrait, ConverterTrait};
use crate::utils::utils::{format_file_size, ProgressManager};

pub const DEFAULT_PATTERN: &str = "*.md";
pub const DEFAULT_OUTPUT_SUBDIR: &str = "converted";

/// 目錄批量轉換服務，逐一、依檔名順序處理
pub struct BatchService {
    no_progress: bool,
}

impl BatchService {
    pub fn new(no_progress: bool) -> Self {
        BatchService { no_progress }
    }
}

impl BatchServiceTrait for BatchService {
    fn batch_convert(
        &self,
        converter: &dyn ConverterTrait,
        input_dir: &Path,
        output_dir: Option<&Path>,
        pattern: &str,
        options: &ConversionOptions,
    ) -> BatchResult {
        let output_dir = resolve_output_dir(input_dir, output_dir);
        let mut result = BatchResult::empty(input_dir, &output_dir, pattern);

        if !input_dir.is_dir() {
            let reason = format!("輸入目錄不存在：{}", input_dir.display());
            error!("{}", reason);
            result.abort(reason);
            return result;
        }
        if let Err(e) = fs::create_dir_all(&output_dir) {
            let reason = format!("無法建立輸出目錄 {}：{}", output_dir.display(), e);
            error!("{}", reason);
            result.abort(reason);
            return result;
        }

        let files = match collect_matching_files(input_dir, pattern) {
            Ok(files) => files,
            Err(e) => {
                error!("{}", e);
                result.abort(e);
                return result;
            }
        };
        if files.is_empty() {
            warn!("在 {} 中未找到符合 {} 的檔案", input_dir.display(), pattern);
            return result;
        }
        info!("找到 {} 個檔案待轉換，輸出目錄：{}", files.len(), output_dir.display());

        let progress = ProgressManager::new(files.len() as u64, self.no_progress);
        for (index, file) in files.iter().enumerate() {
            let file_name = file_key(file);
            progress.update(index as u64, &file_name);

            let output_file = output_dir.join(output_file_name(file));
            let conversion = converter.convert_file(file, &output_file, options);
            match (&conversion.error, conversion.size_bytes) {
                (None, Some(size)) => progress.println(&format!(
                    "✔ {} -> {}（{}）",
                    file_name,
                    output_file.display(),
                    format_file_size(size)
                )),
                (Some(e), _) => {
                    error!("轉換失敗 {}：{}", file_name, e);
                    progress.println(&format!("✘ {}：{}", file_name, e));
                }
                _ => {}
            }
            if conversion.is_engine_unavailable() {
                result.engine_unavailable = true;
            }
            result.record(file_name, conversion.succeeded());
        }
        progress.update(files.len() as u64, "");
        progress.finish(result.success_count, result.total_count);

        info!(
            "批量轉換完成：{}/{} 個檔案轉換成功",
            result.success_count, result.total_count
        );
        result
    }
}

pub fn resolve_output_dir(input_dir: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input_dir.join(DEFAULT_OUTPUT_SUBDIR),
    }
}

/// 列出目錄第一層中符合模式的一般檔案，依檔名排序
pub fn collect_matching_files(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, String> {
    let matcher = Pattern::new(pattern).map_err(|e| format!("無效的檔案匹配模式 '{}'：{}", pattern, e))?;
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("無法讀取目錄項目：{}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `X.md` -> `X.docx`
pub fn output_file_name(input: &Path) -> PathBuf {
    let name = input.file_name().map(PathBuf::from).unwrap_or_default();
    name.with_extension(TARGET_FORMAT)
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
