use std::io;
use std::path::Path;
use crate::config::ports::AppConfig;
use crate::models::batch::BatchResult;
use crate::models::conversion::{ConversionOptions, ConversionResult};
use crate::models::engine::EngineHandle;
use crate::models::outcome::ConversionOutput;

// Facade 接口，負責協調一次轉換工作階段
pub trait ConversionFacadeTrait: Send + Sync {
    /// 本工作階段定位到的引擎
    fn engine(&self) -> Option<&EngineHandle>;

    /// 轉換單一檔案
    /// # 參數
    /// - input: markdown 檔案
    /// - output: 輸出路徑，None 時使用與輸入同名的 .docx
    /// - options: 轉換選項
    fn convert_single(&self, input: &Path, output: Option<&Path>, options: &ConversionOptions) -> ConversionResult;

    fn convert_text(&self, text: &str, output: &Path, options: &ConversionOptions) -> ConversionResult;

    fn convert_batch(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        pattern: &str,
        options: &ConversionOptions,
    ) -> BatchResult;

    /// 依配置執行轉換
    /// # 參數
    /// - config: 執行模式與選項
    /// # 回傳
    /// - 轉換產出；只有寫出範例檔失敗時回傳 IO 錯誤
    fn execute(&self, config: &AppConfig) -> io::Result<ConversionOutput>;
}
