use std::path::Path;
use crate::models::batch::BatchResult;
use crate::models::conversion::{ConversionOptions, ConversionRequest, ConversionResult};
use crate::models::engine::EngineHandle;

// Engine 定位接口，負責尋找可用的 pandoc
pub trait EngineLocatorTrait: Send + Sync {
    /// 依序探測候選路徑，回傳第一個驗證成功的引擎
    /// # 回傳
    /// - 找到時返回引擎資訊，全部失敗時返回 None（不視為錯誤）
    fn locate(&self) -> Option<EngineHandle>;
}

// 轉換服務接口，負責呼叫外部引擎
pub trait ConverterTrait: Send + Sync {
    /// 執行單次轉換
    /// # 參數
    /// - request: 來源、輸出路徑與轉換選項
    /// # 回傳
    /// - 轉換結果；所有失敗都收斂在結果內，不會以錯誤傳遞
    fn convert(&self, request: ConversionRequest) -> ConversionResult;

    /// 轉換 markdown 檔案
    fn convert_file(&self, input: &Path, output: &Path, options: &ConversionOptions) -> ConversionResult {
        self.convert(ConversionRequest::from_file(input, output, options.clone()))
    }

    /// 轉換記憶體中的 markdown 文字
    fn convert_text(&self, text: &str, output: &Path, options: &ConversionOptions) -> ConversionResult {
        self.convert(ConversionRequest::from_text(text, output, options.clone()))
    }
}

// 批量服務接口，負責目錄轉換
pub trait BatchServiceTrait: Send + Sync {
    /// 轉換目錄中符合模式的所有檔案
    /// # 參數
    /// - converter: 單檔轉換服務
    /// - input_dir: 輸入目錄
    /// - output_dir: 輸出目錄，None 時使用 `input_dir/converted`
    /// - pattern: shell 風格的檔名模式
    /// - options: 所有檔案共用的轉換選項
    /// # 回傳
    /// - 每個檔案的結果與統計
    fn batch_convert(
        &self,
        converter: &dyn ConverterTrait,
        input_dir: &Path,
        output_dir: Option<&Path>,
        pattern: &str,
        options: &ConversionOptions,
    ) -> BatchResult;
}
