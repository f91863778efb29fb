use crate::models::batch::BatchResult;
use crate::models::conversion::ConversionResult;
use crate::models::outcome::{ConversionOutput, Outcome};
use crate::utils::utils::format_file_size;

const INSTALL_HINT: &str = "請安裝 pandoc（https://pandoc.org/installing.html），或以 --pandoc / MD2DOCX_PANDOC 指定執行檔路徑";

/// 輸出轉換摘要並回傳對應的結束狀態
pub fn report(output: &ConversionOutput) -> Outcome {
    match output {
        ConversionOutput::Single(result) => report_single(result),
        ConversionOutput::Batch(batch) => report_batch(batch),
        ConversionOutput::Sample(path) => println!("已建立範例檔案：{}", path.display()),
    }
    let outcome = Outcome::from(output);
    if outcome == Outcome::EngineUnavailable {
        eprintln!("{}", INSTALL_HINT);
    }
    outcome
}

fn report_single(result: &ConversionResult) {
    match (&result.error, result.size_bytes) {
        (None, Some(size)) => {
            println!("轉換完成！輸出檔案位於：{}", result.output_path.display());
            println!("檔案大小：{}", format_file_size(size));
        }
        (Some(e), _) => eprintln!("轉換失敗：{}", e),
        (None, None) => {}
    }
}

fn report_batch(batch: &BatchResult) {
    if let Some(reason) = &batch.aborted {
        eprintln!("批量轉換中止：{}", reason);
        return;
    }
    if batch.total_count == 0 {
        println!("在 {} 中未找到符合 {} 的檔案", batch.input_dir.display(), batch.pattern);
        return;
    }
    println!(
        "批量轉換完成：{}/{} 個檔案轉換成功",
        batch.success_count, batch.total_count
    );
    println!("輸出目錄：{}", batch.output_dir.display());
    let failed: Vec<&str> = batch.failed_files().collect();
    if !failed.is_empty() {
        eprintln!("失敗的檔案：{}", failed.join(", "));
    }
}
