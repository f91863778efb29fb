use std::process::ExitCode;

use md_to_docx::action::cli::process_args;
use md_to_docx::models::outcome::Outcome;

fn main() -> ExitCode {
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\n使用者取消操作");
        std::process::exit(i32::from(Outcome::Cancelled.code()));
    }) {
        log::warn!("無法註冊 Ctrl-C 處理：{}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    let outcome = process_args(args);
    log::info!("程式結束，狀態：{:?}", outcome);
    ExitCode::from(outcome.code())
}
