use std::io::{self, Write};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

pub const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

pub fn parse_log_level(log_level: &str) -> io::Result<log::LevelFilter> {
    match log_level {
        "debug" => Ok(log::LevelFilter::Debug),
        "info" => Ok(log::LevelFilter::Info),
        "warn" => Ok(log::LevelFilter::Warn),
        "error" => Ok(log::LevelFilter::Error),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無效的日誌等級：{}（可用：{}）", other, LOG_LEVELS.join(", ")),
        )),
    }
}

/// 初始化 env_logger；重複呼叫時沿用第一次的設定
pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = parse_log_level(log_level)?;
    let _ = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
    Ok(())
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress || total == 0 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn update(&self, count: u64, current: &str) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(format!("轉換：{}", current));
        self.pb.set_position(count);
    }

    pub fn finish(&self, succeeded: usize, total: usize) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        self.pb.finish_with_message(format!(
            "完成，成功 {}/{} 個檔案，耗時 {:.1} 秒",
            succeeded, total, elapsed
        ));
    }

    /// 進度條顯示期間輸出訊息，避免畫面錯亂
    pub fn println(&self, message: &str) {
        if self.no_progress || self.pb.is_hidden() {
            println!("{}", message);
        } else {
            self.pb.println(message);
        }
    }
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
