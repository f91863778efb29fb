use std::io;
use std::path::PathBuf;
use std::time::Duration;
use crate::models::conversion::ConversionOptions;
use crate::service::engine_locator::PROBE_TIMEOUT;

// 執行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Single {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    Batch {
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
        pattern: String,
    },
    WriteSample {
        path: PathBuf,
    },
}

// 引擎定位與執行設定，整個工作階段共用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub engine_path: Option<PathBuf>,
    pub probe_timeout: Duration,
    pub conversion_timeout: Option<Duration>,
    pub no_progress: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            engine_path: None,
            probe_timeout: PROBE_TIMEOUT,
            conversion_timeout: None,
            no_progress: false,
        }
    }
}

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: RunMode,
    pub options: ConversionOptions,
    pub engine: EngineSettings,
}

impl AppConfig {
    pub fn needs_engine(&self) -> bool {
        !matches!(self.mode, RunMode::WriteSample { .. })
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}
