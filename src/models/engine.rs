use std::ffi::OsStr;
use std::path::PathBuf;

/// 透過系統搜尋路徑解析時使用的執行檔名稱
pub const DEFAULT_ENGINE: &str = "pandoc";

/// 已驗證的 pandoc 引擎；`resolved_path` 為 None 代表交由 PATH 解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineHandle {
    pub resolved_path: Option<PathBuf>,
    pub version: Option<String>,
}

impl EngineHandle {
    pub fn at(path: PathBuf) -> Self {
        EngineHandle {
            resolved_path: Some(path),
            version: None,
        }
    }

    pub fn search_path() -> Self {
        EngineHandle {
            resolved_path: None,
            version: None,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn program(&self) -> &OsStr {
        match &self.resolved_path {
            Some(path) => path.as_os_str(),
            None => OsStr::new(DEFAULT_ENGINE),
        }
    }

    pub fn describe(&self) -> String {
        let location = match &self.resolved_path {
            Some(path) => path.display().to_string(),
            None => format!("{}（系統 PATH）", DEFAULT_ENGINE),
        };
        match &self.version {
            Some(version) => format!("{} v{}", location, version),
            None => location,
        }
    }
}
