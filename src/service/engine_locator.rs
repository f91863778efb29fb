use std::path::{Component, Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;
use log::{debug, info, warn};
use regex::Regex;
use crate::models::engine::{EngineHandle, DEFAULT_ENGINE};
use crate::service::process::run_engine;
use crate::service::traits::i_service::EngineLocatorTrait;

/// 版本探測的預設逾時
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCandidate {
    /// 固定的安裝路徑，探測前先確認檔案存在
    Path(PathBuf),
    /// 使用者指定的程式名稱（不含目錄），交由系統 PATH 解析
    Program(PathBuf),
    /// 交由系統 PATH 解析 `pandoc`
    SearchPath,
}

/// 依序探測候選路徑的引擎定位服務
pub struct EngineLocator {
    candidates: Vec<EngineCandidate>,
    probe_timeout: Duration,
}

impl EngineLocator {
    pub fn new(candidates: Vec<EngineCandidate>, probe_timeout: Duration) -> Self {
        EngineLocator { candidates, probe_timeout }
    }

    /// 依目前平台建立候選清單：指定路徑、常見安裝目錄，最後是系統 PATH
    pub fn for_host(override_path: Option<&Path>, probe_timeout: Duration) -> Self {
        let mut candidates = Vec::new();
        if let Some(path) = override_path {
            if path.exists() {
                candidates.push(EngineCandidate::Path(path.to_path_buf()));
            } else if is_bare_name(path) {
                candidates.push(EngineCandidate::Program(path.to_path_buf()));
            } else {
                warn!("指定的 pandoc 路徑不存在：{}，改為自動尋找", path.display());
            }
        }
        candidates.extend(host_install_paths().into_iter().map(EngineCandidate::Path));
        candidates.push(EngineCandidate::SearchPath);
        EngineLocator::new(candidates, probe_timeout)
    }

    pub fn candidates(&self) -> &[EngineCandidate] {
        &self.candidates
    }

    fn probe(&self, program: &Path) -> Option<Option<String>> {
        let output = match run_engine(Command::new(program).arg("--version"), None, Some(self.probe_timeout)) {
            Ok(output) => output,
            Err(e) => {
                debug!("探測 {} 失敗：{}", program.display(), e);
                return None;
            }
        };
        if !output.status.success() {
            debug!("探測 {} 回傳 {}", program.display(), output.status);
            return None;
        }
        Some(parse_version(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl EngineLocatorTrait for EngineLocator {
    fn locate(&self) -> Option<EngineHandle> {
        for candidate in &self.candidates {
            let handle = match candidate {
                EngineCandidate::Path(path) => {
                    if !path.exists() {
                        continue;
                    }
                    self.probe(path)
                        .map(|version| EngineHandle::at(path.clone()).with_version(version))
                }
                EngineCandidate::Program(name) => self
                    .probe(name)
                    .map(|version| EngineHandle::at(name.clone()).with_version(version)),
                EngineCandidate::SearchPath => self
                    .probe(Path::new(DEFAULT_ENGINE))
                    .map(|version| EngineHandle::search_path().with_version(version)),
            };
            if let Some(handle) = handle {
                info!("使用 pandoc：{}", handle.describe());
                return Some(handle);
            }
        }
        warn!("未找到可用的 pandoc，已探測 {} 個候選位置", self.candidates.len());
        None
    }
}

fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// 從 `pandoc --version` 的第一行取出版本號
pub fn parse_version(stdout: &str) -> Option<String> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    let re = VERSION.get_or_init(|| {
        Regex::new(r"^pandoc(?:\.exe)?\s+v?(\d+(?:\.\d+)*)").expect("版本正規表示式無效")
    });
    let first_line = stdout.lines().next()?.trim();
    re.captures(first_line).map(|caps| caps[1].to_string())
}

#[cfg(windows)]
fn host_install_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(r"C:\Program Files\Pandoc\pandoc.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Pandoc\pandoc.exe"),
    ];
    if let Some(local) = dirs::data_local_dir() {
        paths.push(local.join("Pandoc").join("pandoc.exe"));
    }
    paths.push(PathBuf::from(r"C:\ProgramData\chocolatey\bin\pandoc.exe"));
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("scoop").join("apps").join("pandoc").join("current").join("pandoc.exe"));
    }
    paths
}

#[cfg(target_os = "macos")]
fn host_install_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/opt/homebrew/bin/pandoc"),
        PathBuf::from("/usr/local/bin/pandoc"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".local").join("bin").join("pandoc"));
    }
    paths
}

#[cfg(all(not(windows), not(target_os = "macos")))]
fn host_install_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/usr/bin/pandoc"),
        PathBuf::from("/usr/local/bin/pandoc"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".local").join("bin").join("pandoc"));
        paths.push(home.join(".cabal").join("bin").join("pandoc"));
    }
    paths
}
