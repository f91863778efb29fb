//! 單元測試用的假 pandoc 腳本

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// 回報版本，轉換時寫出 `PK` 標頭、參數列與 stdin 內容到 `--output`
pub const WORKING_ENGINE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "pandoc 3.1.11"
  exit 0
fi
args="$*"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--output" ]; then
    shift
    out="$1"
  fi
  shift
done
{ printf 'PK\n%s\n' "$args"; cat; } > "$out"
"#;

/// 版本探測成功，轉換時寫入 stderr 並以非零狀態結束
pub const CRASHING_ENGINE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "pandoc 2.19.2"
  exit 0
fi
echo "pandoc: unknown reader" >&2
exit 64
"#;

/// 結束狀態正常但不生成任何輸出
pub const SILENT_ENGINE: &str = r#"#!/bin/sh
exit 0
"#;

/// 版本探測失敗
pub const BROKEN_ENGINE: &str = r#"#!/bin/sh
exit 1
"#;

/// 每次都卡住；不用 exec，模擬包裝腳本留下仍握著管線的孫程序
pub const HANGING_ENGINE: &str = r#"#!/bin/sh
sleep 5
echo "pandoc 3.1.11"
"#;

pub fn write_engine(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// 被執行時建立 `marker` 檔案的引擎，用來確認是否被探測過
pub fn write_marking_engine(dir: &Path, name: &str, marker: &Path) -> PathBuf {
    let script = format!(
        "#!/bin/sh\ntouch '{}'\necho \"pandoc 3.0\"\nexit 0\n",
        marker.display()
    );
    write_engine(dir, name, &script)
}
