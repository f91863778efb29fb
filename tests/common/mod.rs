//! 整合測試共用的輔助函式

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// 假 pandoc：回報版本，轉換時把參數列與 stdin 寫入 `--output`；
/// 檔名以 `broken` 開頭的輸入會以非零狀態結束
pub const FAKE_PANDOC: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "pandoc 3.1.11"
  exit 0
fi
case "$(basename "$1")" in
  broken*)
    echo "pandoc: parse error" >&2
    exit 64
    ;;
esac
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

pub fn install_fake_pandoc(dir: &Path) -> PathBuf {
    install_fake_pandoc_as(dir, "pandoc")
}

pub fn install_fake_pandoc_as(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, FAKE_PANDOC).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn write_markdown(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("# {}\n\n內容。\n", name)).unwrap();
    path
}
