use std::fs;
use std::io;
use std::path::Path;
use log::info;

pub const SAMPLE_MARKDOWN: &str = include_str!("../../assets/sample/sample.md");

/// 寫出範例 markdown 檔案，供確認引擎與選項是否正常
pub fn write_sample_markdown(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, SAMPLE_MARKDOWN)?;
    info!("建立範例檔案：{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_sample_with_headings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("sample.md");

        write_sample_markdown(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# "));
        assert!(content.contains("## "));
        assert!(content.lines().count() >= 10);
    }
}
