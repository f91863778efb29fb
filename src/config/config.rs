use clap::Parser;
use std::io;
use std::path::PathBuf;
use glob::Pattern;
use crate::service::batch::DEFAULT_PATTERN;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "md_to_docx",
    version,
    about = "使用 pandoc 將 Markdown 文件轉換為 Word (.docx)",
    long_about = "使用系統中已安裝的 pandoc 將 Markdown 轉換為 Word 文件，支援單一檔案或整個目錄的批量轉換，可加入目錄、章節編號與樣式範本。\n不帶任何參數執行時進入互動模式。\n`--` 之後的參數會原樣傳給 pandoc。",
    after_help = "使用範例：\n  md_to_docx document.md                 轉換為 document.docx\n  md_to_docx document.md output.docx     指定輸出檔案\n  md_to_docx document.md --toc           加入目錄\n  md_to_docx --batch ./docs ./output     批量轉換\n  md_to_docx                             互動模式"
)]
pub struct Cli {
    /// 輸入 markdown 檔案（--batch 時為目錄）
    pub input: Option<PathBuf>,
    /// 輸出 docx 檔案（--batch 時為目錄）
    pub output: Option<PathBuf>,
    /// 加入目錄
    #[arg(long, default_value_t = false)]
    pub toc: bool,
    /// 為章節編號
    #[arg(long, default_value_t = false)]
    pub number_sections: bool,
    /// 批量轉換模式
    #[arg(long, default_value_t = false)]
    pub batch: bool,
    /// 批量轉換時的檔案匹配模式
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,
    /// Word 樣式範本（reference docx）
    #[arg(long, value_name = "DOCX")]
    pub reference_doc: Option<PathBuf>,
    /// pandoc 執行檔路徑，或可在 PATH 中找到的程式名稱
    #[arg(long, env = "MD2DOCX_PANDOC", value_name = "PATH")]
    pub pandoc: Option<PathBuf>,
    /// 探測 pandoc 版本的逾時秒數
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub probe_timeout: u64,
    /// 單一檔案轉換的逾時秒數，預設不限制
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    /// 寫出範例 markdown 檔案後結束
    #[arg(long, value_name = "PATH")]
    pub write_sample: Option<PathBuf>,
    /// 額外傳給 pandoc 的參數
    #[arg(last = true, value_name = "PANDOC_ARGS")]
    pub extra_args: Vec<String>,
}

pub fn validate_input_pattern(pattern: &str) -> io::Result<()> {
    if pattern.trim().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "檔案匹配模式不可為空"));
    }
    if pattern.contains('/') || pattern.contains('\\') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("檔案匹配模式只比對檔名，不可包含路徑分隔符：{}", pattern),
        ));
    }
    Pattern::new(pattern)
        .map(|_| ())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的檔案匹配模式 '{}'：{}", pattern, e)))
}

pub fn validate_cli_args(cli: &Cli) -> io::Result<()> {
    if cli.input.is_none() && cli.write_sample.is_none() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "請指定輸入檔案或目錄"));
    }
    if cli.batch {
        validate_input_pattern(&cli.pattern)?;
    }
    if cli.probe_timeout == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "--probe-timeout 必須大於 0"));
    }
    if cli.timeout == Some(0) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "--timeout 必須大於 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("md_to_docx").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_single_file_flags() {
        let cli = parse(&["doc.md", "out.docx", "--toc", "--number-sections"]);
        assert_eq!(cli.input, Some(PathBuf::from("doc.md")));
        assert_eq!(cli.output, Some(PathBuf::from("out.docx")));
        assert!(cli.toc && cli.number_sections && !cli.batch);
        assert_eq!(cli.pattern, "*.md");
        assert!(validate_cli_args(&cli).is_ok());
    }

    #[test]
    fn collects_trailing_pandoc_args() {
        let cli = parse(&["doc.md", "--", "--standalone", "--toc-depth=2"]);
        assert_eq!(cli.extra_args, vec!["--standalone", "--toc-depth=2"]);
    }

    #[test]
    fn rejects_bad_batch_pattern() {
        let cli = parse(&["--batch", "docs", "--pattern", "[md"]);
        let err = validate_cli_args(&cli).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let cli = parse(&["--batch", "docs", "--pattern", "sub/*.md"]);
        assert!(validate_cli_args(&cli).is_err());
    }

    #[test]
    fn requires_input_unless_writing_sample() {
        let cli = parse(&["--toc"]);
        assert!(validate_cli_args(&cli).is_err());

        let cli = parse(&["--write-sample", "sample.md"]);
        assert!(validate_cli_args(&cli).is_ok());
    }

    #[test]
    fn rejects_zero_timeouts() {
        assert!(validate_cli_args(&parse(&["doc.md", "--probe-timeout", "0"])).is_err());
        assert!(validate_cli_args(&parse(&["doc.md", "--timeout", "0"])).is_err());
    }

    #[test]
    fn unknown_log_level_is_a_parse_error() {
        assert!(Cli::try_parse_from(["md_to_docx", "doc.md", "--log-level", "loud"]).is_err());
    }
}
