use std::io;
use clap::Parser;
use log::error;
use crate::action::interactive::process_interactive_mode;
use crate::action::report::report;
use crate::config::config::{validate_cli_args, Cli};
use crate::config::ports::{AppConfig, ConfigPort, EngineSettings, RunMode};
use crate::error::ConvertError;
use crate::facade::conversion_facade::{default_output_path, ConversionFacade};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOptions, ConversionResult};
use crate::models::outcome::{ConversionOutput, Outcome};
use crate::service::config_service::ConfigService;
use crate::utils::utils::setup_logging;
use std::time::Duration;

pub fn process_args(args: Vec<String>) -> Outcome {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help / --version 也走這條路，但不算錯誤
            return if e.use_stderr() { Outcome::UsageError } else { Outcome::Success };
        }
    };
    if let Err(e) = setup_logging(&cli.log_level) {
        eprintln!("{}", e);
        return Outcome::UsageError;
    }

    if cli.input.is_none() && cli.write_sample.is_none() {
        process_interactive_mode(engine_settings(&cli))
    } else {
        process_cli_mode(cli)
    }
}

pub fn process_cli_mode(cli: Cli) -> Outcome {
    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli)));
    let config = match config_service.get_config() {
        Ok(config) => config,
        Err(e) => {
            error!("參數錯誤：{}", e);
            eprintln!("{}", e);
            return if e.kind() == io::ErrorKind::InvalidInput { Outcome::UsageError } else { Outcome::ConversionFailed };
        }
    };
    run_config(&config)
}

/// 建立工作階段並執行一次配置
pub fn run_config(config: &AppConfig) -> Outcome {
    if let Some(output) = missing_single_input(config) {
        return report(&output);
    }
    let facade = if config.needs_engine() {
        ConversionFacade::for_session(&config.engine)
    } else {
        ConversionFacade::without_engine(&config.engine)
    };
    match facade.execute(config) {
        Ok(output) => report(&output),
        Err(e) => {
            error!("執行失敗：{}", e);
            eprintln!("執行失敗：{}", e);
            Outcome::ConversionFailed
        }
    }
}

/// 單檔輸入不存在時直接回報失敗，不先探測引擎
fn missing_single_input(config: &AppConfig) -> Option<ConversionOutput> {
    let RunMode::Single { input, output } = &config.mode else {
        return None;
    };
    if input.exists() {
        return None;
    }
    let output = output.clone().unwrap_or_else(|| default_output_path(input));
    Some(ConversionOutput::Single(ConversionResult::failure(
        output,
        ConvertError::SourceNotFound(input.clone()),
    )))
}

fn engine_settings(cli: &Cli) -> EngineSettings {
    EngineSettings {
        engine_path: cli.pandoc.clone(),
        probe_timeout: Duration::from_secs(cli.probe_timeout),
        conversion_timeout: cli.timeout.map(Duration::from_secs),
        no_progress: cli.no_progress,
    }
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_cli_args(&self.cli)?;

        let mode = match (&self.cli.write_sample, &self.cli.input) {
            (Some(path), _) => RunMode::WriteSample { path: path.clone() },
            (None, Some(input)) if self.cli.batch => RunMode::Batch {
                input_dir: input.clone(),
                output_dir: self.cli.output.clone(),
                pattern: self.cli.pattern.clone(),
            },
            (None, Some(input)) => RunMode::Single {
                input: input.clone(),
                output: self.cli.output.clone(),
            },
            (None, None) => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, "請指定輸入檔案或目錄"));
            }
        };

        Ok(AppConfig {
            mode,
            options: ConversionOptions {
                use_table_of_contents: self.cli.toc,
                number_sections: self.cli.number_sections,
                reference_template: self.cli.reference_doc.clone(),
                extra_arguments: self.cli.extra_args.clone(),
            },
            engine: engine_settings(&self.cli),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_for(args: &[&str]) -> io::Result<AppConfig> {
        let cli = Cli::try_parse_from(std::iter::once("md_to_docx").chain(args.iter().copied())).unwrap();
        CliConfigAdapter::new(cli).get_config()
    }

    #[test]
    fn builds_single_config() {
        let config = config_for(&["doc.md", "--toc", "--reference-doc", "ref.docx", "--", "--standalone"]).unwrap();
        assert_eq!(
            config.mode,
            RunMode::Single {
                input: PathBuf::from("doc.md"),
                output: None
            }
        );
        assert!(config.options.use_table_of_contents);
        assert!(!config.options.number_sections);
        assert_eq!(config.options.reference_template, Some(PathBuf::from("ref.docx")));
        assert_eq!(config.options.extra_arguments, vec!["--standalone"]);
        assert_eq!(config.engine.conversion_timeout, None);
    }

    #[test]
    fn builds_batch_config() {
        let config = config_for(&["--batch", "docs", "out", "--pattern", "*.markdown", "--timeout", "30"]).unwrap();
        assert_eq!(
            config.mode,
            RunMode::Batch {
                input_dir: PathBuf::from("docs"),
                output_dir: Some(PathBuf::from("out")),
                pattern: "*.markdown".to_string(),
            }
        );
        assert_eq!(config.engine.conversion_timeout, Some(Duration::from_secs(30)));
        assert!(config.needs_engine());
    }

    #[test]
    fn sample_mode_needs_no_engine() {
        let config = config_for(&["--write-sample", "sample.md"]).unwrap();
        assert!(!config.needs_engine());
    }

    #[test]
    fn invalid_pattern_is_usage_error() {
        let err = config_for(&["--batch", "docs", "--pattern", "[x"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn existing_single_input_is_left_to_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "# doc").unwrap();
        let config = config_for(&[input.to_str().unwrap()]).unwrap();
        assert!(missing_single_input(&config).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn missing_single_input_fails_before_locating_engine() {
        use crate::service::test_support::write_marking_engine;

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("probed");
        let engine = write_marking_engine(dir.path(), "pandoc", &marker);
        let input = dir.path().join("missing.md");
        let config = config_for(&[input.to_str().unwrap(), "--pandoc", engine.to_str().unwrap()]).unwrap();

        assert_eq!(run_config(&config), Outcome::ConversionFailed);
        assert!(!marker.exists());
    }

    #[test]
    fn help_is_not_an_error() {
        assert_eq!(process_args(vec!["md_to_docx".into(), "--help".into()]), Outcome::Success);
        assert_eq!(process_args(vec!["md_to_docx".into(), "--bogus".into()]), Outcome::UsageError);
    }
}
