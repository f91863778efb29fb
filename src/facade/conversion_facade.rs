use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::config::ports::{AppConfig, EngineSettings, RunMode};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::batch::BatchResult;
use crate::models::conversion::{ConversionOptions, ConversionResult, TARGET_FORMAT};
use crate::models::engine::EngineHandle;
use crate::models::outcome::ConversionOutput;
use crate::service::batch::BatchService;
use crate::service::engine_locator::EngineLocator;
use crate::service::pandoc::{is_markdown, PandocConverter};
use crate::service::sample::write_sample_markdown;
use crate::service::traits::i_service::{BatchServiceTrait, ConverterTrait, EngineLocatorTrait};

pub struct ConversionFacade {
    engine: Option<EngineHandle>,
    converter: Box<dyn ConverterTrait>,
    batch_service: Box<dyn BatchServiceTrait>,
}

impl ConversionFacade {
    pub fn new(
        engine: Option<EngineHandle>,
        converter: Box<dyn ConverterTrait>,
        batch_service: Box<dyn BatchServiceTrait>,
    ) -> Self {
        ConversionFacade {
            engine,
            converter,
            batch_service,
        }
    }

    /// 定位引擎一次，建立整個工作階段共用的 facade
    pub fn for_session(settings: &EngineSettings) -> Self {
        let locator = EngineLocator::for_host(settings.engine_path.as_deref(), settings.probe_timeout);
        Self::with_locator(&locator, settings)
    }

    pub fn with_locator(locator: &dyn EngineLocatorTrait, settings: &EngineSettings) -> Self {
        let engine = locator.locate();
        ConversionFacade::new(
            engine.clone(),
            Box::new(PandocConverter::new(engine, settings.conversion_timeout)),
            Box::new(BatchService::new(settings.no_progress)),
        )
    }

    /// 不需要引擎的工作階段（例如只寫出範例檔）
    pub fn without_engine(settings: &EngineSettings) -> Self {
        ConversionFacade::new(
            None,
            Box::new(PandocConverter::new(None, settings.conversion_timeout)),
            Box::new(BatchService::new(settings.no_progress)),
        )
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn engine(&self) -> Option<&EngineHandle> {
        self.engine.as_ref()
    }

    fn convert_single(&self, input: &Path, output: Option<&Path>, options: &ConversionOptions) -> ConversionResult {
        if input.exists() && !is_markdown(input) {
            warn!("輸入檔案副檔名不像 markdown，仍以 markdown 轉換：{}", input.display());
        }
        let output = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(input));
        self.converter.convert_file(input, &output, options)
    }

    fn convert_text(&self, text: &str, output: &Path, options: &ConversionOptions) -> ConversionResult {
        self.converter.convert_text(text, output, options)
    }

    fn convert_batch(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        pattern: &str,
        options: &ConversionOptions,
    ) -> BatchResult {
        self.batch_service
            .batch_convert(self.converter.as_ref(), input_dir, output_dir, pattern, options)
    }

    fn execute(&self, config: &AppConfig) -> io::Result<ConversionOutput> {
        match &config.mode {
            RunMode::Single { input, output } => {
                info!("開始單檔轉換，輸入：{}", input.display());
                Ok(ConversionOutput::Single(self.convert_single(input, output.as_deref(), &config.options)))
            }
            RunMode::Batch { input_dir, output_dir, pattern } => {
                info!("開始批量轉換，輸入目錄：{}，模式：{}", input_dir.display(), pattern);
                Ok(ConversionOutput::Batch(self.convert_batch(
                    input_dir,
                    output_dir.as_deref(),
                    pattern,
                    &config.options,
                )))
            }
            RunMode::WriteSample { path } => {
                write_sample_markdown(path)?;
                Ok(ConversionOutput::Sample(path.clone()))
            }
        }
    }
}

/// 未指定輸出時，在輸入旁產生同名 .docx
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(TARGET_FORMAT)
}
