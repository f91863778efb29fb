use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::{Path, PathBuf};
use log::warn;

use crate::action::report::report;
use crate::config::config::validate_input_pattern;
use crate::config::ports::{AppConfig, ConfigPort, EngineSettings, RunMode};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::ConversionOptions;
use crate::models::outcome::Outcome;
use crate::service::batch::DEFAULT_PATTERN;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Single,
    Batch,
    Exit,
}

pub fn process_interactive_mode(settings: EngineSettings) -> Outcome {
    println!("=== Markdown 轉 Word 互動模式 ===");
    let facade = ConversionFacade::for_session(&settings);
    match facade.engine() {
        Some(engine) => println!("使用 pandoc：{}", engine.describe()),
        None => println!("警告：未找到 pandoc，轉換將會失敗"),
    }

    loop {
        let choice = match get_menu_choice() {
            Ok(choice) => choice,
            Err(e) => {
                warn!("互動輸入中斷：{}", e);
                return Outcome::Cancelled;
            }
        };
        let mode = match choice {
            MenuChoice::Single => prompt_single_mode(),
            MenuChoice::Batch => prompt_batch_mode(),
            MenuChoice::Exit => {
                println!("再見！");
                return Outcome::Success;
            }
        };

        match mode.and_then(|mode| prompt_config(mode, &settings)) {
            Ok(config) => match facade.execute(&config) {
                Ok(output) => {
                    report(&output);
                }
                Err(e) => eprintln!("執行失敗：{}", e),
            },
            Err(e) => {
                warn!("互動輸入中斷：{}", e);
                return Outcome::Cancelled;
            }
        }
    }
}

fn prompt_single_mode() -> io::Result<RunMode> {
    Ok(RunMode::Single {
        input: get_input_file()?,
        output: get_output_path("請輸入輸出檔案路徑（Enter 使用預設：與輸入同名的 .docx）")?,
    })
}

fn prompt_batch_mode() -> io::Result<RunMode> {
    Ok(RunMode::Batch {
        input_dir: get_input_dir()?,
        output_dir: get_output_path("請輸入輸出目錄（Enter 使用預設：輸入目錄/converted）")?,
        pattern: get_pattern()?,
    })
}

fn prompt_config(mode: RunMode, settings: &EngineSettings) -> io::Result<AppConfig> {
    let config_port: Box<dyn ConfigPort> = if get_default_config_option()? {
        Box::new(DefaultConfigAdapter::new(mode, settings.clone()))
    } else {
        Box::new(InteractiveConfigAdapter::new(mode, settings.clone()))
    };
    ConfigService::new(config_port).get_config()
}

pub fn get_menu_choice() -> io::Result<MenuChoice> {
    let choice = Select::new()
        .with_prompt("請選擇操作（使用方向鍵選擇，按 Enter 確認）")
        .items(&["轉換單一檔案", "批量轉換目錄", "離開"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("操作選擇失敗: {}", e)))?;
    Ok(menu_choice_from_index(choice))
}

fn menu_choice_from_index(index: usize) -> MenuChoice {
    match index {
        0 => MenuChoice::Single,
        1 => MenuChoice::Batch,
        _ => MenuChoice::Exit,
    }
}

/// 去掉拖放路徑時常帶的引號
pub fn clean_path_input(raw: &str) -> String {
    raw.trim().trim_matches('"').trim_matches('\'').to_string()
}

pub fn get_input_file() -> io::Result<PathBuf> {
    Input::<String>::new()
        .with_prompt("請輸入 markdown 檔案路徑")
        .validate_with(|input: &String| -> Result<(), String> {
            let path = clean_path_input(input);
            if Path::new(&path).is_file() { Ok(()) } else { Err(format!("檔案 '{}' 不存在", path)) }
        })
        .interact_text()
        .map(|input| PathBuf::from(clean_path_input(&input)))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_input_dir() -> io::Result<PathBuf> {
    Input::<String>::new()
        .with_prompt("請輸入包含 markdown 檔案的目錄")
        .validate_with(|input: &String| -> Result<(), String> {
            let path = clean_path_input(input);
            if Path::new(&path).is_dir() { Ok(()) } else { Err(format!("目錄 '{}' 不存在", path)) }
        })
        .interact_text()
        .map(|input| PathBuf::from(clean_path_input(&input)))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_output_path(prompt: &str) -> io::Result<Option<PathBuf>> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let cleaned = clean_path_input(&raw);
    Ok(if cleaned.is_empty() { None } else { Some(PathBuf::from(cleaned)) })
}

pub fn get_pattern() -> io::Result<String> {
    Input::<String>::new()
        .with_prompt("請輸入檔案匹配模式")
        .default(DEFAULT_PATTERN.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            validate_input_pattern(input.trim()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map(|input| input.trim().to_string())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("匹配模式輸入失敗: {}", e)))
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設選項？（不加目錄、不編號、不使用樣式範本）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設選項選擇失敗: {}", e)))
}

pub fn get_conversion_options() -> io::Result<ConversionOptions> {
    let use_table_of_contents = Confirm::new()
        .with_prompt("是否加入目錄？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("目錄選項輸入失敗: {}", e)))?;
    let number_sections = Confirm::new()
        .with_prompt("是否為章節編號？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("章節編號選項輸入失敗: {}", e)))?;
    let template = Input::<String>::new()
        .with_prompt("樣式範本 docx 路徑（Enter 略過）")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("樣式範本輸入失敗: {}", e)))?;
    let template = clean_path_input(&template);

    Ok(ConversionOptions {
        use_table_of_contents,
        number_sections,
        reference_template: if template.is_empty() { None } else { Some(PathBuf::from(template)) },
        extra_arguments: Vec::new(),
    })
}

// 互動配置適配器
pub struct InteractiveConfigAdapter {
    mode: RunMode,
    engine: EngineSettings,
}

impl InteractiveConfigAdapter {
    pub fn new(mode: RunMode, engine: EngineSettings) -> Self {
        InteractiveConfigAdapter { mode, engine }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            mode: self.mode.clone(),
            options: get_conversion_options()?,
            engine: self.engine.clone(),
        })
    }
}
