use std::io;
use crate::config::ports::{AppConfig, ConfigPort, EngineSettings, RunMode};
use crate::models::conversion::ConversionOptions;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：不加目錄、不編號、無範本
pub struct DefaultConfigAdapter {
    mode: RunMode,
    engine: EngineSettings,
}

impl DefaultConfigAdapter {
    pub fn new(mode: RunMode, engine: EngineSettings) -> Self {
        DefaultConfigAdapter { mode, engine }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            mode: self.mode.clone(),
            options: ConversionOptions::default(),
            engine: self.engine.clone(),
        })
    }
}
