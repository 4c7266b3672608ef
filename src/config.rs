use crate::encoding::Encoding;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "bytebuf.toml";
pub const DEFAULT_LOG_FILTER: &str = "bytebuf=warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub input_encoding: Encoding,
    pub output_encoding: Encoding,
    pub json: bool,
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input_encoding: Encoding::Utf8,
            output_encoding: Encoding::Utf8,
            json: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Read the config file. A missing default file means defaults; a
    /// missing file named explicitly is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)?;
            let config: CliConfig = toml::from_str(&content)?;
            Ok(config)
        } else if config_path.is_some() {
            Err(anyhow!("config file not found: {}", config_file))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}
