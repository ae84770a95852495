use anyhow::Result;
use megasena::FormatConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub format: FormatConfig,
}

pub fn load() -> Result<Config> {
    let format = FormatConfig::from_env()?;

    Ok(Config { format })
}
