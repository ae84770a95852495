use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().replace('_', "-").to_lowercase().as_str() {
            "pt-br" => Ok(Locale::PtBr),
            other => Err(anyhow::anyhow!("Unsupported locale: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// 10/06/2024
    #[default]
    Short,
    /// 10 de jun. de 2024
    Medium,
    /// 10 de junho de 2024
    Long,
}

impl FromStr for DateStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(DateStyle::Short),
            "medium" => Ok(DateStyle::Medium),
            "long" => Ok(DateStyle::Long),
            other => Err(anyhow::anyhow!("Unknown date style: {}", other)),
        }
    }
}

/// Options recognized by the locale formatter.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FormatConfig {
    pub locale: Locale,
    pub currency: String,
    pub date_style: DateStyle,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            locale: Locale::PtBr,
            currency: "BRL".to_string(),
            date_style: DateStyle::Short,
        }
    }
}

impl FormatConfig {
    pub fn from_vars(
        locale: Option<String>,
        currency: Option<String>,
        date_style: Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let locale = match locale {
            Some(value) => value.parse()?,
            None => defaults.locale,
        };

        let currency = match currency {
            Some(code) => {
                let code = code.trim().to_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(anyhow::anyhow!("Invalid currency code: {}", code));
                }
                code
            }
            None => defaults.currency,
        };

        let date_style = match date_style {
            Some(value) => value.parse()?,
            None => defaults.date_style,
        };

        Ok(Self {
            locale,
            currency,
            date_style,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var("LOTTERY_LOCALE").ok(),
            env::var("LOTTERY_CURRENCY").ok(),
            env::var("LOTTERY_DATE_STYLE").ok(),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub format: FormatConfig,
    pub data_dir: String,
}

pub fn load() -> Result<Config> {
    let format = FormatConfig::from_env()?;
    let data_dir = env::var("LOTTERY_DATA_DIR").unwrap_or_else(|_| "./json_data".to_string());

    Ok(Config { format, data_dir })
}
