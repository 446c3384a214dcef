//! CLI configuration: the [ai] section of ~/.tally/config.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tally_ai::AiConfig;

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ai: AiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSection {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// Overrides the TALLY_AI_API_KEY environment variable when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = AiConfig::default();
        Self {
            ai: AiSection {
                model: defaults.model,
                base_url: defaults.base_url,
                temperature: defaults.temperature,
                api_key: None,
            },
        }
    }
}

impl AiSection {
    pub fn to_ai_config(&self) -> AiConfig {
        AiConfig {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            api_key: self.api_key.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
