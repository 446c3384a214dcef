//! The ~/.tally home directory and user settings.

use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tally_core::{Budgets, CategoryLists};

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn ensure_tally_home() -> Result<PathBuf> {
    let dir = tally_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("ledger.json"))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("settings.toml"))
}

/// User-owned settings: category lists, budget targets, presentation knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// First day of the week: "monday" or "sunday".
    pub week_start: String,
    /// Base color the chart palette is derived from.
    pub chart_color: String,
    pub categories: CategoryLists,
    pub budgets: Budgets,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_start: "monday".to_string(),
            chart_color: "#4F6BED".to_string(),
            categories: CategoryLists::default(),
            budgets: Budgets::new(),
        }
    }
}

impl Settings {
    pub fn week_start_day(&self) -> Weekday {
        match self.week_start.to_lowercase().as_str() {
            "sunday" => Weekday::Sun,
            _ => Weekday::Mon,
        }
    }
}

pub fn load_settings() -> Result<Settings> {
    let p = settings_path()?;
    if !p.exists() {
        return Ok(Settings::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse settings.toml")
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let p = settings_path()?;
    let s = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
