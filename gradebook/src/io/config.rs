//! Gradebook configuration stored under `<data-dir>/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::summary::DEFAULT_REQUIRED_CREDITS;

pub const CONFIG_FILE: &str = "config.toml";

/// Gradebook configuration (TOML).
///
/// Edited by hand; missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GradebookConfig {
    /// Credits needed for degree completion (progress denominator).
    pub required_credits: u32,

    /// Decimal places when printing GPAs.
    pub precision: usize,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            required_credits: DEFAULT_REQUIRED_CREDITS,
            precision: 2,
        }
    }
}

impl GradebookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.required_credits == 0 {
            return Err(anyhow!("required_credits must be > 0"));
        }
        if self.precision == 0 || self.precision > 6 {
            return Err(anyhow!("precision must be between 1 and 6"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GradebookConfig::default()`.
pub fn load_config(path: &Path) -> Result<GradebookConfig> {
    if !path.exists() {
        return Ok(GradebookConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GradebookConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GradebookConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
