//! ConfigStore - Dashboard Configuration Storage
//!
//! TOML file in the platform config directory. An empty or missing file
//! yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::CONFIG_FILE_NAME;
use crate::domain::config::DashboardConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Locale;

/// Path of the config file, created empty when missing
pub fn get_config_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(CONFIG_FILE_NAME);
    if !path.exists() {
        fs::write(&path, "")?;
    }
    Ok(path)
}

/// Load the configuration from the default location
pub fn load_config() -> Result<DashboardConfig> {
    load_config_from(&get_config_path()?)
}

/// Load the configuration from `path`
pub fn load_config_from(path: &Path) -> Result<DashboardConfig> {
    info!(path = ?path, "Loading config file");
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }

    let value = fs::read_to_string(path)?;
    if value.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }

    Ok(toml::from_str(&value)?)
}

/// Save the configuration to the default location
pub fn save_config(config: &DashboardConfig) -> Result<()> {
    save_config_to(&get_config_path()?, config)
}

/// Save the configuration to `path`
pub fn save_config_to(path: &Path, config: &DashboardConfig) -> Result<()> {
    let value = toml::to_string(config)?;
    fs::write(path, value)?;
    info!(path = ?path, "Config saved");
    Ok(())
}

/// Locale from the config, falling back to the system locale
pub fn resolve_locale(config: &DashboardConfig) -> Locale {
    match config.locale.as_deref() {
        Some(tag) if !tag.trim().is_empty() => Locale::from_language_tag(tag),
        _ => Locale::from_language_tag(&locale_config::Locale::current().to_string()),
    }
}
