//! Layout settings stored as TOML on disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::LayoutSettings;

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV_VAR: &str = "CALENDAR_LAYOUT_CONFIG";

const CONFIG_FILE_NAME: &str = "layout.toml";

/// Where settings are read from: `$CALENDAR_LAYOUT_CONFIG`, else the
/// platform config directory, else the working directory.
pub fn default_settings_path() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }

    if let Some(dirs) = ProjectDirs::from("com", "CalendarLayout", "CalendarLayout") {
        dirs.config_dir().join(CONFIG_FILE_NAME)
    } else {
        log::warn!("Unable to resolve project directory; using current dir for {CONFIG_FILE_NAME}");
        PathBuf::from(CONFIG_FILE_NAME)
    }
}

/// Load and validate settings; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<LayoutSettings> {
    if !path.exists() {
        log::debug!("No settings at {}; using defaults", path.display());
        return Ok(LayoutSettings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout settings from {}", path.display()))?;
    let settings: LayoutSettings = toml::from_str(&data)
        .with_context(|| format!("failed to parse layout settings in {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid layout settings in {}", path.display()))?;

    log::info!(
        "Loaded layout settings from {} (hours {}..={})",
        path.display(),
        settings.min_hour,
        settings.max_hour
    );
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &LayoutSettings) -> Result<()> {
    settings.validate().context("refusing to save invalid layout settings")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = toml::to_string_pretty(settings)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write layout settings to {}", path.display()))?;
    Ok(())
}
