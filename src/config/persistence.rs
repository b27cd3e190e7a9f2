//! Reading and writing `config.json`
//!
//! Settings live in `<config_dir>/contentmorph/`. Reads degrade to defaults,
//! writes go through a sibling file and a rename.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Directory under the platform config dir
const APP_NAME: &str = "contentmorph";

const CONFIG_FILE_NAME: &str = "config.json";

/// Staging file renamed over `config.json` on save
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Locations
// ─────────────────────────────────────────────────────────────────────────────

/// Directory holding the settings file:
///
/// - **Windows**: `%APPDATA%\contentmorph\`
/// - **macOS**: `~/Library/Application Support/contentmorph/`
/// - **Linux**: `~/.config/contentmorph/`
///
/// Fails with `Error::ConfigDirNotFound` on platforms without a config dir.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// `get_config_dir()` joined with `config.json`.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating settings directory {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Load
// ─────────────────────────────────────────────────────────────────────────────

/// Settings from the platform location, or defaults (with a warning) when
/// they cannot be read.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load and sanitize the settings stored at `config_path`.
///
/// A missing or empty file is not an error and yields defaults.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!("No settings at {}, starting from defaults", config_path.display());
        return Ok(Settings::default());
    }

    debug!("Reading settings from {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Settings file is blank, starting from defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!("Unreadable settings in {}: {}", config_path.display(), e);
        Error::ConfigParse {
            message: format!("{} is not valid settings JSON: {}", config_path.display(), e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("Loaded settings from {}", config_path.display());
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save
// ─────────────────────────────────────────────────────────────────────────────

/// Write settings to the platform location.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(settings, &get_config_file_path()?)
}

/// Write settings to `config_path` as pretty JSON.
///
/// The JSON lands in `config.json.bak` first and is then renamed over
/// `config_path`, so readers never see a half-written file.
pub fn save_config_to(settings: &Settings, config_path: &Path) -> Result<()> {
    ensure_parent_dir(config_path)?;
    let backup_path = config_path.with_file_name(CONFIG_BACKUP_NAME);

    debug!("Writing settings to {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, config_path).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!("Saved settings to {}", config_path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
