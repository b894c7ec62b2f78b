//! Configuration loading and persistence.
//!
//! `mage.toml` holds the syntax theme, mouse-wheel scroll sensitivity and
//! history tuning. Every table and field is optional; anything missing takes
//! its default, and a file that fails to parse is ignored with a warning so a
//! typo never keeps the editor from starting. `ensure_written` materializes
//! the defaults on first run so the file can be opened and edited in place.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub mod places;

pub use places::{PlaceBook, SavedPlace};

pub const CONFIG_FILE_NAME: &str = "mage.toml";
pub const APP_DIR_NAME: &str = "mage";

/// An RGB triple.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub string: Rgb,
    pub function: Rgb,
    pub keyword: Rgb,
    pub name: Rgb,
    pub punctuation: Rgb,
    pub comment: Rgb,
    pub literal: Rgb,
    pub background: Rgb,
    pub gutter: Rgb,
    pub title: Rgb,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            string: [127, 173, 94],
            function: [199, 157, 78],
            keyword: [176, 95, 199],
            name: [245, 91, 102],
            punctuation: [127, 132, 142],
            comment: [127, 132, 142],
            literal: [194, 127, 64],
            background: [15, 15, 15],
            gutter: [50, 50, 50],
            title: [25, 25, 25],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Rows moved per mouse-wheel tick.
    pub sensitivity: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { sensitivity: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub coalesce_ms: u64,
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            coalesce_ms: 300,
            max_depth: 1000,
        }
    }
}

impl HistoryConfig {
    pub fn coalesce_window(&self) -> Duration {
        Duration::from_millis(self.coalesce_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub theme: ThemeConfig,
    pub scroll: ScrollConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file: ConfigFile,
    /// Where the file lives (or would be written).
    pub path: PathBuf,
}

impl Config {
    fn defaults_at(path: PathBuf) -> Self {
        Self {
            file: ConfigFile::default(),
            path,
        }
    }

    /// `places.toml` sits beside the settings file.
    pub fn places_path(&self) -> PathBuf {
        self.path.with_file_name(places::PLACES_FILE_NAME)
    }

    /// Write the defaults when no file exists yet. Returns true if a file was
    /// created.
    pub fn ensure_written(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        write_config(&self.path, &self.file)?;
        info!(target: "config", path = %self.path.display(), "config_written");
        Ok(true)
    }
}

/// Directory holding `config_path`, or `.` when it has none.
pub fn log_dir_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `./mage.toml` when present, else the platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::defaults_at(path));
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config { file, path })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::defaults_at(path))
        }
    }
}

fn write_config(path: &Path, file: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating config directory {}", dir.display()))?;
    }
    let text = toml::to_string_pretty(file).context("serializing default config")?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
