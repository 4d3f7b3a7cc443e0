// User settings and best times, persisted to disk as TOML
// Missing or broken files never stop the game: defaults are used instead

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::swp_config::{Adjustment, BoardConfig, Difficulty};
use crate::swp_records::BestTimes;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no usable settings location")]
    NoLocation,
    #[error("settings file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    // Difficulty selected last time
    pub difficulty: Difficulty,

    // Custom difficulty parameters
    pub custom_columns: usize,
    pub custom_rows: usize,
    pub custom_mines: usize,

    pub log_level: String, // "error", "warn", "info", "debug" or "trace"

    pub best: BestTimes,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::Beginner,
            custom_columns: 36,
            custom_rows: 20,
            custom_mines: 150,
            log_level: "warn".to_string(),
            best: BestTimes::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. Custom sizes are pulled into range
    /// and the custom difficulty is rebuilt from them.
    pub fn from_toml(s: &str) -> Result<Settings, SettingsError> {
        let mut settings: Settings = toml::from_str(s)?;
        settings.normalize();
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let s = fs::read_to_string(path)?;
        Settings::from_toml(&s)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let s = self.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, s)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = settings_path().ok_or(SettingsError::NoLocation)?;
        self.save_to(&path)
    }

    /// Board configuration for the selected difficulty
    pub fn board_config(&self) -> (BoardConfig, Vec<Adjustment>) {
        match self.difficulty {
            Difficulty::Custom {
                columns,
                rows,
                mines,
            } => BoardConfig::clamp(columns, rows, mines),
            preset => {
                let (c, r, m) = preset.params();
                BoardConfig::clamp(c, r, m)
            }
        }
    }

    /// Remember a difficulty, keeping custom sizes in their own fields
    pub fn select(&mut self, config: &BoardConfig) {
        self.difficulty = config.difficulty();
        if !self.difficulty.is_preset() {
            self.custom_columns = config.columns();
            self.custom_rows = config.rows();
            self.custom_mines = config.mines();
        }
    }

    fn normalize(&mut self) {
        let (cfg, adjustments) =
            BoardConfig::clamp(self.custom_columns, self.custom_rows, self.custom_mines);
        for a in &adjustments {
            warn!("settings: {}", a);
        }
        self.custom_columns = cfg.columns();
        self.custom_rows = cfg.rows();
        self.custom_mines = cfg.mines();
        if !self.difficulty.is_preset() {
            self.difficulty = Difficulty::Custom {
                columns: cfg.columns(),
                rows: cfg.rows(),
                mines: cfg.mines(),
            };
        }
    }
}

/// Get the settings file path
/// Uses the platform config directory (e.g. ~/.config/xtsweep/xtsweep.toml on Linux)
/// and falls back to the current directory if that is unavailable
pub fn settings_path() -> Option<PathBuf> {
    let name = env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().and_then(|s| s.to_str()).map(str::to_owned))
        .unwrap_or_else(|| "xtsweep".to_string());

    if let Some(proj) = ProjectDirs::from("com", "xhbl", &name) {
        let mut path = proj.config_dir().to_path_buf();
        path.push(format!("{}.toml", name));
        return Some(path);
    }
    env::current_dir().ok().map(|mut path| {
        path.push(format!("{}.toml", name));
        path
    })
}

/// Load settings from disk, or write and return defaults when there are none.
/// Errors are logged, never returned.
pub fn load_or_create() -> Settings {
    let Some(path) = settings_path() else {
        warn!("no settings location, using defaults");
        return Settings::default();
    };
    load_or_create_at(&path)
}

pub fn load_or_create_at(path: &Path) -> Settings {
    if path.exists() {
        match Settings::load(path) {
            Ok(settings) => return settings,
            Err(e) => warn!(path = %path.display(), "{}; using defaults", e),
        }
        // keep a broken file for the user to inspect
        return Settings::default();
    }

    let settings = Settings::default();
    if let Err(e) = settings.save_to(path) {
        warn!(path = %path.display(), "could not write default settings: {}", e);
    }
    settings
}
