//! Game configuration (window, assets, flight feel, camera). Loaded from config.ron at startup.

use flight::FlightConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use view::ChaseConfig;

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Directory (or URL prefix) model paths are resolved against.
    #[serde(default = "default_asset_base")]
    pub asset_base: String,
    /// Fixed seed for tree scatter. Random each run when unset.
    #[serde(default)]
    pub world_seed: Option<u64>,
    /// Ground height under the whole world.
    #[serde(default)]
    pub ground_y: f32,
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub chase: ChaseConfig,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_asset_base() -> String {
    ".".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            asset_base: default_asset_base(),
            world_seed: None,
            ground_y: 0.0,
            flight: FlightConfig::default(),
            chase: ChaseConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match Self::parse(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Parse RON text; flight tuning is sanitized on the way in.
    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: Self = ron::from_str(data)?;
        config.flight = config.flight.sanitized();
        Ok(config)
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// True when a `config.ron` is present to load from.
    pub fn exists() -> bool {
        config_path().is_file()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
