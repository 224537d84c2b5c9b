//! Hub settings
//!
//! Settings live in an optional JSON file under the user's config
//! directory. Every field has a default, so a partial file (or no file at
//! all) is fine.

use crate::error::{HubError, HubResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_TRANSITION_MS: u64 = 1200;
pub const DEFAULT_PONG_WIN_SCORE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Integer scale applied to the 800x600 logical canvas
    pub window_scale: u32,

    /// How long the loading overlay runs before a game starts
    pub transition_ms: u64,

    /// Points needed to win a game of Pong
    pub pong_win_score: u32,

    /// Draw measured frames-per-second in the corner of every game
    pub show_fps: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        HubConfig {
            window_scale: 1,
            transition_ms: DEFAULT_TRANSITION_MS,
            pong_win_score: DEFAULT_PONG_WIN_SCORE,
            show_fps: false,
        }
    }
}

impl HubConfig {
    /// Default location: `<config dir>/game_hub/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("game_hub").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("./game_hub.json"))
    }

    /// Parse settings from JSON text and clamp them to usable ranges
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let config: HubConfig = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist
    pub fn load_from_file(path: impl AsRef<Path>) -> HubResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(HubConfig::default());
        }

        let text = fs::read_to_string(path).map_err(|source| HubError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = HubConfig::from_json_str(&text).map_err(|source| HubError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn sanitized(mut self) -> Self {
        self.window_scale = self.window_scale.clamp(1, 4);
        self.pong_win_score = self.pong_win_score.max(1);
        self
    }
}
