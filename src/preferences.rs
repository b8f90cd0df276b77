//! Editor preferences.
//!
//! Stored as pretty JSON. Every field has a default, so files written by
//! older versions (or edited by hand) load with missing keys filled in.

use crate::constants::DEFAULT_MARCHING_ANTS_INTERVAL;
use crate::error::{PreferencesError, PreferencesResult};
use crate::playback::PlaybackOptions;
use crate::tools::RightClickMode;
use crate::types::{FlagName, Size, ZoomBehavior};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const FILE_NAME: &str = "editor.json";
const APP_DIR: &str = "editor-canvas";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Anchor used by keyboard and menu zoom.
    pub zoom_behavior: ZoomBehavior,
    /// Plain wheel zooms instead of scrolling.
    pub zoom_with_wheel: bool,
    /// Scroll while a drag leaves the viewport.
    pub auto_scroll: bool,
    pub right_click_mode: RightClickMode,
    pub playback: PlaybackOptions,
    /// Flags a new editor starts with.
    pub default_flags: Vec<FlagName>,
    /// Grid cell size in document pixels.
    pub grid_size: Size,
    pub marching_ants_interval_ms: u64,
    pub show_brush_preview: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            zoom_behavior: ZoomBehavior::Center,
            zoom_with_wheel: false,
            auto_scroll: true,
            right_click_mode: RightClickMode::default(),
            playback: PlaybackOptions::default(),
            default_flags: vec![
                FlagName::Grid,
                FlagName::Mask,
                FlagName::Onionskin,
                FlagName::Outside,
                FlagName::Decorators,
            ],
            grid_size: Size::new(16, 16),
            marching_ants_interval_ms: DEFAULT_MARCHING_ANTS_INTERVAL.as_millis() as u64,
            show_brush_preview: true,
        }
    }
}

impl Preferences {
    /// `<config dir>/editor-canvas/editor.json`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn marching_ants_interval(&self) -> Duration {
        Duration::from_millis(self.marching_ants_interval_ms.max(1))
    }

    pub fn load_from(path: &Path) -> PreferencesResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let prefs = serde_json::from_str(&text).map_err(|source| PreferencesError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded preferences");
        Ok(prefs)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path).context("using default preferences") {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("{e:#}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> PreferencesResult<()> {
        let io_err = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| PreferencesError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;
        debug!(path = %path.display(), "saved preferences");
        Ok(())
    }
}
