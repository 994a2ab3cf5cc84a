// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Session configuration consumed by the frame loop and the host bindings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Frame rate used when none is configured.
pub const DEFAULT_MAX_FPS: u32 = 30;

/// An error raised while reading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for [`GameConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the loop and the host need to start a session.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window title (ignored by embedded hosts).
    pub title: String,
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Present the logical surface at 2x magnification.
    pub scaled: bool,
    /// Request a menu bar from the host.
    pub menu: bool,
    /// Pause when the surface loses focus and resume when it regains it.
    pub pause_on_focus: bool,
    /// Upper bound on frames per second.
    pub max_fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Sprig".to_string(),
            width: 320,
            height: 240,
            scaled: false,
            menu: false,
            pause_on_focus: false,
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

impl GameConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from '{}'", path.display());
        Self::from_json_str(&json)
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the logical resolution.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enables or disables 2x magnification.
    pub fn with_scaled(mut self, scaled: bool) -> Self {
        self.scaled = scaled;
        self
    }

    /// Requests a menu bar.
    pub fn with_menu(mut self, menu: bool) -> Self {
        self.menu = menu;
        self
    }

    /// Enables or disables pausing on focus loss.
    pub fn with_pause_on_focus(mut self, pause_on_focus: bool) -> Self {
        self.pause_on_focus = pause_on_focus;
        self
    }

    /// Sets the frame-rate cap. Zero is raised to one.
    pub fn with_max_fps(mut self, max_fps: u32) -> Self {
        self.max_fps = max_fps.max(1);
        self
    }

    /// Time budget of one frame, `1000 / max_fps` whole milliseconds.
    pub fn target_frame_interval(&self) -> Duration {
        frame_interval(self.max_fps)
    }

    fn sanitized(mut self) -> Self {
        if self.max_fps == 0 {
            log::warn!("max_fps of 0 is not usable, falling back to 1");
            self.max_fps = 1;
        }
        self
    }
}

/// Frame interval for a frame-rate cap, in whole milliseconds.
pub fn frame_interval(max_fps: u32) -> Duration {
    Duration::from_millis(u64::from(1000 / max_fps.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = GameConfig::default();
        assert_eq!(config.max_fps, 30);
        assert!(!config.scaled);
        assert!(!config.pause_on_focus);
        assert_eq!(config.target_frame_interval(), Duration::from_millis(33));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "title": "Demo", "scaled": true }"#)
            .expect("config should parse");
        assert_eq!(config.title, "Demo");
        assert!(config.scaled);
        assert_eq!(config.width, 320);
        assert_eq!(config.max_fps, DEFAULT_MAX_FPS);
    }

    #[test]
    fn zero_fps_is_clamped() {
        let config = GameConfig::from_json_str(r#"{ "max_fps": 0 }"#).expect("config should parse");
        assert_eq!(config.max_fps, 1);
        assert_eq!(GameConfig::default().with_max_fps(0).max_fps, 1);
        assert_eq!(frame_interval(0), Duration::from_millis(1000));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "max_fps": 60, "pause_on_focus": true }}"#).expect("write config");

        let config = GameConfig::from_json_file(file.path()).expect("config should load");
        assert_eq!(config.max_fps, 60);
        assert!(config.pause_on_focus);
        assert_eq!(config.target_frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
