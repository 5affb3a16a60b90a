//! Load-time settings.
//!
//! Read once from `fake_muter.json` in the host's config directory. The file
//! is optional and never written back.

use crate::nickname::MUTE_SUFFIX;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const SETTINGS_FILE_NAME: &str = "fake_muter.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial state of the "Enable/Disable Name Changing" toggle.
    pub rename_on_toggle: bool,
    pub mute_suffix: String,
    /// Post "Enabled/Disabled Fake Muter." to the current tab on toggle.
    pub announce: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rename_on_toggle: false,
            mute_suffix: MUTE_SUFFIX.to_string(),
            announce: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut settings: Settings =
            serde_json::from_str(json).context("failed to parse settings")?;
        if settings.mute_suffix.is_empty() {
            settings.mute_suffix = MUTE_SUFFIX.to_string();
        }
        Ok(settings)
    }

    /// `Ok(None)` when the directory has no settings file.
    pub fn load_from_dir(dir: &Path) -> anyhow::Result<Option<Self>> {
        let path = dir.join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))
            .map(Some)
    }

    /// Never fails: problems are logged and defaults are used.
    pub fn load_or_default(dir: &Path) -> Self {
        match Self::load_from_dir(dir) {
            Ok(Some(settings)) => {
                log::info!("loaded settings from {}", dir.display());
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}
