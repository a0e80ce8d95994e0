//! Player preferences
//!
//! Persisted as JSON next to the progress file.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    Language,
    program::DEFAULT_MAX_COMMANDS,
    progress::{self, PersistError},
};

/// Default delay between animated simulation steps
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 600;
/// Fastest animation the front-end allows
pub const MIN_STEP_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display language
    pub language: Language,
    /// Silence every sound cue
    pub muted: bool,
    /// Delay between simulation steps while a run is animated
    pub step_interval_ms: u64,
    /// Cap on program length
    pub max_commands: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            muted: false,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            max_commands: DEFAULT_MAX_COMMANDS,
        }
    }
}

impl Settings {
    /// Animation pace, never faster than [`MIN_STEP_INTERVAL_MS`].
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms.max(MIN_STEP_INTERVAL_MS))
    }

    /// Program length cap, at least one block.
    pub fn max_commands(&self) -> usize {
        self.max_commands.max(1)
    }

    /// Load settings from `path`, using defaults when missing or corrupt
    pub fn load(path: impl AsRef<Path>) -> Self {
        progress::load_or_default(path.as_ref(), "settings")
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        progress::write_json(path.as_ref(), self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::Km);
        assert!(!settings.muted);
        assert_eq!(settings.step_interval(), Duration::from_millis(600));
        assert_eq!(settings.max_commands(), 20);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"language":"en","muted":true}"#).unwrap();
        assert_eq!(settings.language, Language::En);
        assert!(settings.muted);
        assert_eq!(settings.step_interval_ms, DEFAULT_STEP_INTERVAL_MS);
    }

    #[test]
    fn clamps_silly_values() {
        let settings = Settings {
            step_interval_ms: 0,
            max_commands: 0,
            ..Settings::default()
        };
        assert_eq!(settings.step_interval(), Duration::from_millis(MIN_STEP_INTERVAL_MS));
        assert_eq!(settings.max_commands(), 1);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("robo_puzzle_settings_{}.json", std::process::id()));
        let settings = Settings {
            language: Language::En,
            muted: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
