use crate::config::files::{atomic_write, read_optional};
use crate::domain::ChartKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// UI poll interval in milliseconds
    pub tick_ms: u64,
    /// Start with the built-in sample tasks and tests
    pub seed_sample_data: bool,
    /// Series shown on the deviation chart at startup
    pub chart_keys: Vec<ChartKey>,
    pub use_emoji: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            seed_sample_data: true,
            chart_keys: vec![ChartKey::Total],
            use_emoji: true,
        }
    }
}

impl Settings {
    /// Poll interval with a floor so a bad value can't spin the loop
    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms.max(10))
    }
}

/// Load settings; a missing file gives the defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let Some(content) = read_optional(path)? else {
        return Ok(Settings::default());
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid settings file: {}", path.display()))
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            tick_ms: 100,
            seed_sample_data: false,
            chart_keys: vec![ChartKey::Total, ChartKey::Science],
            use_emoji: false,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"chart_keys": ["4ko", "math"]}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.chart_keys, vec![ChartKey::Total, ChartKey::Math]);
        assert_eq!(settings.tick_ms, 250);
        assert!(settings.use_emoji);
    }

    #[test]
    fn test_invalid_settings_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"chart_keys": ["english"]}"#).unwrap();

        assert!(load_settings(&path).is_err());
    }
}
