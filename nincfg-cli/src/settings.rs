// Editor settings persistence
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorSettings {
    /// Record opened when no path is given on the command line.
    pub record_path: PathBuf,
    /// Sleep between edit loop ticks.
    pub tick_ms: u64,
    /// Lines each frame is padded to, so stale output scrolls away.
    pub screen_lines: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from("nincfg.bin"),
            tick_ms: 20,
            screen_lines: 16,
        }
    }
}

impl EditorSettings {
    fn settings_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("nincfg");
        path.push("settings.json");
        path
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path())
    }

    /// Read settings from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: EditorSettings =
            serde_json::from_str(&content).context("Failed to parse settings file")?;
        Ok(settings)
    }

    /// The record to edit: the command-line path wins over the stored one.
    pub fn resolve_record_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.unwrap_or_else(|| self.record_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn scratch_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/settings.json");
        let settings = EditorSettings::load_from(&path).unwrap();
        assert_eq!(settings, EditorSettings::default());
        assert_eq!(settings.tick_ms, 20);
        assert_eq!(settings.screen_lines, 16);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = scratch_file(&dir, "partial.json", r#"{ "tick_ms": 50 }"#);
        let settings = EditorSettings::load_from(&path).unwrap();
        assert_eq!(settings.tick_ms, 50);
        assert_eq!(settings.record_path, PathBuf::from("nincfg.bin"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = scratch_file(&dir, "broken.json", "{ tick_ms: ");
        assert!(EditorSettings::load_from(&path).is_err());
    }

    #[test]
    fn test_argument_overrides_stored_path() {
        let settings = EditorSettings::default();
        assert_eq!(settings.resolve_record_path(None), PathBuf::from("nincfg.bin"));
        assert_eq!(
            settings.resolve_record_path(Some(PathBuf::from("/sd/nincfg.bin"))),
            PathBuf::from("/sd/nincfg.bin")
        );
    }
}
