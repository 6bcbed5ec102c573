use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::DEFAULT_TITLE;
use crate::error::Result;

const CONFIG_FILE: &str = "config.json";

/// Configuration for a note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage key holding the JSON array of notes
    pub notes_key: String,
    /// Storage key holding the selected note id
    pub selected_key: String,
    /// Title given to new notes and to stored notes missing one
    pub default_title: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notes_key: "notes-app:v1".to_string(),
            selected_key: "notes-app:selected".to_string(),
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load `config.json` from `dir`, falling back to defaults when the file
    /// does not exist. Fields absent from the file keep their default values.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded store config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.notes_key, "notes-app:v1");
        assert_eq!(config.selected_key, "notes-app:selected");
        assert_eq!(config.default_title, "Untitled");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = StoreConfig::load(tmp.path()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"{"default_title": "New note"}"#).unwrap();

        let config = StoreConfig::load(tmp.path()).unwrap();
        assert_eq!(config.default_title, "New note");
        assert_eq!(config.notes_key, "notes-app:v1");
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "{not json").unwrap();

        let result = StoreConfig::load(tmp.path());
        assert!(matches!(result, Err(NoteError::Json(_))));
    }

    #[test]
    fn test_serialization() {
        let config = StoreConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
