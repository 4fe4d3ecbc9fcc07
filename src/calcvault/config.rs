use crate::error::{Result, VaultError};
use crate::store::NOTES_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SAVE_ATTEMPTS: u32 = 3;

/// Configuration for the vault, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// How many times the session tries to write the notes blob on stop
    #[serde(default = "default_save_attempts")]
    pub save_attempts: u32,

    /// Blob key the note collection is stored under
    #[serde(default = "default_notes_key")]
    pub notes_key: String,
}

fn default_save_attempts() -> u32 {
    DEFAULT_SAVE_ATTEMPTS
}

fn default_notes_key() -> String {
    NOTES_KEY.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            save_attempts: DEFAULT_SAVE_ATTEMPTS,
            notes_key: NOTES_KEY.to_string(),
        }
    }
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    /// Write attempts on stop, never fewer than one.
    pub fn effective_save_attempts(&self) -> u32 {
        self.save_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.save_attempts, 3);
        assert_eq!(config.notes_key, "notes");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = VaultConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, VaultConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let config = VaultConfig {
            save_attempts: 5,
            ..VaultConfig::default()
        };
        config.save(dir.path()).unwrap();

        let loaded = VaultConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.save_attempts, 5);
        assert_eq!(loaded.notes_key, "notes");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"notes_key":"math"}"#).unwrap();

        let loaded = VaultConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.save_attempts, 3);
        assert_eq!(loaded.notes_key, "math");
    }

    #[test]
    fn test_zero_attempts_clamps_to_one() {
        let config = VaultConfig {
            save_attempts: 0,
            ..VaultConfig::default()
        };
        assert_eq!(config.effective_save_attempts(), 1);
    }
}
