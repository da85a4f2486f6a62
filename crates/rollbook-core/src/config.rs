//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the default DBI snapshot, the school subdomain, and the
//! last used username.
//!
//! Configuration is stored at `~/.config/rollbook/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::SessionData;

/// Application name used for config directory paths
const APP_NAME: &str = "rollbook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    pub snapshot_path: Option<PathBuf>,
    pub subdomain: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Remember the user of a session; returns true when the config changed.
    ///
    /// The first subdomain seen is kept. A session for a different school is
    /// reported but does not replace it.
    pub fn remember_session(&mut self, data: &SessionData) -> bool {
        let mut changed = false;

        match self.subdomain.as_deref() {
            None => {
                self.subdomain = Some(data.subdomain.clone());
                changed = true;
            }
            Some(known) if known != data.subdomain => {
                warn!(
                    configured = known,
                    session = %data.subdomain,
                    "Snapshot is for another school"
                );
            }
            Some(_) => {}
        }

        if self.last_username.as_deref() != Some(data.username.as_str()) {
            self.last_username = Some(data.username.clone());
            changed = true;
        }

        changed
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            snapshot_path: Some(PathBuf::from("/tmp/dbi.json")),
            subdomain: Some("gymzv".to_string()),
            last_username: Some("jnovak".to_string()),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"subdomain": "zsmost"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.subdomain.as_deref(), Some("zsmost"));
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn test_remember_session() {
        let mut config = Config::default();
        let data = SessionData::new("jnovak", "gymzv");

        assert!(config.remember_session(&data));
        assert_eq!(config.subdomain.as_deref(), Some("gymzv"));
        assert_eq!(config.last_username.as_deref(), Some("jnovak"));
        assert!(!config.remember_session(&data));

        // Another school's session updates the user but keeps the subdomain
        assert!(config.remember_session(&SessionData::new("pdvorak", "zsmost")));
        assert_eq!(config.subdomain.as_deref(), Some("gymzv"));
        assert_eq!(config.last_username.as_deref(), Some("pdvorak"));
    }
}
