// Configuration management for kara-explore
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub explore: ExploreConfig,
    pub room: RoomConfig,
}

/// Knobs for how result lists get broken up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    /// Below this many tracks, list tracks instead of prompting for filters
    pub few_tracks: usize,
    /// Above this many values, a filter list is split into letter groups
    pub group_over: usize,
}

/// Per-room catalogue restrictions, as "category:value" or bare flag tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub hidden_tags: Vec<String>,
    pub forced_tags: Vec<String>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            few_tracks: 25,
            group_over: 50,
        }
    }
}

impl Config {
    /// Load from the user config dir, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("kara-explore");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.explore.few_tracks, 25);
        assert_eq!(config.explore.group_over, 50);
        assert!(config.room.hidden_tags.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.explore.group_over = 26;
        config.room.hidden_tags = vec!["broken".to_string(), "category:meme".to_string()];
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[room]\nforced_tags = [\"lang:jp\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.room.forced_tags, vec!["lang:jp"]);
        assert_eq!(config.explore, ExploreConfig::default());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "explore = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
