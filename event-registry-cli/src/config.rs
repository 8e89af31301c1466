//! Configuration loading and parsing

use anyhow::{Context, Result};
use event_registry::config::{
    DAYS_BEFORE_NEARBY, DEFAULT_ACTIVE_DURATION_MINUTES, DEFAULT_EVENTS_PATH, HOURS_BEFORE_START,
};
use event_registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            events_file: default_events_file(),
        }
    }
}

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_PATH)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusConfig {
    #[serde(default = "default_active_duration")]
    pub active_duration_minutes: u32,
    #[serde(default = "default_starting_soon")]
    pub starting_soon_hours: u32,
    #[serde(default = "default_nearby")]
    pub nearby_days: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            active_duration_minutes: default_active_duration(),
            starting_soon_hours: default_starting_soon(),
            nearby_days: default_nearby(),
        }
    }
}

fn default_active_duration() -> u32 {
    DEFAULT_ACTIVE_DURATION_MINUTES
}

fn default_starting_soon() -> u32 {
    HOURS_BEFORE_START
}

fn default_nearby() -> u32 {
    DAYS_BEFORE_NEARBY
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Print every event before the sorted upcoming/passed view
    #[serde(default = "default_true")]
    pub show_full_listing: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_full_listing: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Library settings, with `data_file` taking precedence over `[storage]`
    pub fn registry_config(&self, data_file: Option<&Path>) -> Result<RegistryConfig> {
        let events_path = data_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.storage.events_file.clone());

        let config = RegistryConfig::new()
            .with_events_path(events_path)
            .with_active_duration_minutes(self.status.active_duration_minutes)
            .with_starting_soon_hours(self.status.starting_soon_hours)
            .with_nearby_days(self.status.nearby_days);

        config.validate().context("Invalid [status]/[storage] settings")?;
        Ok(config)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [storage]
            events_file = "/var/lib/events.data"

            [status]
            active_duration_minutes = 90

            [display]
            show_full_listing = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.storage.events_file, PathBuf::from("/var/lib/events.data"));
        assert_eq!(config.status.active_duration_minutes, 90);
        assert_eq!(config.status.nearby_days, 30);
        assert!(!config.display.show_full_listing);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.display.show_full_listing);

        let registry = config.registry_config(None).unwrap();
        assert_eq!(registry, RegistryConfig::default());
    }

    #[test]
    fn test_data_file_overrides_storage() {
        let config = AppConfig::default();
        let registry = config
            .registry_config(Some(Path::new("other.data")))
            .unwrap();
        assert_eq!(registry.events_path, PathBuf::from("other.data"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = AppConfig::default();
        config.status.active_duration_minutes = 0;
        assert!(config.registry_config(None).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[status]\nnearby_days = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.status.nearby_days, 7);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
