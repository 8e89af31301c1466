//! Registry configuration types
//!
//! This module defines the settings the library needs: where events are
//! stored and the windows used by the status classifier. Loading these from
//! a file is the application layer's job.

use crate::types::{RegistryError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default events file, relative to the working directory
pub const DEFAULT_EVENTS_PATH: &str = "events.data";

/// Hours before the start during which an event counts as "starting soon"
pub const HOURS_BEFORE_START: u32 = 12;

/// Days ahead within which an upcoming event counts as "nearby"
pub const DAYS_BEFORE_NEARBY: u32 = 30;

/// How long an event stays active after it starts, in minutes
pub const DEFAULT_ACTIVE_DURATION_MINUTES: u32 = 180;

/// Configuration for the registry library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryConfig {
    /// Path of the persisted events file
    #[serde(default = "default_events_path")]
    pub events_path: PathBuf,

    /// Minutes after the start time during which an event is active
    #[serde(default = "default_active_duration")]
    pub active_duration_minutes: u32,

    /// Hours before the start time that count as "starting soon"
    #[serde(default = "default_starting_soon")]
    pub starting_soon_hours: u32,

    /// Days before the start time that count as "nearby"
    #[serde(default = "default_nearby")]
    pub nearby_days: u32,
}

fn default_events_path() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_PATH)
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

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            events_path: default_events_path(),
            active_duration_minutes: default_active_duration(),
            starting_soon_hours: default_starting_soon(),
            nearby_days: default_nearby(),
        }
    }
}

impl RegistryConfig {
    /// Create a new registry configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the events file path
    pub fn with_events_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.events_path = path.into();
        self
    }

    /// Builder method: set how long events stay active after they start
    pub fn with_active_duration_minutes(mut self, minutes: u32) -> Self {
        self.active_duration_minutes = minutes;
        self
    }

    /// Builder method: set the "starting soon" window
    pub fn with_starting_soon_hours(mut self, hours: u32) -> Self {
        self.starting_soon_hours = hours;
        self
    }

    /// Builder method: set the "nearby" window
    pub fn with_nearby_days(mut self, days: u32) -> Self {
        self.nearby_days = days;
        self
    }

    pub fn active_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.active_duration_minutes))
    }

    pub fn starting_soon_window(&self) -> Duration {
        Duration::hours(i64::from(self.starting_soon_hours))
    }

    pub fn nearby_window(&self) -> Duration {
        Duration::days(i64::from(self.nearby_days))
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.active_duration_minutes == 0 {
            return Err(RegistryError::InvalidConfig(
                "active_duration_minutes must be greater than zero".to_string(),
            ));
        }
        if self.events_path.as_os_str().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "events_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
