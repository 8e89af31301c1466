//! Core types for the event registry library
//!
//! This module defines the records the registry stores and the errors its
//! operations return. Temporal classification lives in [`crate::status`],
//! persistence in [`crate::store`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Timestamp type used throughout the registry (local wall-clock time)
pub type Timestamp = NaiveDateTime;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Format of the `date` field, e.g. `24/12/2026`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the `hour` field, e.g. `20:00`
pub const HOUR_FORMAT: &str = "%H:%M";

/// Errors that can occur in registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid events file {path:?}: {source}")]
    DataFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid event date/hour: '{date} {hour}' (expected DD/MM/YYYY HH:MM)")]
    InvalidDateTime { date: String, hour: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A registered user
///
/// Users are never persisted; the registry only keeps the one currently
/// logged in for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    /// Single-character sex code (e.g. 'M', 'F')
    pub sex: char,
    pub cellphone: String,
    pub address: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        sex: char,
        cellphone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            sex,
            cellphone: cellphone.into(),
            address: address.into(),
        }
    }
}

/// A scheduled event and the users attending it
///
/// Only the descriptive fields are written to the events file; `attendees`
/// is skipped on save and comes back empty on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Lookup key (not enforced unique; lookups return the first match)
    pub name: String,
    pub address: String,
    pub price: f64,
    pub category: String,
    /// Start time, `HH:MM`
    pub hour: String,
    /// Start date, `DD/MM/YYYY`
    pub date: String,
    pub description: String,
    #[serde(skip)]
    pub attendees: Vec<User>,
}

impl Event {
    /// Create a new event with no attendees
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        hour: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            price,
            category: category.into(),
            hour: hour.into(),
            date: date.into(),
            description: description.into(),
            attendees: Vec::new(),
        }
    }

    /// Combine `date` and `hour` into a single timestamp
    pub fn event_datetime(&self) -> Result<Timestamp> {
        parse_event_datetime(&self.date, &self.hour)
    }

    /// True if an equal user is in the attendee list
    pub fn has_attendee(&self, user: &User) -> bool {
        self.attendees.contains(user)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event: {}", self.name)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Price: {:.2}", self.price)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Hour: {}", self.hour)?;
        writeln!(f, "Date: {}", self.date)?;
        write!(f, "Description: {}", self.description)
    }
}

/// Parse a `DD/MM/YYYY` date and an `HH:MM` hour into a timestamp
pub fn parse_event_datetime(date: &str, hour: &str) -> Result<Timestamp> {
    let combined = format!("{} {}", date.trim(), hour.trim());
    NaiveDateTime::parse_from_str(&combined, &format!("{} {}", DATE_FORMAT, HOUR_FORMAT))
        .map_err(|_| RegistryError::InvalidDateTime {
            date: date.to_string(),
            hour: hour.to_string(),
        })
}

/// A user's participation in one event
///
/// Produced on demand from the attendee lists; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendance<'a> {
    pub user: &'a User,
    pub event: &'a Event,
    pub participating: bool,
}
