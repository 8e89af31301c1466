//! Persistent event store
//!
//! Keeps the ordered list of events in memory and mirrors it to a JSON file.
//! Every mutation goes through [`EventStore::save`], so the file matches
//! memory between commands.

use crate::config::RegistryConfig;
use crate::status::StatusFilter;
use crate::types::{Event, RegistryError, Result, Timestamp, User};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// In-memory event list backed by a file
#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
}

/// Result of a listing request
///
/// `all` is every event in insertion order. `filtered` is present only when
/// the filter asked for a view, and is sorted ascending by start time.
#[derive(Debug)]
pub struct Listing<'a> {
    pub all: Vec<&'a Event>,
    pub filtered: Option<Vec<&'a Event>>,
}

impl EventStore {
    /// Open the store at `path`, loading any events already saved there
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let events = load(&path)?;
        Ok(Self { path, events })
    }

    /// Open the store configured in `config`
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::open(config.events_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Write the current events to disk
    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.events)
    }

    /// Add an event at the end and persist
    pub fn append(&mut self, event: Event) -> Result<()> {
        log::info!("Registering event '{}'", event.name);
        self.events.push(event);
        self.save()
    }

    /// First event with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Event> {
        find_by_name(&self.events, name)
    }

    /// First event with the given name, for attendee changes
    ///
    /// Callers must [`save`](Self::save) after mutating.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Event> {
        find_by_name_mut(&mut self.events, name)
    }

    /// Every event the user attends
    pub fn find_by_user(&self, user: &User) -> Vec<&Event> {
        find_by_user(&self.events, user)
    }

    /// Build the full list and, if requested, the sorted filtered view
    pub fn listing(
        &self,
        filter: &StatusFilter,
        now: Timestamp,
        config: &RegistryConfig,
    ) -> Listing<'_> {
        let all: Vec<&Event> = self.events.iter().collect();

        let filtered = filter.requests_view().then(|| {
            let mut view: Vec<(Timestamp, &Event)> = self
                .events
                .iter()
                .filter(|event| filter.matches(event, now, config))
                .filter_map(|event| event.event_datetime().ok().map(|dt| (dt, event)))
                .collect();
            view.sort_by_key(|(starts_at, _)| *starts_at);
            view.into_iter().map(|(_, event)| event).collect::<Vec<_>>()
        });

        Listing { all, filtered }
    }

    /// Upcoming events starting within the nearby window, soonest first
    pub fn nearby(&self, now: Timestamp, config: &RegistryConfig) -> Vec<&Event> {
        let mut view: Vec<(Timestamp, &Event)> = self
            .events
            .iter()
            .filter(|event| event.is_nearby(now, config).unwrap_or(false))
            .filter_map(|event| event.event_datetime().ok().map(|dt| (dt, event)))
            .collect();
        view.sort_by_key(|(starts_at, _)| *starts_at);
        view.into_iter().map(|(_, event)| event).collect()
    }
}

/// Load events from `path`; a missing file yields no events
pub fn load(path: &Path) -> Result<Vec<Event>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No events file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let events: Vec<Event> =
        serde_json::from_str(&content).map_err(|source| RegistryError::DataFormat {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Loaded {} events from {:?}", events.len(), path);
    Ok(events)
}

/// Overwrite `path` with `events`
///
/// Writes to a sibling temporary file first and renames it into place.
pub fn save(path: &Path, events: &[Event]) -> Result<()> {
    let json = serde_json::to_string_pretty(events).map_err(|source| RegistryError::DataFormat {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = temp_path(path);
    if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    log::debug!("Saved {} events to {:?}", events.len(), path);
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn find_by_name<'a>(events: &'a [Event], name: &str) -> Option<&'a Event> {
    events.iter().find(|event| event.name == name)
}

pub fn find_by_name_mut<'a>(events: &'a mut [Event], name: &str) -> Option<&'a mut Event> {
    events.iter_mut().find(|event| event.name == name)
}

pub fn find_by_user<'a>(events: &'a [Event], user: &User) -> Vec<&'a Event> {
    events.iter().filter(|event| event.has_attendee(user)).collect()
}
