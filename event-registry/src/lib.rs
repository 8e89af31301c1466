//! Event Registry Library
//!
//! Keeps a list of events in a flat JSON file, classifies them by time
//! (upcoming, active, passed) and tracks which users attend which events.
//!
//! # Architecture
//!
//! The library holds all the domain logic:
//! - Event and user records, persisted event fields
//! - Temporal status predicates and the three-valued listing filter
//! - The file-backed event store
//! - The session holding the current user, with join/leave
//!
//! The library does NOT:
//! - Read from or print to the console
//! - Load configuration files
//! - Set up logging
//!
//! All of that is in the application layer (event-registry-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use event_registry::{Event, EventStore, RegistryConfig, Session, StatusFilter, User};
//!
//! let config = RegistryConfig::new().with_events_path("events.data");
//! let mut store = EventStore::from_config(&config).unwrap();
//! store
//!     .append(Event::new("Concert", "Main St", 50.0, "Music", "20:00", "24/12/2026", "Live"))
//!     .unwrap();
//!
//! let mut session = Session::new();
//! session.login(User::new("Ana", 30, 'F', "555-0100", "Elm St"));
//! session.join(&mut store, "Concert").unwrap();
//!
//! let now = chrono::Local::now().naive_local();
//! let listing = store.listing(&StatusFilter::upcoming(), now, &config);
//! for event in listing.filtered.unwrap_or_default() {
//!     println!("{}", event);
//! }
//! ```

// Public modules
pub mod config;
pub mod session;
pub mod status;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use config::RegistryConfig;
pub use session::{attendance_of, JoinOutcome, LeaveOutcome, Session};
pub use status::{EventStatus, StatusFilter};
pub use store::{EventStore, Listing};
pub use types::{Attendance, Event, RegistryError, Result, Timestamp, User};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
