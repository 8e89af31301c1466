//! Temporal status of events
//!
//! All predicates are pure functions of the event start and "now", so the
//! same event can be classified against any instant. The boundary
//! `starts_at == now` belongs to upcoming.
//!
//! Active means "currently ongoing": `now` falls within
//! `[starts_at, starts_at + active_duration)`. An active event has already
//! started, so it is also passed.

use crate::config::RegistryConfig;
use crate::types::{Event, Result, Timestamp};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

pub fn is_upcoming(starts_at: Timestamp, now: Timestamp) -> bool {
    starts_at >= now
}

pub fn is_passed(starts_at: Timestamp, now: Timestamp) -> bool {
    starts_at < now
}

pub fn is_active(starts_at: Timestamp, now: Timestamp, active_duration: Duration) -> bool {
    match starts_at.checked_add_signed(active_duration) {
        Some(ends_at) => starts_at <= now && now < ends_at,
        None => starts_at <= now,
    }
}

/// Upcoming and starting within `window` of now
pub fn is_starting_soon(starts_at: Timestamp, now: Timestamp, window: Duration) -> bool {
    is_upcoming(starts_at, now) && starts_at - now <= window
}

/// Upcoming and starting within `window` of now (days-scale window)
pub fn is_nearby(starts_at: Timestamp, now: Timestamp, window: Duration) -> bool {
    is_starting_soon(starts_at, now, window)
}

impl Event {
    pub fn is_upcoming(&self, now: Timestamp) -> Result<bool> {
        Ok(is_upcoming(self.event_datetime()?, now))
    }

    pub fn is_passed(&self, now: Timestamp) -> Result<bool> {
        Ok(is_passed(self.event_datetime()?, now))
    }

    pub fn is_active(&self, now: Timestamp, config: &RegistryConfig) -> Result<bool> {
        Ok(is_active(self.event_datetime()?, now, config.active_duration()))
    }

    pub fn is_starting_soon(&self, now: Timestamp, config: &RegistryConfig) -> Result<bool> {
        Ok(is_starting_soon(
            self.event_datetime()?,
            now,
            config.starting_soon_window(),
        ))
    }

    pub fn is_nearby(&self, now: Timestamp, config: &RegistryConfig) -> Result<bool> {
        Ok(is_nearby(self.event_datetime()?, now, config.nearby_window()))
    }

    /// Summary status for display
    pub fn status(&self, now: Timestamp, config: &RegistryConfig) -> Result<EventStatus> {
        Ok(EventStatus::classify(
            self.event_datetime()?,
            now,
            config.active_duration(),
        ))
    }
}

/// Single summary status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Starts now or later
    Upcoming,
    /// Started and still within the active duration
    Active,
    /// Started and no longer active
    Passed,
}

impl EventStatus {
    /// Classify a start time; Active takes precedence over Passed
    pub fn classify(starts_at: Timestamp, now: Timestamp, active_duration: Duration) -> Self {
        if is_upcoming(starts_at, now) {
            EventStatus::Upcoming
        } else if is_active(starts_at, now, active_duration) {
            EventStatus::Active
        } else {
            EventStatus::Passed
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Upcoming => write!(f, "upcoming"),
            EventStatus::Active => write!(f, "active"),
            EventStatus::Passed => write!(f, "passed"),
        }
    }
}

/// Three-valued status filter
///
/// An event matches when every predicate is either unset or equal to the
/// event's actual value. With nothing set, every event matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFilter {
    pub is_active: Option<bool>,
    pub is_upcoming: Option<bool>,
    pub is_passed: Option<bool>,
}

impl StatusFilter {
    /// Match every event
    pub fn all() -> Self {
        Self::default()
    }

    pub fn upcoming() -> Self {
        Self {
            is_upcoming: Some(true),
            ..Self::default()
        }
    }

    pub fn passed() -> Self {
        Self {
            is_passed: Some(true),
            ..Self::default()
        }
    }

    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    /// True if any predicate is requested true, i.e. a sorted view is wanted
    pub fn requests_view(&self) -> bool {
        [self.is_active, self.is_upcoming, self.is_passed]
            .iter()
            .any(|flag| *flag == Some(true))
    }

    fn is_unset(&self) -> bool {
        self.is_active.is_none() && self.is_upcoming.is_none() && self.is_passed.is_none()
    }

    /// Check an event against the filter
    ///
    /// Events whose date/hour cannot be parsed never match a set predicate.
    pub fn matches(&self, event: &Event, now: Timestamp, config: &RegistryConfig) -> bool {
        if self.is_unset() {
            return true;
        }

        let starts_at = match event.event_datetime() {
            Ok(starts_at) => starts_at,
            Err(e) => {
                log::warn!("Skipping event '{}' in filtered view: {}", event.name, e);
                return false;
            }
        };

        let check = |wanted: Option<bool>, actual: bool| wanted.map_or(true, |w| w == actual);

        check(
            self.is_active,
            is_active(starts_at, now, config.active_duration()),
        ) && check(self.is_upcoming, is_upcoming(starts_at, now))
            && check(self.is_passed, is_passed(starts_at, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event_at(date: &str, hour: &str) -> Event {
        Event::new("E", "Addr", 0.0, "Cat", hour, date, "Desc")
    }

    #[test]
    fn test_upcoming_passed_complementary() {
        let now = at(17, 12, 0);
        for starts_at in [at(16, 12, 0), at(17, 11, 59), at(17, 12, 1), at(18, 0, 0)] {
            assert_eq!(is_upcoming(starts_at, now), !is_passed(starts_at, now));
        }
    }

    #[test]
    fn test_boundary_belongs_to_upcoming() {
        let now = at(17, 12, 0);
        assert!(is_upcoming(now, now));
        assert!(!is_passed(now, now));
    }

    #[test]
    fn test_active_window() {
        let starts_at = at(17, 20, 0);
        let duration = Duration::hours(3);

        assert!(!is_active(starts_at, at(17, 19, 59), duration));
        assert!(is_active(starts_at, at(17, 20, 0), duration));
        assert!(is_active(starts_at, at(17, 22, 59), duration));
        assert!(!is_active(starts_at, at(17, 23, 0), duration));
    }

    #[test]
    fn test_starting_soon_and_nearby() {
        let now = at(1, 8, 0);
        assert!(is_starting_soon(at(1, 20, 0), now, Duration::hours(12)));
        assert!(!is_starting_soon(at(1, 20, 1), now, Duration::hours(12)));
        assert!(!is_starting_soon(at(1, 7, 0), now, Duration::hours(12)));

        assert!(is_nearby(at(31, 8, 0), now, Duration::days(30)));
        assert!(!is_nearby(at(31, 8, 0), now, Duration::days(29)));
    }

    #[test]
    fn test_status_classify() {
        let starts_at = at(17, 20, 0);
        let duration = Duration::hours(3);
        assert_eq!(
            EventStatus::classify(starts_at, at(17, 10, 0), duration),
            EventStatus::Upcoming
        );
        assert_eq!(
            EventStatus::classify(starts_at, at(17, 21, 0), duration),
            EventStatus::Active
        );
        assert_eq!(
            EventStatus::classify(starts_at, at(18, 9, 0), duration),
            EventStatus::Passed
        );
        assert_eq!(EventStatus::Active.to_string(), "active");
    }

    #[test]
    fn test_filter_three_valued_match() {
        let config = RegistryConfig::default();
        let now = at(17, 12, 0);
        let future = event_at("18/10/2026", "20:00");
        let past = event_at("10/10/2026", "20:00");
        let ongoing = event_at("17/10/2026", "11:00");

        assert!(StatusFilter::all().matches(&future, now, &config));
        assert!(StatusFilter::upcoming().matches(&future, now, &config));
        assert!(!StatusFilter::upcoming().matches(&past, now, &config));
        assert!(StatusFilter::passed().matches(&past, now, &config));
        assert!(StatusFilter::active().matches(&ongoing, now, &config));
        assert!(!StatusFilter::active().matches(&past, now, &config));

        let passed_not_active = StatusFilter {
            is_active: Some(false),
            is_passed: Some(true),
            ..StatusFilter::default()
        };
        assert!(passed_not_active.matches(&past, now, &config));
        assert!(!passed_not_active.matches(&ongoing, now, &config));
    }

    #[test]
    fn test_filter_skips_unparsable_dates() {
        let config = RegistryConfig::default();
        let now = at(17, 12, 0);
        let broken = event_at("someday", "late");

        assert!(StatusFilter::all().matches(&broken, now, &config));
        assert!(!StatusFilter::upcoming().matches(&broken, now, &config));
        assert!(!StatusFilter::passed().matches(&broken, now, &config));
    }

    #[test]
    fn test_requests_view() {
        assert!(!StatusFilter::all().requests_view());
        assert!(StatusFilter::upcoming().requests_view());
        let only_false = StatusFilter {
            is_passed: Some(false),
            ..StatusFilter::default()
        };
        assert!(!only_false.requests_view());
    }
}
