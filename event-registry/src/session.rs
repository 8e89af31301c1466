//! Current user and event attendance
//!
//! The [`Session`] holds the single logged-in user. Join and leave go
//! through it so both refuse to act when nobody is logged in. A user can
//! attend a given event at most once.

use crate::store::EventStore;
use crate::types::{Attendance, Event, Result, User};

/// Process-lifetime session state
#[derive(Debug, Default)]
pub struct Session {
    current_user: Option<User>,
}

/// Outcome of a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    EventNotFound,
    NoUserLoggedIn,
}

/// Outcome of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    NotRegistered,
    EventNotFound,
    NoUserLoggedIn,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `user` the current user, replacing any previous one
    pub fn login(&mut self, user: User) {
        log::info!("User '{}' logged in", user.name);
        self.current_user = Some(user);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Add the current user to the named event's attendees
    pub fn join(&self, store: &mut EventStore, event_name: &str) -> Result<JoinOutcome> {
        let Some(user) = self.current_user.as_ref() else {
            return Ok(JoinOutcome::NoUserLoggedIn);
        };
        let Some(event) = store.find_by_name_mut(event_name) else {
            return Ok(JoinOutcome::EventNotFound);
        };

        if event.has_attendee(user) {
            log::debug!("'{}' already attends '{}'", user.name, event_name);
            return Ok(JoinOutcome::AlreadyJoined);
        }

        event.attendees.push(user.clone());
        log::info!("'{}' joined '{}'", user.name, event_name);
        store.save()?;
        Ok(JoinOutcome::Joined)
    }

    /// Remove the current user from the named event's attendees
    pub fn leave(&self, store: &mut EventStore, event_name: &str) -> Result<LeaveOutcome> {
        let Some(user) = self.current_user.as_ref() else {
            return Ok(LeaveOutcome::NoUserLoggedIn);
        };
        let Some(event) = store.find_by_name_mut(event_name) else {
            return Ok(LeaveOutcome::EventNotFound);
        };

        let Some(index) = event.attendees.iter().position(|a| a == user) else {
            return Ok(LeaveOutcome::NotRegistered);
        };

        event.attendees.remove(index);
        log::info!("'{}' left '{}'", user.name, event_name);
        store.save()?;
        Ok(LeaveOutcome::Left)
    }

    /// Events the current user attends, or `None` if nobody is logged in
    pub fn events<'a>(&self, store: &'a EventStore) -> Option<Vec<&'a Event>> {
        self.current_user
            .as_ref()
            .map(|user| store.find_by_user(user))
    }
}

/// The user's participation status for every event in the store
pub fn attendance_of<'a>(store: &'a EventStore, user: &'a User) -> Vec<Attendance<'a>> {
    store
        .events()
        .iter()
        .map(|event| Attendance {
            user,
            event,
            participating: event.has_attendee(user),
        })
        .collect()
}
