//! Interactive command loop
//!
//! Reads a menu option, runs it against the store and session, prints the
//! result and waits for the next option. Option 9 or end of input leaves
//! the loop.

use crate::config::DisplayConfig;
use crate::prompt::{Console, InputClosed};
use crate::report::{write_events, RenderContext};
use anyhow::{Context, Result};
use event_registry::{
    attendance_of, Event, EventStore, JoinOutcome, LeaveOutcome, RegistryConfig, Session,
    StatusFilter, Timestamp, User,
};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Menu options 1-9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RegisterEvent,
    RegisterUser,
    ListEvents,
    ListUpcoming,
    ListPassed,
    JoinEvent,
    LeaveEvent,
    ListUserEvents,
    Exit,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid option: {0:?}")]
pub struct InvalidOption(String);

impl FromStr for Command {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Command::RegisterEvent),
            "2" => Ok(Command::RegisterUser),
            "3" => Ok(Command::ListEvents),
            "4" => Ok(Command::ListUpcoming),
            "5" => Ok(Command::ListPassed),
            "6" => Ok(Command::JoinEvent),
            "7" => Ok(Command::LeaveEvent),
            "8" => Ok(Command::ListUserEvents),
            "9" => Ok(Command::Exit),
            other => Err(InvalidOption(other.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

const MENU: &str = "\nMenu:
1. Register event
2. Register user
3. List events
4. List upcoming events
5. List passed events
6. Join event
7. Leave event
8. List my events
9. Exit";

/// Current local wall-clock time
pub fn local_now() -> Timestamp {
    chrono::Local::now().naive_local()
}

/// The running application: store, session and console
pub struct App<R, W> {
    console: Console<R, W>,
    store: EventStore,
    session: Session,
    config: RegistryConfig,
    display: DisplayConfig,
    clock: fn() -> Timestamp,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        console: Console<R, W>,
        store: EventStore,
        config: RegistryConfig,
        display: DisplayConfig,
    ) -> Self {
        Self {
            console,
            store,
            session: Session::new(),
            config,
            display,
            clock: local_now,
        }
    }

    /// Replace the clock used for status classification
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Run until Exit is chosen or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.console.out(), "\n\nWelcome to the Event Management System!")?;

        loop {
            writeln!(self.console.out(), "{}", MENU)?;

            let line = match self
                .console
                .read_line("\nEnter the number of the desired option: ")
            {
                Ok(line) => line,
                Err(e) if e.is::<InputClosed>() => {
                    log::info!("Input closed, leaving command loop");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    log::debug!("{}", e);
                    writeln!(self.console.out(), "\nInvalid option")?;
                    continue;
                }
            };

            log::debug!("Executing {:?}", command);
            match self.execute(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.is::<InputClosed>() => {
                    log::info!("Input closed during {:?}, leaving command loop", command);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::RegisterEvent => self.register_event()?,
            Command::RegisterUser => self.register_user()?,
            Command::ListEvents => {
                self.list(StatusFilter::all(), "", "")?;
            }
            Command::ListUpcoming => {
                self.list(
                    StatusFilter::upcoming(),
                    "Upcoming events (sorted by date)",
                    "No upcoming events",
                )?;
            }
            Command::ListPassed => {
                self.list(
                    StatusFilter::passed(),
                    "Passed events (sorted by date)",
                    "No passed events",
                )?;
            }
            Command::JoinEvent => self.join()?,
            Command::LeaveEvent => self.leave()?,
            Command::ListUserEvents => self.list_user_events()?,
            Command::Exit => {
                writeln!(
                    self.console.out(),
                    "\nThank you for using the Event Management System"
                )?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn register_event(&mut self) -> Result<()> {
        let c = &mut self.console;
        let event = Event::new(
            c.text("\nEnter the event name: ")?,
            c.text("\nEnter the event address: ")?,
            c.price("\nEnter the event price: ")?,
            c.text("\nEnter the event category: ")?,
            c.hour("\nEnter the event start time (format: hh:mm): ")?,
            c.date("\nEnter the event date (format: dd/mm/yyyy): ")?,
            c.text("\nEnter the event description: ")?,
        );

        self.store
            .append(event)
            .with_context(|| format!("Failed to save events to {:?}", self.store.path()))?;
        writeln!(self.console.out(), "\nEvent registered successfully")?;
        Ok(())
    }

    fn register_user(&mut self) -> Result<()> {
        let c = &mut self.console;
        let user = User::new(
            c.text("\nEnter the user name: ")?,
            c.age("\nEnter the user age: ")?,
            c.sex("\nEnter the user sex (M/F): ")?,
            c.text("\nEnter the user cellphone: ")?,
            c.text("\nEnter the user address: ")?,
        );

        self.session.login(user);
        writeln!(self.console.out(), "\nUser registered successfully")?;
        Ok(())
    }

    /// Full list first, then the sorted view when the filter asks for one
    fn list(&mut self, filter: StatusFilter, title: &str, empty: &str) -> Result<()> {
        let now = (self.clock)();
        let listing = self.store.listing(&filter, now, &self.config);
        let ctx = RenderContext {
            now,
            config: &self.config,
            user: self.session.current_user(),
        };
        let out = self.console.out();

        if self.display.show_full_listing || listing.filtered.is_none() {
            writeln!(out, "\nAll events:")?;
            write_events(out, &listing.all, "No events registered", &ctx)?;
        }

        if let Some(view) = &listing.filtered {
            writeln!(out, "\n{}:", title)?;
            write_events(out, view, empty, &ctx)?;
        }
        Ok(())
    }

    fn join(&mut self) -> Result<()> {
        if self.session.current_user().is_none() {
            writeln!(self.console.out(), "\nNo user logged in")?;
            return Ok(());
        }

        let name = self
            .console
            .text("\nEnter the name of the event you want to join: ")?;
        let outcome = self
            .session
            .join(&mut self.store, &name)
            .context("Failed to save events")?;

        let message = match outcome {
            JoinOutcome::Joined => "Participation registered successfully",
            JoinOutcome::AlreadyJoined => "You are already attending this event",
            JoinOutcome::EventNotFound => "Event not found",
            JoinOutcome::NoUserLoggedIn => "No user logged in",
        };
        writeln!(self.console.out(), "\n{}", message)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.session.current_user().is_none() {
            writeln!(self.console.out(), "\nNo user logged in")?;
            return Ok(());
        }

        let name = self
            .console
            .text("\nEnter the name of the event you want to leave: ")?;
        let outcome = self
            .session
            .leave(&mut self.store, &name)
            .context("Failed to save events")?;

        let message = match outcome {
            LeaveOutcome::Left => "Participation cancelled successfully",
            LeaveOutcome::NotRegistered => "You are not registered for this event",
            LeaveOutcome::EventNotFound => "Event not found",
            LeaveOutcome::NoUserLoggedIn => "No user logged in",
        };
        writeln!(self.console.out(), "\n{}", message)?;
        Ok(())
    }

    fn list_user_events(&mut self) -> Result<()> {
        let Some(events) = self.session.events(&self.store) else {
            writeln!(self.console.out(), "\nNo user logged in")?;
            return Ok(());
        };

        let now = (self.clock)();
        let user = self.session.current_user();
        let ctx = RenderContext {
            now,
            config: &self.config,
            user,
        };
        let attendance = user
            .map(|user| attendance_of(&self.store, user))
            .unwrap_or_default();
        let attending = attendance.iter().filter(|a| a.participating).count();

        let out = self.console.out();
        write_events(out, &events, "You are not attending any events", &ctx)?;
        writeln!(
            out,
            "\nAttending {} of {} events",
            attending,
            attendance.len()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fixed_now() -> Timestamp {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn run_script(dir: &TempDir, script: &str, display: DisplayConfig) -> (String, usize) {
        let config = RegistryConfig::new().with_events_path(dir.path().join("events.data"));
        let store = EventStore::from_config(&config).unwrap();
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());

        let mut app = App::new(console, store, config, display).with_clock(fixed_now);
        app.run().unwrap();
        let count = app.store().len();
        (String::from_utf8(app.into_output()).unwrap(), count)
    }

    const CONCERT: &str = "1\nConcert\nMain St\n50\nMusic\n20:00\n18/10/2026\nLive show\n";
    const ANA: &str = "2\nAna\n30\nF\n555-0100\nElm St\n";

    #[test]
    fn test_command_parsing() {
        assert_eq!("1".parse::<Command>().unwrap(), Command::RegisterEvent);
        assert_eq!(" 9 \n".parse::<Command>().unwrap(), Command::Exit);
        assert!("0".parse::<Command>().is_err());
        assert!("10".parse::<Command>().is_err());
        assert!("exit".parse::<Command>().is_err());
    }

    #[test]
    fn test_invalid_option_then_exit() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run_script(&dir, "42\n9\n", DisplayConfig::default());
        assert!(out.contains("Invalid option"));
        assert!(out.contains("Thank you for using the Event Management System"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = TempDir::new().unwrap();
        let (out, count) = run_script(&dir, "1\nHalf\n", DisplayConfig::default());
        assert!(out.contains("Welcome"));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_concert_scenario() {
        let dir = TempDir::new().unwrap();
        let script = format!("{}{}6\nConcert\n4\n5\n9\n", CONCERT, ANA);
        let (out, count) = run_script(&dir, &script, DisplayConfig::default());

        assert_eq!(count, 1);
        assert!(out.contains("Event registered successfully"));
        assert!(out.contains("User registered successfully"));
        assert!(out.contains("Participation registered successfully"));

        let upcoming = out
            .split("Upcoming events (sorted by date):")
            .nth(1)
            .unwrap();
        let upcoming = upcoming.split("Menu:").next().unwrap();
        assert!(upcoming.contains("Event: Concert"));
        assert!(upcoming.contains("Attendees: Ana"));

        let passed = out.split("Passed events (sorted by date):").nth(1).unwrap();
        let passed = passed.split("Menu:").next().unwrap();
        assert!(!passed.contains("Event: Concert"));
        assert!(passed.contains("No passed events"));
    }

    #[test]
    fn test_requires_user() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run_script(&dir, "6\n7\n8\n9\n", DisplayConfig::default());
        assert_eq!(out.matches("No user logged in").count(), 3);
    }

    #[test]
    fn test_unknown_event_for_join_and_leave() {
        let dir = TempDir::new().unwrap();
        let script = format!("{}6\nOpera\n7\nOpera\n9\n", ANA);
        let (out, _) = run_script(&dir, &script, DisplayConfig::default());
        assert_eq!(out.matches("Event not found").count(), 2);
    }

    #[test]
    fn test_leave_and_duplicate_join() {
        let dir = TempDir::new().unwrap();
        let script = format!(
            "{}{}7\nConcert\n6\nConcert\n6\nConcert\n8\n7\nConcert\n9\n",
            CONCERT, ANA
        );
        let (out, _) = run_script(&dir, &script, DisplayConfig::default());
        assert!(out.contains("You are not registered for this event"));
        assert!(out.contains("You are already attending this event"));
        assert!(out.contains("Attending 1 of 1 events"));
        assert!(out.contains("Participation cancelled successfully"));
    }

    #[test]
    fn test_user_events_lists_joined_only() {
        let dir = TempDir::new().unwrap();
        let expo = "1\nExpo\nFair\n0\nArt\n10:00\n01/11/2026\nPaintings\n";
        let script = format!("{}{}{}8\n6\nExpo\n8\n9\n", CONCERT, expo, ANA);
        let (out, _) = run_script(&dir, &script, DisplayConfig::default());

        assert!(out.contains("You are not attending any events"));
        assert!(out.contains("Attending 0 of 2 events"));

        let mine = out.split("Attending 0 of 2 events").nth(1).unwrap();
        let mine = mine.split("Attending 1 of 2 events").next().unwrap();
        assert!(mine.contains("Event: Expo"));
        assert!(!mine.contains("Event: Concert"));
    }

    #[test]
    fn test_filtered_only_listing() {
        let dir = TempDir::new().unwrap();
        let display = DisplayConfig {
            show_full_listing: false,
        };
        let script = format!("{}5\n3\n9\n", CONCERT);
        let (out, _) = run_script(&dir, &script, display);

        assert!(out.contains("No passed events"));
        // Only option 3 prints the full list
        assert_eq!(out.matches("All events:").count(), 1);
    }

    #[test]
    fn test_events_persist_between_runs() {
        let dir = TempDir::new().unwrap();
        run_script(&dir, &format!("{}9\n", CONCERT), DisplayConfig::default());
        let (out, count) = run_script(&dir, "3\n9\n", DisplayConfig::default());

        assert_eq!(count, 1);
        assert!(out.contains("Event: Concert"));
        assert!(out.contains("Attendees: none"));
    }
}
