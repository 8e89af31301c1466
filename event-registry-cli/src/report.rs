//! Text rendering of events for the console

use event_registry::{Event, RegistryConfig, Timestamp, User};
use std::io::{self, Write};

/// Everything needed to describe an event relative to the session
pub struct RenderContext<'a> {
    pub now: Timestamp,
    pub config: &'a RegistryConfig,
    pub user: Option<&'a User>,
}

fn status_label(event: &Event, ctx: &RenderContext<'_>) -> String {
    match event.status(ctx.now, ctx.config) {
        Ok(status) => {
            let mut label = status.to_string();
            if event.is_starting_soon(ctx.now, ctx.config).unwrap_or(false) {
                label.push_str(" (starting soon)");
            }
            label
        }
        Err(_) => "unknown (invalid date/hour)".to_string(),
    }
}

/// Write one event block
pub fn write_event<W: Write>(out: &mut W, event: &Event, ctx: &RenderContext<'_>) -> io::Result<()> {
    writeln!(out, "\n{}", event)?;
    writeln!(out, "Status: {}", status_label(event, ctx))?;

    if event.attendees.is_empty() {
        writeln!(out, "Attendees: none")?;
    } else {
        let names: Vec<&str> = event.attendees.iter().map(|u| u.name.as_str()).collect();
        writeln!(out, "Attendees: {}", names.join(", "))?;
    }

    if let Some(user) = ctx.user {
        if event.has_attendee(user) {
            writeln!(out, "You are attending this event")?;
        }
    }
    Ok(())
}

/// Write a list of events, or `empty` if there are none
pub fn write_events<W: Write>(
    out: &mut W,
    events: &[&Event],
    empty: &str,
    ctx: &RenderContext<'_>,
) -> io::Result<()> {
    if events.is_empty() {
        writeln!(out, "\n{}", empty)?;
        return Ok(());
    }
    for event in events {
        write_event(out, event, ctx)?;
    }
    Ok(())
}
