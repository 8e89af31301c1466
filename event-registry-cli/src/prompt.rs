//! Console prompts
//!
//! Line-based input over any `BufRead`/`Write` pair. Typed prompts keep
//! asking until the answer parses, so a typo never aborts a registration.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveTime};
use event_registry::types::{DATE_FORMAT, HOUR_FORMAT};
use std::io::{BufRead, Write};

/// Input ended (EOF) while waiting for an answer
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
pub struct InputClosed;

/// Prompting wrapper around an input and an output stream
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer
    fn ask<T>(
        &mut self,
        prompt: &str,
        error: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Some(value) => return Ok(value),
                None => {
                    log::debug!("Rejected input {:?} for prompt {:?}", line, prompt.trim());
                    writeln!(self.output, "\n{}", error)?;
                }
            }
        }
    }

    pub fn text(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    pub fn price(&mut self, prompt: &str) -> Result<f64> {
        self.ask(prompt, "Invalid price, enter a number such as 25.50", |s| {
            s.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
        })
    }

    pub fn age(&mut self, prompt: &str) -> Result<u32> {
        self.ask(prompt, "Invalid age, enter a whole number", |s| s.parse().ok())
    }

    pub fn sex(&mut self, prompt: &str) -> Result<char> {
        self.ask(prompt, "Invalid sex, enter a single letter (M/F)", |s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c.to_ascii_uppercase()),
                _ => None,
            }
        })
    }

    /// Ask for an `HH:MM` hour, normalized to two-digit fields
    pub fn hour(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt, "Invalid hour, use the format hh:mm", |s| {
            NaiveTime::parse_from_str(s, HOUR_FORMAT)
                .ok()
                .map(|t| t.format(HOUR_FORMAT).to_string())
        })
    }

    /// Ask for a `DD/MM/YYYY` date, normalized to two-digit fields
    ///
    /// The year must have four digits.
    pub fn date(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt, "Invalid date, use the format dd/mm/yyyy", |s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .filter(|d| (1000..=9999).contains(&d.year()))
                .map(|d| d.format(DATE_FORMAT).to_string())
        })
    }
}
