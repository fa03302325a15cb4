// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse human-readable recurrence text into a five-field cron spec.
//!
//! The grammar is a small ordered list of pattern matchers; the first one
//! that matches wins and there is no backtracking across categories. Input
//! that contains whitespace but matches no pattern is treated as a raw
//! five-field cron expression and passed through after a field-count check.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A resolved, scheduler-native recurrence.
///
/// All five fields are always populated; a spec that fails validation is
/// never constructed, so holders of a `RecurrenceSpec` can register it
/// without re-checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl RecurrenceSpec {
    /// Fixed time every day.
    fn at(minute: u32, hour: u32) -> Self {
        Self {
            minute: minute.to_string(),
            hour: hour.to_string(),
            day_of_month: "*".into(),
            month: "*".into(),
            day_of_week: "*".into(),
        }
    }

    /// Fixed time on one weekday (0 = Sunday, cron convention).
    fn at_on_weekday(minute: u32, hour: u32, weekday: u32) -> Self {
        Self {
            day_of_week: weekday.to_string(),
            ..Self::at(minute, hour)
        }
    }

    /// Step expression on the minute field, wildcard elsewhere.
    fn every_minutes(n: u32) -> Self {
        Self {
            minute: format!("*/{}", n),
            hour: "*".into(),
            day_of_month: "*".into(),
            month: "*".into(),
            day_of_week: "*".into(),
        }
    }

    /// Top of every hour.
    fn hourly() -> Self {
        Self {
            minute: "0".into(),
            hour: "*".into(),
            day_of_month: "*".into(),
            month: "*".into(),
            day_of_week: "*".into(),
        }
    }
}

impl fmt::Display for RecurrenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}

/// Schedule text that could not be resolved to a recurrence.
///
/// Raised before any mutation: an unparsable schedule aborts the entire
/// `add` operation and no partial job is ever registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleParseError {
    #[error(
        "unrecognized schedule `{input}` (try \"daily at 9am\", \"every monday at 10am\", \
         \"every 15 minutes\", \"hourly\", \"daily\", \"weekly\", or a five-field cron expression)"
    )]
    Unrecognized { input: String },

    #[error("`{input}` has {found} field(s), expected a five-field cron expression")]
    WrongFieldCount { input: String, found: usize },

    #[error("invalid interval `{value}`: expected a whole number of minutes from 1 to 59")]
    BadInterval { value: String },

    #[error("invalid hour {hour}: expected 1-12 with am/pm")]
    BadHour { hour: u32 },

    #[error("invalid minute {minute}: expected 0-59")]
    BadMinute { minute: u32 },
}

mod patterns {
    #![allow(clippy::expect_used)] // patterns are literals, compiled once

    use super::{Lazy, Regex};

    pub(super) static DAILY_AT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^daily at (\d{1,2})(?::(\d{2}))?(am|pm)$").expect("valid pattern")
    });

    pub(super) static WEEKDAY_AT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^every ([a-z]+) at (\d{1,2})(?::(\d{2}))?(am|pm)$").expect("valid pattern")
    });

    pub(super) static EVERY_MINUTES: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^every (\d+) minutes?$").expect("valid pattern"));
}

/// Convert a 12-hour wall-clock time to 24-hour minute/hour values.
///
/// `pm` adds 12 unless the hour is already 12; `am` maps hour 12 to 0.
/// Applied identically by every time-bearing pattern.
fn wall_clock(hour: u32, minute: u32, pm: bool) -> Result<(u32, u32), ScheduleParseError> {
    if hour == 0 || hour > 12 {
        return Err(ScheduleParseError::BadHour { hour });
    }
    if minute > 59 {
        return Err(ScheduleParseError::BadMinute { minute });
    }
    let hour24 = match (pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };
    Ok((hour24, minute))
}

fn weekday_number(name: &str) -> Option<u32> {
    let n = match name {
        "sunday" | "sun" => 0,
        "monday" | "mon" => 1,
        "tuesday" | "tue" | "tues" => 2,
        "wednesday" | "wed" => 3,
        "thursday" | "thu" | "thur" | "thurs" => 4,
        "friday" | "fri" => 5,
        "saturday" | "sat" => 6,
        _ => return None,
    };
    Some(n)
}

fn capture_time(
    hour: &str,
    minute: Option<&str>,
    meridiem: &str,
) -> Result<(u32, u32), ScheduleParseError> {
    let hour: u32 = hour.parse().unwrap_or(u32::MAX);
    let minute: u32 = match minute {
        Some(m) => m.parse().unwrap_or(u32::MAX),
        None => 0,
    };
    wall_clock(hour, minute, meridiem == "pm")
}

fn raw_passthrough(input: &str) -> Result<RecurrenceSpec, ScheduleParseError> {
    let fields: Vec<&str> = input.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(ScheduleParseError::WrongFieldCount {
            input: input.to_string(),
            found: fields.len(),
        });
    }
    Ok(RecurrenceSpec {
        minute: fields[0].to_string(),
        hour: fields[1].to_string(),
        day_of_month: fields[2].to_string(),
        month: fields[3].to_string(),
        day_of_week: fields[4].to_string(),
    })
}

/// Parse a free-form schedule string.
///
/// Categories, tried in order (first match wins):
/// 1. `daily at <H>(:<MM>)?(am|pm)`
/// 2. `every <weekday> at <H>(:<MM>)?(am|pm)`
/// 3. `every <N> minutes`, N in 1..=59 (a sub-hour step; longer periods
///    take a raw five-field expression)
/// 4. `hourly`
/// 5. `daily`
/// 6. `weekly`
/// 7. raw five-field passthrough (input with embedded whitespace)
pub fn parse_schedule(input: &str) -> Result<RecurrenceSpec, ScheduleParseError> {
    let text = input.trim().to_lowercase();

    if let Some(caps) = patterns::DAILY_AT.captures(&text) {
        let (hour, minute) = capture_time(
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            &caps[3],
        )?;
        return Ok(RecurrenceSpec::at(minute, hour));
    }

    if let Some(caps) = patterns::WEEKDAY_AT.captures(&text) {
        if let Some(weekday) = weekday_number(&caps[1]) {
            let (hour, minute) = capture_time(
                &caps[2],
                caps.get(3).map(|m| m.as_str()),
                &caps[4],
            )?;
            return Ok(RecurrenceSpec::at_on_weekday(minute, hour, weekday));
        }
        // "every <word> at ..." with an unknown weekday falls through to
        // the raw check, which rejects it with a field-count error.
    }

    if let Some(caps) = patterns::EVERY_MINUTES.captures(&text) {
        let n: u32 = caps[1].parse().unwrap_or(0);
        if n == 0 || n > 59 {
            return Err(ScheduleParseError::BadInterval {
                value: caps[1].to_string(),
            });
        }
        return Ok(RecurrenceSpec::every_minutes(n));
    }

    match text.as_str() {
        "hourly" => return Ok(RecurrenceSpec::hourly()),
        "daily" => return Ok(RecurrenceSpec::at(0, 0)),
        "weekly" => return Ok(RecurrenceSpec::at_on_weekday(0, 0, 0)),
        _ => {}
    }

    if text.contains(char::is_whitespace) {
        return raw_passthrough(&text);
    }

    Err(ScheduleParseError::Unrecognized { input: text })
}

#[cfg(test)]
#[path = "recurrence_tests.rs"]
mod tests;
