// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The format of a calendar date, both on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single task placed on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique within the collection, never reassigned.
    pub id: String,

    /// The task title, never empty after trimming.
    pub title: String,

    /// The calendar date the task is placed on.
    #[serde(with = "date_format")]
    pub date: NaiveDate,

    /// Whether the task has been ticked off.
    pub completed: bool,
}

impl Event {
    pub(crate) fn new(id: String, title: String, date: NaiveDate) -> Self {
        Self {
            id,
            title,
            date,
            completed: false,
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_exact(s.trim())
}

/// Only the zero-padded form, chrono alone also takes `2024-6-1`.
fn parse_exact(s: &str) -> Option<NaiveDate> {
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, c)| match i {
            4 | 7 => c == b'-',
            _ => c.is_ascii_digit(),
        });

    match shaped {
        true => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
        false => None,
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_exact(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid date {s:?}, expected YYYY-MM-DD")))
    }
}
