// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use clap::{Arg, ArgMatches, arg, value_parser};
use taskcal_core::parse_date;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Value parser for `YYYY-MM-DD` arguments.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

/// Value parser for `YYYY-MM` arguments, yielding the first day of the month.
pub fn parse_month_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(&format!("{}-01", s.trim()))
        .ok_or_else(|| format!("invalid month {s:?}, expected YYYY-MM"))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Move `date` by whole months, clamping the day to the target month.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// The first cell of a six-week month grid whose rows start on `week_start`.
pub fn grid_start(month: NaiveDate, week_start: Weekday) -> NaiveDate {
    let first = first_of_month(month);
    let offset =
        (first.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    first - Days::new(u64::from(offset))
}

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width of the first `first_n` grapheme clusters of `s`.
pub fn unicode_width_of_graphemes(s: &str, first_n: usize) -> usize {
    s.graphemes(true).take(first_n).map(|g| g.width()).sum()
}

/// Byte offset where grapheme cluster `g_idx` starts, or the length of `s`
/// when out of bounds.
pub fn byte_offset_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

/// Cut `s` down to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}
