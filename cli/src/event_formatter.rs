// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{ColoredString, Colorize};
use taskcal_core::{DATE_FORMAT, Event};

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::Date,
                EventColumn::Completed,
                EventColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [&'a Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [&'a Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            ArgOutputFormat::Table if self.events.is_empty() => writeln!(f, "No tasks"),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events).with_header(true)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Id,
    Date,
    Completed,
    Title,
}

impl TableColumn<&Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Date => "Date",
            EventColumn::Completed => "Done",
            EventColumn::Title => "Title",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a &Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => data.id.as_str().into(),
            EventColumn::Date => data.date.format(DATE_FORMAT).to_string().into(),
            EventColumn::Completed => match data.completed {
                true => "[x]",
                false => "[ ]",
            }
            .into(),
            EventColumn::Title => data.title.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id => PaddingDirection::Left,
            _ => PaddingDirection::Right,
        }
    }

    fn stylize(&self, data: &&Event, cell: String) -> ColoredString {
        match (self, data.completed) {
            (EventColumn::Id, _) => cell.dimmed(),
            (EventColumn::Completed, true) => cell.green(),
            (EventColumn::Title, true) => cell.strikethrough().dimmed(),
            _ => cell.normal(),
        }
    }
}
