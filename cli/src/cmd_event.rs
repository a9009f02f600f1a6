// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Datelike, NaiveDate};
use clap::{Arg, ArgMatches, Command, arg};
use colored::Colorize;
use taskcal_core::Event;

use crate::cli::Store;
use crate::event_formatter::EventFormatter;
use crate::util::{ArgOutputFormat, parse_date_arg, parse_month_arg};

#[derive(Debug, Clone)]
pub struct CmdEventAdd {
    pub date: NaiveDate,
    pub title: String,
    pub output_format: ArgOutputFormat,
}

impl CmdEventAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add a task on the given date")
            .arg(arg!(<DATE> "Date of the task, YYYY-MM-DD").value_parser(parse_date_arg))
            .arg(arg!(<TITLE> ... "Title of the task"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let date = match matches.get_one::<NaiveDate>("DATE") {
            Some(date) => *date,
            _ => unreachable!(),
        };
        let title = matches
            .get_many::<String>("TITLE")
            .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        Self {
            date,
            title,
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, store: &mut Store) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding task...");
        match store.create(&self.title, Some(self.date))? {
            Some(event) => print_events(&[&event], self.output_format),
            None => println!("{}", "Nothing added: the title is empty".italic()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventToggle {
    pub ids: Vec<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventToggle {
    pub const NAME: &str = "toggle";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("done")
            .about("Flip the completed flag of tasks")
            .arg(ids_arg())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, store: &mut Store) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "toggling tasks...");
        let mut changed = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            match store.toggle_complete(id)? {
                Some(event) => changed.push(event),
                None => report_missing(id),
            }
        }
        print_changed(&changed, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub ids: Vec<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete tasks")
            .arg(ids_arg())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, store: &mut Store) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting tasks...");
        let mut removed = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            match store.delete(id)? {
                Some(event) => removed.push(event),
                None => report_missing(id),
            }
        }
        print_changed(&removed, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub date: Option<NaiveDate>,
    pub month: Option<NaiveDate>,
    pub output_format: ArgOutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List tasks, optionally limited to a day or a month")
            .arg(
                arg!(--date <DATE> "Only tasks on this day, YYYY-MM-DD")
                    .value_parser(parse_date_arg)
                    .conflicts_with("month"),
            )
            .arg(
                arg!(--month <MONTH> "Only tasks in this month, YYYY-MM")
                    .value_parser(parse_month_arg),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("date").copied(),
            month: matches.get_one("month").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, store: &Store) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing tasks...");
        let events: Vec<&Event> = match (self.date, self.month) {
            (Some(date), _) => store.events_on(date).collect(),
            (None, Some(month)) => store.events_in_month(month.year(), month.month()).collect(),
            (None, None) => store.events().iter().collect(),
        };
        print_events(&events, self.output_format);
        Ok(())
    }
}

fn ids_arg() -> Arg {
    arg!(<ID> ... "Ids of the tasks, as shown by `list`")
}

fn get_ids(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("ID")
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default()
}

fn report_missing(id: &str) {
    tracing::info!(id, "task not found");
    println!("{} no task with id {}", "Skipped:".yellow(), id);
}

fn print_changed(events: &[Event], output_format: ArgOutputFormat) {
    if events.is_empty() {
        return;
    }
    let events: Vec<&Event> = events.iter().collect();
    print_events(&events, output_format);
}

fn print_events(events: &[&Event], output_format: ArgOutputFormat) {
    let formatter = EventFormatter::new().with_output_format(output_format);
    print!("{}", formatter.format(events));
}
