// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::Local;
use clap::{ArgMatches, Command};
use colored::Colorize;
use taskcal_core::Config;

use crate::cli::Store;
use crate::tui::{CalendarStore, run_calendar};

#[derive(Debug, Clone, Copy)]
pub struct CmdCalendar;

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Open the month calendar (default)")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub fn run(self, config: &Config, store: Store) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening calendar...");
        let today = Local::now().date_naive();
        let state = CalendarStore::new(store, today, config.week_start.weekday());
        let state = run_calendar(state)?;

        if let Some(status) = state.status {
            println!("{} {}", "Warning:".yellow(), status);
        }
        tracing::debug!(count = state.events.len(), "calendar closed");
        Ok(())
    }
}
