// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use taskcal_core::{APP_NAME, Config, EventStore, FileStorage, MemoryStorage, Storage};

use crate::cmd_calendar::CmdCalendar;
use crate::cmd_event::{CmdEventAdd, CmdEventDelete, CmdEventList, CmdEventToggle};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::config::parse_config;
use crate::logging::{self, LogTarget};

/// The event store every command works on.
pub type Store = EventStore<Box<dyn Storage>>;

/// Run the taskcal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A month calendar of dated tasks, in your terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to calendar
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/taskcal/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/taskcal/config.toml on Windows. Can also be set with TASKCAL_CONFIG.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(CmdCalendar::command())
            .subcommand(CmdEventAdd::command())
            .subcommand(CmdEventToggle::command())
            .subcommand(CmdEventDelete::command())
            .subcommand(CmdEventList::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let (command, sub_config) = match matches.subcommand() {
            Some((CmdCalendar::NAME, matches)) => (Calendar(CmdCalendar::from(matches)), matches),
            Some((CmdEventAdd::NAME, matches)) => (Add(CmdEventAdd::from(matches)), matches),
            Some((CmdEventToggle::NAME, matches)) => {
                (Toggle(CmdEventToggle::from(matches)), matches)
            }
            Some((CmdEventDelete::NAME, matches)) => {
                (Delete(CmdEventDelete::from(matches)), matches)
            }
            Some((CmdEventList::NAME, matches)) => (List(CmdEventList::from(matches)), matches),
            Some((CmdGenerateCompletion::NAME, matches)) => (
                GenerateCompletion(CmdGenerateCompletion::from(matches)),
                matches,
            ),
            None => (Calendar(CmdCalendar), &matches),
            _ => unreachable!(),
        };

        let config = sub_config.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Open the calendar view
    Calendar(CmdCalendar),

    /// Add a task
    Add(CmdEventAdd),

    /// Flip tasks between done and not done
    Toggle(CmdEventToggle),

    /// Delete tasks
    Delete(CmdEventDelete),

    /// List tasks
    List(CmdEventList),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Calendar(a) => Self::run_with(config, true, |c, s| a.run(c, s)).await,
            Add(a)      => Self::run_with(config, false, |_, mut s| a.run(&mut s)).await,
            Toggle(a)   => Self::run_with(config, false, |_, mut s| a.run(&mut s)).await,
            Delete(a)   => Self::run_with(config, false, |_, mut s| a.run(&mut s)).await,
            List(a)     => Self::run_with(config, false, |_, s| a.run(&s)).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, tui: bool, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&Config, Store) -> Result<(), Box<dyn Error>>,
    {
        let config = parse_config(config).await?;
        let target = match (tui, config.state_dir.as_deref()) {
            (true, Some(dir)) => LogTarget::File(dir),
            _ => LogTarget::Stderr,
        };
        logging::init(target)?;
        tracing::debug!(?config, "configuration loaded");

        let store = open_store(&config)?;
        f(&config, store)
    }
}

/// Open the event store described by the configuration.
pub fn open_store(config: &Config) -> Result<Store, Box<dyn Error>> {
    let storage: Box<dyn Storage> = match &config.state_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => {
            tracing::warn!("no state directory available, tasks will not be saved");
            Box::new(MemoryStorage::new())
        }
    };
    Ok(EventStore::load(storage, config.storage_key.as_str())?)
}
