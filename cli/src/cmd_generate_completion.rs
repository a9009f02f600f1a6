// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::{Generator, generate};

use crate::Cli;

#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a shell completion script for taskcal")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Target shell").value_parser(value_parser!(Shell)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<Shell>("shell") {
            Some(shell) => Self { shell: *shell },
            _ => unreachable!(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.generate(&mut io::stdout().lock());
        Ok(())
    }

    /// Write the completion script for the chosen shell into `buf`.
    pub fn generate(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as ClapShell;

        match self.shell {
            Shell::Bash => write_script(ClapShell::Bash, buf),
            Shell::Elvish => write_script(ClapShell::Elvish, buf),
            Shell::Fish => write_script(ClapShell::Fish, buf),
            Shell::PowerShell => write_script(ClapShell::PowerShell, buf),
            Shell::Zsh => write_script(ClapShell::Zsh, buf),
            Shell::Nushell => write_script(clap_complete_nushell::Nushell, buf),
        }
    }
}

fn write_script(generator: impl Generator, buf: &mut impl io::Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(generator, &mut cmd, bin, buf);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}
