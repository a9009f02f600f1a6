// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const TASKCAL_LOG_ENV: &str = "TASKCAL_LOG";
const LOG_FILE_NAME: &str = "taskcal.log";

/// Where log lines are written.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    /// Append to `taskcal.log` inside the given directory.
    File(&'a Path),
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(target: LogTarget<'_>) -> Result<(), Box<dyn Error>> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(dir) => {
            fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!("subscriber already installed: {e}");
    }
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(TASKCAL_LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
