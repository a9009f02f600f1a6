// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use chrono::NaiveDate;
use taskcal_core::{Clock, Config, DEFAULT_STORAGE_KEY, WeekStart};

/// Creates a test configuration storing state in `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        storage_key: DEFAULT_STORAGE_KEY.to_string(),
        week_start: WeekStart::Sunday,
    }
}

/// Shorthand for a valid calendar date.
#[must_use]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Writes `content` as the stored value of `key`, bypassing the store.
pub fn write_raw_events(state_dir: &Path, key: &str, content: &str) {
    std::fs::write(state_dir.join(format!("{key}.json")), content)
        .expect("failed to write raw events");
}

/// A clock stuck at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub i64);

impl Clock for FrozenClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
