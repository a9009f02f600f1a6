// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stores built from a parsed configuration file.

use taskcal_core::{Config, EventStore, FileStorage, WeekStart};

use crate::common::{date, setup_temp_dirs, test_config};

#[test]
fn store_follows_configured_key_and_dir() {
    let dirs = setup_temp_dirs().unwrap();
    let toml = format!(
        r#"
state_dir = "{}"
storage_key = "my-tasks"
week_start = "monday"
"#,
        dirs.state_dir.to_str().unwrap().replace('\\', "/")
    );
    let mut config: Config = toml::from_str(&toml).unwrap();
    config.normalize().unwrap();
    assert_eq!(config.week_start, WeekStart::Monday);

    let state_dir = config.state_dir.clone().unwrap();
    let mut store = EventStore::load(FileStorage::new(state_dir), &config.storage_key).unwrap();
    store.create("configured", Some(date(2024, 6, 1))).unwrap();

    assert!(dirs.state_dir.join("my-tasks.json").exists());
}

#[test]
fn test_config_normalizes_unchanged() {
    let dirs = setup_temp_dirs().unwrap();
    let mut config = test_config(&dirs.state_dir);
    let before = config.clone();
    config.normalize().unwrap();
    assert_eq!(config, before);
}
