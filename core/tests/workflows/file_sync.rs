// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Loading data written by someone else: valid, malformed, or unreadable.

use taskcal_core::{DEFAULT_STORAGE_KEY, EventStore, FileStorage, StoreError};

use crate::common::{assert_persisted, date, setup_temp_dirs, write_raw_events};

#[test]
fn loads_collection_written_in_storage_layout() {
    let dirs = setup_temp_dirs().unwrap();
    write_raw_events(
        &dirs.state_dir,
        DEFAULT_STORAGE_KEY,
        r#"[
            {"id":"1717200000000","title":"Write report","date":"2024-06-01","completed":false},
            {"id":"1717200000001","title":"Ship it","date":"2024-06-02","completed":true}
        ]"#,
    );

    let store = EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.events()[0].title, "Write report");
    assert_eq!(store.events()[1].date, date(2024, 6, 2));
    assert!(store.events()[1].completed);
}

#[test]
fn malformed_collection_loads_empty_and_is_replaced() {
    let dirs = setup_temp_dirs().unwrap();
    write_raw_events(&dirs.state_dir, DEFAULT_STORAGE_KEY, "[{\"id\": 1,");

    let mut store =
        EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY).unwrap();
    assert!(store.is_empty());

    store.create("fresh", Some(date(2024, 6, 1))).unwrap();
    assert_persisted(&store);
}

#[test]
fn unreadable_collection_is_an_error() {
    let dirs = setup_temp_dirs().unwrap();
    std::fs::create_dir_all(dirs.state_dir.join("calendarEvents.json")).unwrap();

    let result = EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY);
    assert!(matches!(result, Err(StoreError::Storage(_))));
}

#[test]
fn separate_keys_do_not_interfere() {
    let dirs = setup_temp_dirs().unwrap();
    let mut work = EventStore::load(FileStorage::new(&dirs.state_dir), "work").unwrap();
    let mut home = EventStore::load(FileStorage::new(&dirs.state_dir), "home").unwrap();

    work.create("standup", Some(date(2024, 6, 3))).unwrap();
    home.create("groceries", Some(date(2024, 6, 3))).unwrap();

    let work = EventStore::load(FileStorage::new(&dirs.state_dir), "work").unwrap();
    assert_eq!(work.len(), 1);
    assert_eq!(work.events()[0].title, "standup");
}
