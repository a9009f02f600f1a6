// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Create, toggle and delete a task, checking the stored file at each step.

use taskcal_core::{DEFAULT_STORAGE_KEY, EventStore, FileStorage};

use crate::common::{FrozenClock, assert_persisted, assert_stored_file, date, setup_temp_dirs};

#[test]
fn create_toggle_delete_round_trip() {
    let dirs = setup_temp_dirs().unwrap();
    let storage = FileStorage::new(&dirs.state_dir);
    let mut store = EventStore::load(storage, DEFAULT_STORAGE_KEY).unwrap();
    assert!(store.is_empty());

    let event = store
        .create("Write report", Some(date(2024, 6, 1)))
        .unwrap()
        .expect("valid input should create an event");
    assert_eq!(event.title, "Write report");
    assert_eq!(event.date, date(2024, 6, 1));
    assert!(!event.completed);
    assert_eq!(store.events(), std::slice::from_ref(&event));
    assert_stored_file(&dirs.state_dir, DEFAULT_STORAGE_KEY);
    assert_persisted(&store);

    let toggled = store.toggle_complete(&event.id).unwrap().unwrap();
    assert!(toggled.completed);
    assert_persisted(&store);

    store.delete(&event.id).unwrap().unwrap();
    assert!(store.is_empty());
    assert_persisted(&store);

    let raw = std::fs::read_to_string(dirs.state_dir.join("calendarEvents.json")).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn collection_survives_restart() {
    let dirs = setup_temp_dirs().unwrap();

    let (first, second) = {
        let mut store =
            EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY).unwrap();
        let a = store.create("a", Some(date(2024, 6, 1))).unwrap().unwrap();
        let b = store.create("b", Some(date(2024, 6, 3))).unwrap().unwrap();
        store.toggle_complete(&b.id).unwrap();
        (a, store.get(&b.id).cloned().unwrap())
    };

    let store = EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(store.events(), &[first, second]);
}

#[test]
fn ids_stay_unique_across_restarts_with_a_frozen_clock() {
    let dirs = setup_temp_dirs().unwrap();
    let clock = FrozenClock(1_717_200_000_000);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let storage = FileStorage::new(&dirs.state_dir);
        let mut store = EventStore::load_with_clock(storage, DEFAULT_STORAGE_KEY, clock).unwrap();
        let event = store.create("again", Some(date(2024, 6, 1))).unwrap().unwrap();
        ids.push(event.id);
    }

    assert_eq!(ids, ["1717200000000", "1717200000001", "1717200000002"]);
}

#[test]
fn invalid_input_writes_nothing() {
    let dirs = setup_temp_dirs().unwrap();
    let mut store =
        EventStore::load(FileStorage::new(&dirs.state_dir), DEFAULT_STORAGE_KEY).unwrap();

    assert!(store.create(" \t ", Some(date(2024, 6, 1))).unwrap().is_none());
    assert!(store.create("title", None).unwrap().is_none());
    assert!(!dirs.state_dir.join("calendarEvents.json").exists());
}
