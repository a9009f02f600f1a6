// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use taskcal_core::{Event, EventStore, Storage};

/// Asserts that the stored value equals the in-memory collection.
///
/// # Panics
///
/// Panics if nothing is stored or the stored value differs.
pub fn assert_persisted<S: Storage>(store: &EventStore<S>) {
    let raw = store
        .storage()
        .get(store.key())
        .expect("storage should be readable")
        .expect("collection should be stored");
    let stored: Vec<Event> = serde_json::from_str(&raw).expect("stored value should parse");
    assert_eq!(stored, store.events(), "stored collection differs from memory");
}

/// Asserts that the file backing `key` exists in `state_dir`.
#[allow(dead_code)]
pub fn assert_stored_file(state_dir: &Path, key: &str) {
    let path = state_dir.join(format!("{key}.json"));
    assert!(path.exists(), "expected {} to exist", path.display());
}
