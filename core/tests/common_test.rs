// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration test for the common module.
//!
//! Verifies that common test utilities work correctly.

mod common;

use common::{date, setup_temp_dirs, test_config};

#[test]
fn common_module_imports_work() {
    let dirs = setup_temp_dirs().unwrap();
    assert!(dirs.state_dir.exists());
}

#[test]
fn common_module_fixtures_work() {
    let dirs = setup_temp_dirs().unwrap();
    let config = test_config(&dirs.state_dir);
    assert_eq!(config.state_dir.as_deref(), Some(dirs.state_dir.as_path()));
    assert_eq!(date(2024, 6, 1).to_string(), "2024-06-01");
}
