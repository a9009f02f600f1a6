// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the taskcal-core crate.
//!
//! These tests run the event store against real files in a temporary state
//! directory, across restarts.

mod config_driven;
mod event_lifecycle;
mod file_sync;
