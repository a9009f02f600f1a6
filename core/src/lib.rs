// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of taskcal: the task events placed on calendar dates, and the store
//! that owns them and mirrors every change to a key-value storage.

mod config;
mod error;
mod event;
mod id;
mod storage;
mod store;

pub use crate::config::{APP_NAME, Config, DEFAULT_STORAGE_KEY, WeekStart};
pub use crate::error::{StorageError, StoreError};
pub use crate::event::{DATE_FORMAT, Event, parse_date};
pub use crate::id::{Clock, IdGenerator, SystemClock};
pub use crate::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::store::EventStore;
