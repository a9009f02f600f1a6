// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`Storage`](crate::Storage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read a stored value
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a value
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The key cannot be mapped onto the backend
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised by the [`EventStore`](crate::EventStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The collection could not be serialized
    #[error("Failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Every id above the largest stored one has been issued
    #[error("No fresh event id left")]
    IdsExhausted,
}
