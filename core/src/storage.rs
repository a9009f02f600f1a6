// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StorageError;

/// A synchronous key-value store of strings, used to survive restarts.
pub trait Storage {
    /// Read the value stored under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Stores every key in its own `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the stored values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`.
    pub fn path_of(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);

        match valid {
            true => Ok(self.dir.join(format!("{key}.json"))),
            false => Err(StorageError::InvalidKey(key.to_string())),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_of(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_of(key)?;
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // write aside then rename, a reader never sees a partial value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, &path) {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), %e, "failed to remove temporary file");
            }
            return Err(write_err(source));
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

/// An in-process store.
///
/// Clones share the same map, so a caller can keep a handle and inspect what
/// was written after handing the storage over.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` already stored under `key`.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.into());
        storage
    }

    /// The value under `key`, if any.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// How many times [`Storage::set`] has been called.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
