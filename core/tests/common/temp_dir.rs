// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// Temporary directories used for testing.
///
/// Everything under the base directory is removed when dropped.
#[derive(Debug)]
pub struct TempDirs {
    base: TempDir,

    /// State directory for stored values.
    pub state_dir: PathBuf,
}

impl TempDirs {
    /// Creates new temporary directories for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?;
        let state_dir = base.path().join("state");
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { base, state_dir })
    }

    /// Gets the base temporary directory.
    #[must_use]
    #[allow(dead_code)]
    pub fn base(&self) -> PathBuf {
        self.base.path().to_path_buf()
    }
}

/// Sets up temporary directories for integration tests.
///
/// This is a convenience wrapper around [`TempDirs::new`].
pub fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dirs_creates_state_dir() {
        let dirs = TempDirs::new().unwrap();
        assert!(dirs.state_dir.is_dir());
        assert!(dirs.state_dir.starts_with(dirs.base()));
    }

    #[test]
    fn temp_dirs_cleanup_on_drop() {
        let base = {
            let dirs = TempDirs::new().unwrap();
            dirs.base()
        };
        assert!(!base.exists());
    }
}
