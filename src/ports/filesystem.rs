//! Filesystem port for store I/O.

use std::path::Path;

/// Provides filesystem access for reading and writing store files.
///
/// Abstracting the filesystem lets the store run against memory in tests
/// and against recorded interactions during replay.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Replaces the contents of a file, creating parent directories as
    /// needed.
    ///
    /// Readers must observe either the old contents or the new contents,
    /// never a partial write.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Appends to a file, creating it and its parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Blocks until an exclusive lock on `path` is held.
    ///
    /// The lock is shared by every holder of the same path, in this
    /// process or another, and is released when the guard drops.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be created or locked.
    fn lock(&self, path: &Path) -> Result<LockGuard, Box<dyn std::error::Error + Send + Sync>>;
}

/// Keeps a [`FileSystem::lock`] held until dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard {
    _held: Option<Box<dyn Send>>,
}

impl LockGuard {
    /// Guard that releases its lock when `held` is dropped.
    pub fn new(held: impl Send + 'static) -> Self {
        Self { _held: Some(Box::new(held)) }
    }

    /// Guard for adapters with nothing to release.
    pub fn released() -> Self {
        Self { _held: None }
    }
}
