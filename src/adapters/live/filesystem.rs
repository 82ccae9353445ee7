//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;

use crate::ports::filesystem::{FileSystem, LockGuard};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

/// Parent directory of `path`, created if missing.
fn ensure_parent(path: &Path) -> std::io::Result<&Path> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    Ok(parent)
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let parent = ensure_parent(path)?;
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        ensure_parent(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn lock(&self, path: &Path) -> Result<LockGuard, Box<dyn std::error::Error + Send + Sync>> {
        ensure_parent(path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;
        FileExt::lock_exclusive(&file)?;
        // Closing the file releases the lock.
        Ok(LockGuard::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn write_creates_parents_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/settings.yaml");
        let fs = LiveFileSystem;

        fs.write(&path, "first").unwrap();
        fs.write(&path, "second").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "second");
        let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1, "staging files must not linger");
    }

    #[test]
    fn append_extends_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history/upc.yaml");
        let fs = LiveFileSystem;

        fs.append(&path, "a\n").unwrap();
        fs.append(&path, "b\n").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn exists_reflects_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let fs = LiveFileSystem;

        assert!(!fs.exists(&path));
        fs.write(&path, "x").unwrap();
        assert!(fs.exists(&path));
    }

    #[test]
    fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        assert!(fs.read_to_string(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn lock_excludes_a_second_holder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".lock");
        let released = Arc::new(AtomicBool::new(false));

        let guard = LiveFileSystem.lock(&path).unwrap();
        let waiter = {
            let path = path.clone();
            let released = Arc::clone(&released);
            std::thread::spawn(move || {
                let _second = LiveFileSystem.lock(&path).unwrap();
                released.load(Ordering::SeqCst)
            })
        };

        std::thread::sleep(Duration::from_millis(100));
        released.store(true, Ordering::SeqCst);
        drop(guard);

        assert!(waiter.join().unwrap(), "second lock acquired while the first was held");
    }
}
