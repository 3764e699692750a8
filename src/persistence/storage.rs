//! Byte-level storage backends for persisted stores.

use crate::core::constants::SAVE_DIR_NAME;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Named blob storage. Each store reads and writes one whole snapshot.
pub trait Storage {
    /// Read the stored bytes for `name`, or `None` if nothing was saved.
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>>;

    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}


/// One `<name>.dat` file per store inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage under `~/.emsx-miner/`, creating it if needed.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::in_dir(home_dir.join(SAVE_DIR_NAME))
    }

    /// Storage under an explicit directory, creating it if needed.
    pub fn in_dir(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.dat", name))
    }
}

impl Storage for FileStorage {
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.path_for(name), bytes)
    }
}

/// In-process storage for tests and simulation runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail with a permission error.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    /// Direct access to a stored blob, e.g. to corrupt it in a test.
    pub fn blob_mut(&mut self, name: &str) -> Option<&mut Vec<u8>> {
        self.blobs.get_mut(name)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(name).cloned())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage is read-only",
            ));
        }
        self.blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates FileStorage in a unique temporary directory
    fn temp_storage() -> FileStorage {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "emsx-miner-storage-test-{}-{}",
            std::process::id(),
            test_id
        ));
        FileStorage::in_dir(dir).expect("temp dir should be creatable")
    }

    #[test]
    fn test_file_storage_missing_is_none() {
        let storage = temp_storage();
        assert_eq!(storage.read("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let mut storage = temp_storage();
        storage.write("blob", b"hello").unwrap();

        assert_eq!(storage.read("blob").unwrap(), Some(b"hello".to_vec()));
        assert!(storage.path_for("blob").exists());
        assert!(storage.path_for("blob").to_string_lossy().ends_with("blob.dat"));

        fs::remove_dir_all(storage.dir()).ok();
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.write("a", &[1, 2]).unwrap();
        storage.write("a", &[3]).unwrap();

        assert_eq!(storage.read("a").unwrap(), Some(vec![3]));
        assert!(storage.contains("a"));
        assert!(!storage.contains("b"));
    }

    #[test]
    fn test_failing_storage_rejects_writes() {
        let mut storage = MemoryStorage::failing();

        assert!(storage.write("a", &[1]).is_err());
        assert_eq!(storage.read("a").unwrap(), None);
    }
}
