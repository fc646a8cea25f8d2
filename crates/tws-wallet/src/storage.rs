//! Persistence for the single key record.
//!
//! Backends only move bytes; length and layout checks belong to the record
//! codec. A write always replaces the whole record.

use crate::WalletError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub trait KeyStorage: Send + Sync {
    /// Full contents of the record, or `None` if nothing was ever stored.
    fn read(&self) -> Result<Option<Vec<u8>>, WalletError>;

    /// Replace the record with `record`.
    fn write(&self, record: &[u8]) -> Result<(), WalletError>;
}

/// Single flat file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyStorage for FileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, WalletError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a uniquely named sibling temp file, then rename it over the
    /// record. Concurrent writers never share a temp file and a reader sees
    /// either the old record or a new one.
    fn write(&self, record: &[u8]) -> Result<(), WalletError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
        }

        tmp.write_all(record)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process record. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        *storage.slot() = Some(record.into());
        storage
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot().clone()
    }

    /// Number of writes performed through any clone.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.record.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyStorage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, WalletError> {
        Ok(self.contents())
    }

    fn write(&self, record: &[u8]) -> Result<(), WalletError> {
        *self.slot() = Some(record.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("Wallet"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_replaces_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("Wallet"));

        storage.write(b"first record, longer").unwrap();
        storage.write(b"second").unwrap();

        assert_eq!(storage.read().unwrap().unwrap(), b"second".to_vec());

        // no temp files left behind
        let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("Wallet")]);
    }

    #[test]
    fn test_file_storage_concurrent_writers_and_reader() {
        const RECORD_LEN: usize = 226;
        const ROUNDS: usize = 200;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Wallet");
        let failures = AtomicUsize::new(0);
        let torn_reads = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for fill in [b'a', b'b'] {
                let storage = FileStorage::new(&path);
                let failures = &failures;
                s.spawn(move || {
                    let record = [fill; RECORD_LEN];
                    for _ in 0..ROUNDS {
                        if storage.write(&record).is_err() {
                            failures.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                });
            }

            let reader = FileStorage::new(&path);
            let torn_reads = &torn_reads;
            s.spawn(move || {
                for _ in 0..ROUNDS * 2 {
                    if let Ok(Some(bytes)) = reader.read() {
                        let whole = bytes.len() == RECORD_LEN
                            && bytes.iter().all(|b| *b == bytes[0]);
                        if !whole {
                            torn_reads.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }
            });
        });

        assert_eq!(failures.load(Ordering::SeqCst), 0);
        assert_eq!(torn_reads.load(Ordering::SeqCst), 0);
        let last = FileStorage::new(&path).read().unwrap().unwrap();
        assert_eq!(last.len(), RECORD_LEN);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("Wallet"));
        storage.write(b"record").unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let view = storage.clone();
        assert!(view.contents().is_none());

        storage.write(b"abc").unwrap();
        assert_eq!(view.contents(), Some(b"abc".to_vec()));
        assert_eq!(view.write_count(), 1);
    }
}
