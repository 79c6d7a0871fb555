//! In-memory storage backend.
//!
//! Used by the test suites and by `--backend=memory` sessions. All data is
//! ephemeral; the jail root is the map itself, so nothing outside it exists
//! to escape to.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::SystemTime;

use async_trait::async_trait;

use super::{BackendError, BackendResult, FileInfo, FileKind, StorageBackend};
use crate::vpath::VirtualPath;

#[derive(Debug, Clone)]
enum Entry {
    File { data: Vec<u8>, modified: SystemTime },
    Directory { modified: SystemTime },
}

impl Entry {
    fn info(&self, name: String) -> FileInfo {
        match self {
            Entry::File { data, modified } => FileInfo {
                name,
                kind: FileKind::Regular,
                size: data.len() as u64,
                mode: 0o644,
                modified: Some(*modified),
                accessed: Some(*modified),
                created: Some(*modified),
            },
            Entry::Directory { modified } => FileInfo {
                name,
                kind: FileKind::Directory,
                size: 0,
                mode: 0o755,
                modified: Some(*modified),
                accessed: Some(*modified),
                created: Some(*modified),
            },
        }
    }
}

/// In-memory backend. Thread-safe via an internal `RwLock`.
#[derive(Debug)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<VirtualPath, Entry>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Create an empty backend. The root directory always exists.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            VirtualPath::root(),
            Entry::Directory {
                modified: SystemTime::now(),
            },
        );
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Seed a file, creating parent directories as needed.
    ///
    /// Test-setup surface; the command layer never writes.
    pub fn write(&self, path: &VirtualPath, data: &[u8]) -> BackendResult<()> {
        let mut entries = self.lock_write()?;
        Self::ensure_parents(&mut entries, path);

        if let Some(Entry::Directory { .. }) = entries.get(path) {
            return Err(BackendError::IsDirectory(path.to_string()));
        }
        entries.insert(
            path.clone(),
            Entry::File {
                data: data.to_vec(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn ensure_parents(entries: &mut HashMap<VirtualPath, Entry>, path: &VirtualPath) {
        let mut current = path.parent();
        while let Some(dir) = current {
            entries.entry(dir.clone()).or_insert(Entry::Directory {
                modified: SystemTime::now(),
            });
            current = dir.parent();
        }
    }

    fn lock_read(
        &self,
    ) -> BackendResult<std::sync::RwLockReadGuard<'_, HashMap<VirtualPath, Entry>>> {
        self.entries
            .read()
            .map_err(|_| BackendError::Io("lock poisoned".into()))
    }

    fn lock_write(
        &self,
    ) -> BackendResult<std::sync::RwLockWriteGuard<'_, HashMap<VirtualPath, Entry>>> {
        self.entries
            .write()
            .map_err(|_| BackendError::Io("lock poisoned".into()))
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn stat(&self, path: &VirtualPath) -> BackendResult<FileInfo> {
        let entries = self.lock_read()?;
        let name = path.file_name().unwrap_or("/").to_string();
        entries
            .get(path)
            .map(|e| e.info(name))
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }

    async fn list(&self, path: &VirtualPath) -> BackendResult<Vec<FileInfo>> {
        let entries = self.lock_read()?;

        match entries.get(path) {
            Some(Entry::Directory { .. }) => {}
            Some(Entry::File { .. }) => {
                return Err(BackendError::NotDirectory(path.to_string()))
            }
            None => return Err(BackendError::NotFound(path.to_string())),
        }

        let mut result = Vec::new();
        for (entry_path, entry) in entries.iter() {
            if entry_path.parent().as_ref() == Some(path) {
                if let Some(name) = entry_path.file_name() {
                    result.push(entry.info(name.to_string()));
                }
            }
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn read_at(&self, path: &VirtualPath, offset: u64, len: u64) -> BackendResult<Vec<u8>> {
        let entries = self.lock_read()?;
        match entries.get(path) {
            Some(Entry::File { data, .. }) => {
                let size = data.len() as u64;
                if offset >= size || len == 0 {
                    return Ok(Vec::new());
                }
                let end = (offset + len).min(size) as usize;
                Ok(data[offset as usize..end].to_vec())
            }
            Some(Entry::Directory { .. }) => Err(BackendError::IsDirectory(path.to_string())),
            None => Err(BackendError::NotFound(path.to_string())),
        }
    }

    async fn mkdir(&self, path: &VirtualPath) -> BackendResult<()> {
        let mut entries = self.lock_write()?;
        Self::ensure_parents(&mut entries, path);

        match entries.get(path) {
            Some(Entry::Directory { .. }) => Ok(()),
            Some(Entry::File { .. }) => Err(BackendError::NotDirectory(path.to_string())),
            None => {
                entries.insert(
                    path.clone(),
                    Entry::Directory {
                        modified: SystemTime::now(),
                    },
                );
                Ok(())
            }
        }
    }

    fn describe_root(&self) -> String {
        "memory:".to_string()
    }
}
