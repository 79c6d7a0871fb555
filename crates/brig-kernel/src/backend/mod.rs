//! Storage backend abstraction.
//!
//! Commands never touch the real filesystem directly; they go through
//! `Arc<dyn StorageBackend>`. Each backend owns the jail: it maps a
//! [`VirtualPath`] to its own storage and can never be handed a path that
//! resolves above its root (see [`crate::vpath`]). Two implementations:
//!
//! - [`LocalBackend`]: real filesystem under a fixed root (tokio::fs)
//! - [`MemoryBackend`]: in-memory map, for tests and ephemeral sessions
//!
//! Session-facing behavior like "describe the real root for the prompt" is
//! part of the trait contract, so callers never downcast to a concrete type.

mod local;
mod memory;

pub use local::LocalBackend;
pub use memory::MemoryBackend;

use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::vpath::VirtualPath;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend operation errors.
///
/// These are caught at the command-handler boundary and turned into failure
/// outcomes; they never cross the dispatcher as faults.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("is a directory: {0}")]
    IsDirectory(String),
    #[error("not a directory: {0}")]
    NotDirectory(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => BackendError::NotFound(err.to_string()),
            ErrorKind::IsADirectory => BackendError::IsDirectory(err.to_string()),
            ErrorKind::NotADirectory => BackendError::NotDirectory(err.to_string()),
            ErrorKind::PermissionDenied => BackendError::PermissionDenied(err.to_string()),
            _ => BackendError::Io(err.to_string()),
        }
    }
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Unknown,
}

impl FileKind {
    /// Human-readable type string, as printed by `file` and `stat`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Regular => "regular file",
            FileKind::Directory => "directory",
            FileKind::Symlink => "symbolic link",
            FileKind::BlockDevice => "block device",
            FileKind::CharDevice => "character device",
            FileKind::Fifo => "FIFO",
            FileKind::Socket => "socket",
            FileKind::Unknown => "unknown",
        }
    }

    /// Type character for the first column of an ls-style permission string.
    fn type_char(&self) -> char {
        match self {
            FileKind::Directory => 'd',
            FileKind::Symlink => 'l',
            FileKind::BlockDevice => 'b',
            FileKind::CharDevice => 'c',
            FileKind::Fifo => 'p',
            FileKind::Socket => 's',
            FileKind::Regular | FileKind::Unknown => '-',
        }
    }
}

/// Metadata for one file or directory, as consumed by the commands.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Entry name (not the full path).
    pub name: String,
    pub kind: FileKind,
    /// Size in bytes.
    pub size: u64,
    /// Permission bits (low 12 bits of the POSIX mode).
    pub mode: u32,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

impl FileInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// ls-style permission string, e.g. `drwxr-xr-x`.
    pub fn permissions(&self) -> String {
        format_permissions(self.kind, self.mode)
    }
}

/// Abstract storage interface consumed by the command layer.
///
/// All paths are virtual: rooted at the jail, already normalized. The
/// backend decides what "real" location they correspond to.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// True if something exists at `path`.
    async fn exists(&self, path: &VirtualPath) -> bool {
        self.stat(path).await.is_ok()
    }

    /// True if `path` exists and is a directory.
    async fn is_directory(&self, path: &VirtualPath) -> bool {
        matches!(self.stat(path).await, Ok(info) if info.is_dir())
    }

    /// Metadata for `path`.
    async fn stat(&self, path: &VirtualPath) -> BackendResult<FileInfo>;

    /// Entries of the directory at `path`, sorted by name. `.` and `..`
    /// never appear.
    async fn list(&self, path: &VirtualPath) -> BackendResult<Vec<FileInfo>>;

    /// Read up to `len` bytes starting at byte `offset`.
    ///
    /// An offset at or beyond the end of the file yields an empty buffer,
    /// not an error. `len == 0` is an empty read.
    async fn read_at(&self, path: &VirtualPath, offset: u64, len: u64) -> BackendResult<Vec<u8>>;

    /// Create a directory (and parents) at `path`.
    async fn mkdir(&self, path: &VirtualPath) -> BackendResult<()>;

    /// Real location of the jail root, for the prompt and the startup
    /// banner. Virtual backends return a descriptive placeholder.
    fn describe_root(&self) -> String;
}

/// Format a byte count, optionally scaled for humans.
///
/// Scaled form divides by 1024 through B/KB/MB/GB/TB and keeps one decimal
/// place above the base unit: 1536 becomes `1.5KB`.
pub fn format_size(size: u64, human_readable: bool) -> String {
    if !human_readable {
        return size.to_string();
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut scaled = size as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{size}B")
    } else {
        format!("{scaled:.1}{}", UNITS[unit])
    }
}

/// ls-style 10-character permission string from a kind and mode bits.
pub fn format_permissions(kind: FileKind, mode: u32) -> String {
    let mut perm = String::with_capacity(10);
    perm.push(kind.type_char());

    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        perm.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        perm.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        perm.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }

    perm
}

/// Format a timestamp as local `YYYY-MM-DD HH:MM:SS`, or `-` if unknown.
pub fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}
