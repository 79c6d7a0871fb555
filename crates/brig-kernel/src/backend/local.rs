//! Local filesystem backend.
//!
//! All access goes through a fixed real root established once at
//! construction; virtual paths are joined under it and can never climb
//! above it because they arrive normalized (see [`crate::vpath`]).

use std::io::SeekFrom;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::{BackendResult, FileInfo, FileKind, StorageBackend};
use crate::vpath::VirtualPath;

/// Storage backend over the real filesystem, jailed at `root`.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Establish the jail root and return the backend.
    ///
    /// The root is resolved to an absolute path; if it does not exist it is
    /// created (mode 0755) first. This is the single process-wide
    /// initialization step: it runs once before the first command and there
    /// is no teardown.
    pub async fn open(root: impl Into<PathBuf>) -> BackendResult<Self> {
        let requested = root.into();

        let root = match fs::canonicalize(&requested).await {
            Ok(abs) => abs,
            Err(_) => {
                use std::os::unix::fs::PermissionsExt;
                fs::create_dir_all(&requested).await?;
                let perm = std::fs::Permissions::from_mode(0o755);
                fs::set_permissions(&requested, perm).await?;
                fs::canonicalize(&requested).await?
            }
        };

        tracing::debug!(root = %root.display(), "local backend initialized");
        Ok(Self { root })
    }

    /// The real jail root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn real(&self, path: &VirtualPath) -> PathBuf {
        path.to_real(&self.root)
    }

    fn info_from_metadata(name: String, meta: &std::fs::Metadata) -> FileInfo {
        let ft = meta.file_type();
        let kind = if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_file() {
            FileKind::Regular
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else {
            use std::os::unix::fs::FileTypeExt;
            if ft.is_block_device() {
                FileKind::BlockDevice
            } else if ft.is_char_device() {
                FileKind::CharDevice
            } else if ft.is_fifo() {
                FileKind::Fifo
            } else if ft.is_socket() {
                FileKind::Socket
            } else {
                FileKind::Unknown
            }
        };

        FileInfo {
            name,
            kind,
            size: meta.len(),
            mode: meta.mode() & 0o7777,
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            created: unix_seconds(meta.ctime()),
        }
    }
}

/// Seconds-since-epoch to `SystemTime`; pre-epoch values are dropped.
fn unix_seconds(secs: i64) -> Option<SystemTime> {
    u64::try_from(secs)
        .ok()
        .map(|s| UNIX_EPOCH + Duration::from_secs(s))
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn stat(&self, path: &VirtualPath) -> BackendResult<FileInfo> {
        let real = self.real(path);
        let meta = fs::symlink_metadata(&real).await?;
        let name = path.file_name().unwrap_or("/").to_string();
        Ok(Self::info_from_metadata(name, &meta))
    }

    async fn list(&self, path: &VirtualPath) -> BackendResult<Vec<FileInfo>> {
        let real = self.real(path);

        let meta = fs::symlink_metadata(&real).await?;
        if !meta.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("not a directory: {path}"),
            )
            .into());
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&real).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Entries that disappear or deny access mid-listing are skipped.
            match fs::symlink_metadata(entry.path()).await {
                Ok(meta) => entries.push(Self::info_from_metadata(name, &meta)),
                Err(err) => {
                    tracing::debug!(%name, %err, "skipping unreadable entry");
                }
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn read_at(&self, path: &VirtualPath, offset: u64, len: u64) -> BackendResult<Vec<u8>> {
        let real = self.real(path);

        let mut file = fs::File::open(&real).await?;
        let size = file.metadata().await?.len();
        if offset >= size || len == 0 {
            return Ok(Vec::new());
        }

        let to_read = len.min(size - offset);
        file.seek(SeekFrom::Start(offset)).await?;

        let mut buf = Vec::with_capacity(to_read as usize);
        let mut handle = file.take(to_read);
        handle.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    async fn mkdir(&self, path: &VirtualPath) -> BackendResult<()> {
        fs::create_dir_all(self.real(path)).await?;
        Ok(())
    }

    fn describe_root(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("brig-test-{}-{}", std::process::id(), id))
    }

    async fn setup() -> (LocalBackend, PathBuf) {
        let dir = temp_dir();
        let _ = fs::remove_dir_all(&dir).await;
        fs::create_dir_all(&dir).await.unwrap();
        (LocalBackend::open(&dir).await.unwrap(), dir)
    }

    async fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir).await;
    }

    fn vp(s: &str) -> VirtualPath {
        VirtualPath::normalize(s)
    }

    #[tokio::test]
    async fn open_creates_missing_root() {
        let dir = temp_dir();
        let _ = fs::remove_dir_all(&dir).await;

        let backend = LocalBackend::open(&dir).await.unwrap();
        assert!(backend.root().is_absolute());
        assert!(fs::metadata(&dir).await.unwrap().is_dir());

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn stat_and_list() {
        let (backend, dir) = setup().await;
        fs::write(dir.join("a.txt"), b"hello").await.unwrap();
        fs::create_dir(dir.join("sub")).await.unwrap();

        let info = backend.stat(&vp("/a.txt")).await.unwrap();
        assert_eq!(info.kind, FileKind::Regular);
        assert_eq!(info.size, 5);
        assert_eq!(info.name, "a.txt");

        let entries = backend.list(&vp("/")).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "sub"]);

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn list_rejects_files() {
        let (backend, dir) = setup().await;
        fs::write(dir.join("plain"), b"x").await.unwrap();

        let err = backend.list(&vp("/plain")).await.unwrap_err();
        assert!(matches!(err, BackendError::NotDirectory(_)));

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn read_at_ranges() {
        let (backend, dir) = setup().await;
        fs::write(dir.join("data"), b"0123456789").await.unwrap();

        let all = backend.read_at(&vp("/data"), 0, 1024).await.unwrap();
        assert_eq!(all, b"0123456789");

        let mid = backend.read_at(&vp("/data"), 3, 4).await.unwrap();
        assert_eq!(mid, b"3456");

        let tail = backend.read_at(&vp("/data"), 8, 100).await.unwrap();
        assert_eq!(tail, b"89");

        let past = backend.read_at(&vp("/data"), 10, 4).await.unwrap();
        assert!(past.is_empty());

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn escape_attempts_stay_inside_root() {
        let (backend, dir) = setup().await;

        // Normalization clamps the traversal, so the read lands on a path
        // inside the jail that simply does not exist.
        let resolved = vp("../../../../etc/passwd");
        assert_eq!(resolved.as_str(), "/etc/passwd");
        let result = backend.read_at(&resolved, 0, 1024).await;
        assert!(matches!(result, Err(BackendError::NotFound(_))));

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn exists_and_is_directory() {
        let (backend, dir) = setup().await;
        fs::create_dir(dir.join("d")).await.unwrap();
        fs::write(dir.join("f"), b"x").await.unwrap();

        assert!(backend.exists(&vp("/d")).await);
        assert!(backend.is_directory(&vp("/d")).await);
        assert!(backend.exists(&vp("/f")).await);
        assert!(!backend.is_directory(&vp("/f")).await);
        assert!(!backend.exists(&vp("/missing")).await);

        cleanup(&dir).await;
    }
}
