//! Session state: the jail plus the current virtual directory.
//!
//! The only mutable state across commands is `cwd`, and it is replaced
//! atomically — a failed `cd` leaves it untouched. Everything else is an
//! `Arc` to the shared backend.

use std::sync::Arc;

use thiserror::Error;

use crate::backend::StorageBackend;
use crate::vpath::{escapes_root, VirtualPath};

/// Why a directory change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeDirError {
    #[error("not a directory or missing: {0}")]
    NotADirectory(String),
}

/// Result of a successful directory change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdOutcome {
    /// True when the raw input tried to climb above the virtual root and was
    /// clamped. The caller surfaces a warning; the change itself succeeded.
    pub clamped: bool,
}

/// One interactive session against a jailed backend.
pub struct Session {
    backend: Arc<dyn StorageBackend>,
    cwd: VirtualPath,
}

impl Session {
    /// Start a session at the virtual root.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            cwd: VirtualPath::root(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Current virtual directory.
    pub fn cwd(&self) -> &VirtualPath {
        &self.cwd
    }

    /// Resolve a raw user path against the current directory.
    pub fn resolve(&self, raw: &str) -> VirtualPath {
        VirtualPath::resolve(raw, &self.cwd)
    }

    /// Change the current directory.
    ///
    /// The target must resolve to an existing directory; only then is `cwd`
    /// replaced. Raw input that climbs above the root is clamped and
    /// reported via [`CdOutcome::clamped`] so the caller can warn.
    pub async fn change_directory(&mut self, raw: &str) -> Result<CdOutcome, ChangeDirError> {
        let clamped = escapes_root(raw, &self.cwd);
        let target = self.resolve(raw);
        debug_assert!(target.is_safe());

        if clamped {
            tracing::warn!(input = raw, resolved = %target, "path climbs above the jail root; clamped");
        }

        if !self.backend.is_directory(&target).await {
            return Err(ChangeDirError::NotADirectory(raw.to_string()));
        }

        self.cwd = target;
        Ok(CdOutcome { clamped })
    }

    /// Prompt text: `[<real location>] <virtual cwd> $ `.
    pub fn prompt(&self) -> String {
        let root = self.backend.describe_root();
        let cwd = self.cwd.as_str();
        if cwd == "/" {
            format!("[{root}] {cwd} $ ")
        } else {
            format!("[{root}{cwd}] {cwd} $ ")
        }
    }
}
