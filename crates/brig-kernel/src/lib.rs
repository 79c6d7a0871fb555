//! brig-kernel: The core of brig, a jailed storage browser.
//!
//! This crate provides:
//!
//! - **vpath**: Virtual path normalization and jail clamping
//! - **classify**: Text/binary content heuristic and MIME guessing
//! - **dump**: Binary-grouped byte dump rendering
//! - **backend**: Storage trait with local-filesystem and in-memory impls
//! - **session**: Per-session state (backend handle, current directory)
//! - **commands**: The fixed command table and dispatcher

pub mod backend;
pub mod classify;
pub mod commands;
pub mod dump;
pub mod session;
pub mod vpath;

pub use backend::{
    BackendError, BackendResult, FileInfo, FileKind, LocalBackend, MemoryBackend, StorageBackend,
};
pub use commands::{CommandRegistry, Outcome};
pub use session::Session;
pub use vpath::VirtualPath;
