//! du — Recursive disk usage.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::backend::{format_size, BackendResult, StorageBackend};
use crate::session::Session;
use crate::vpath::VirtualPath;

pub struct Du;

/// Sum entry sizes under `path`, iteratively to keep the future `Send`
/// without boxed recursion.
async fn total_size(backend: &dyn StorageBackend, path: &VirtualPath) -> BackendResult<u64> {
    let info = backend.stat(path).await?;
    if !info.is_dir() {
        return Ok(info.size);
    }

    let mut total = 0u64;
    let mut pending = vec![path.clone()];
    while let Some(dir) = pending.pop() {
        for entry in backend.list(&dir).await? {
            if entry.is_dir() {
                pending.push(dir.child(&entry.name));
            } else {
                total += entry.size;
            }
        }
    }
    Ok(total)
}

#[async_trait]
impl Command for Du {
    fn name(&self) -> &str {
        "du"
    }

    fn usage(&self) -> &str {
        "du [-h] [path]"
    }

    fn description(&self) -> &str {
        "Show disk usage"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let mut human_readable = false;
        let mut raw = ".";
        for arg in args {
            if arg == "-h" {
                human_readable = true;
            } else if !arg.starts_with('-') {
                // Unrecognized dash tokens are ignored, not treated as paths.
                raw = arg;
            }
        }

        let target = session.resolve(raw);
        let backend = session.backend().clone();

        if !backend.exists(&target).await {
            return Outcome::failure(format!("Path does not exist: {raw}"));
        }

        match total_size(backend.as_ref(), &target).await {
            // Echo the path as the user typed it, not the resolved form.
            Ok(total) => {
                Outcome::success(format!("{}\t{raw}", format_size(total, human_readable)))
            }
            Err(err) => Outcome::failure(err.to_string()),
        }
    }
}
