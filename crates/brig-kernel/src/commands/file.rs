//! file — Report file type and content classification.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::classify::{is_text, mime_for_extension, SCAN_WINDOW};
use crate::session::Session;

pub struct File;

#[async_trait]
impl Command for File {
    fn name(&self) -> &str {
        "file"
    }

    fn usage(&self) -> &str {
        "file <filename>"
    }

    fn description(&self) -> &str {
        "Show file type and content classification"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let Some(raw) = args.first() else {
            return Outcome::failure(format!("Usage: {}", self.usage()));
        };

        let target = session.resolve(raw);
        let backend = session.backend().clone();

        let info = match backend.stat(&target).await {
            Ok(info) => info,
            Err(_) => return Outcome::failure(format!("File does not exist: {raw}")),
        };

        if info.is_dir() {
            return Outcome::success(format!("{raw}: {}", info.kind.as_str()));
        }

        let mut out = format!("{raw}: {}", info.kind.as_str());
        match backend.read_at(&target, 0, SCAN_WINDOW as u64).await {
            Ok(window) => {
                if is_text(&window) {
                    out.push_str(", text file");
                } else {
                    out.push_str(", binary file");
                }
                if let Some(mime) = mime_for_extension(raw) {
                    out.push_str(&format!(" ({mime})"));
                }
            }
            Err(_) => out.push_str(", cannot read content"),
        }
        Outcome::success(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::vpath::VirtualPath;
    use std::sync::Arc;

    fn vp(s: &str) -> VirtualPath {
        VirtualPath::normalize(s)
    }

    fn make_session() -> Session {
        let backend = MemoryBackend::new();
        backend.write(&vp("/notes.txt"), b"plain text\n").unwrap();
        backend.write(&vp("/blob.bin"), &[0u8, 1, 2, 3]).unwrap();
        backend.write(&vp("/sub/x"), b"x").unwrap();
        Session::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn text_file_with_known_extension() {
        let mut session = make_session();
        let outcome = File.run(&["notes.txt".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Success("notes.txt: regular file, text file (text/plain)".into())
        );
    }

    #[tokio::test]
    async fn binary_file_without_mime() {
        let mut session = make_session();
        let outcome = File.run(&["blob.bin".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Success("blob.bin: regular file, binary file".into())
        );
    }

    #[tokio::test]
    async fn directory_reports_type_only() {
        let mut session = make_session();
        let outcome = File.run(&["sub".into()], &mut session).await;
        assert_eq!(outcome, Outcome::Success("sub: directory".into()));
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let mut session = make_session();
        let outcome = File.run(&["ghost".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Failure("File does not exist: ghost".into())
        );
    }

    #[tokio::test]
    async fn no_argument_prints_usage() {
        let mut session = make_session();
        let outcome = File.run(&[], &mut session).await;
        assert_eq!(outcome, Outcome::Failure("Usage: file <filename>".into()));
    }
}
