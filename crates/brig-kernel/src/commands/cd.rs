//! cd — Change the current virtual directory.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::session::Session;

pub struct Cd;

#[async_trait]
impl Command for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn usage(&self) -> &str {
        "cd [path]"
    }

    fn description(&self) -> &str {
        "Change directory"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let raw = args.first().map(String::as_str).unwrap_or("/");

        match session.change_directory(raw).await {
            Ok(outcome) if outcome.clamped => Outcome::success(
                "Access denied: cannot navigate above the root directory",
            ),
            Ok(_) => Outcome::success(""),
            Err(_) => Outcome::failure(format!("Cannot change to directory: {raw}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::vpath::VirtualPath;
    use std::sync::Arc;

    fn make_session() -> Session {
        let backend = MemoryBackend::new();
        backend
            .write(&VirtualPath::normalize("/sub/file.txt"), b"x")
            .unwrap();
        Session::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn changes_into_directory() {
        let mut session = make_session();
        let outcome = Cd.run(&["sub".into()], &mut session).await;
        assert_eq!(outcome, Outcome::Success("".into()));
        assert_eq!(session.cwd().as_str(), "/sub");
    }

    #[tokio::test]
    async fn no_argument_returns_to_root() {
        let mut session = make_session();
        Cd.run(&["sub".into()], &mut session).await;
        let outcome = Cd.run(&[], &mut session).await;
        assert_eq!(outcome, Outcome::Success("".into()));
        assert_eq!(session.cwd().as_str(), "/");
    }

    #[tokio::test]
    async fn file_target_fails() {
        let mut session = make_session();
        let outcome = Cd.run(&["sub/file.txt".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Failure("Cannot change to directory: sub/file.txt".into())
        );
        assert_eq!(session.cwd().as_str(), "/");
    }

    #[tokio::test]
    async fn missing_target_fails() {
        let mut session = make_session();
        let outcome = Cd.run(&["nowhere".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Failure("Cannot change to directory: nowhere".into())
        );
    }

    #[tokio::test]
    async fn escape_attempt_clamps_and_warns() {
        let mut session = make_session();
        let outcome = Cd.run(&["..".into()], &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Success("Access denied: cannot navigate above the root directory".into())
        );
        assert_eq!(session.cwd().as_str(), "/");
    }
}
