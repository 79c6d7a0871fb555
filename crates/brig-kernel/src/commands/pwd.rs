//! pwd — Print the current virtual directory.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::session::Session;

pub struct Pwd;

#[async_trait]
impl Command for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn usage(&self) -> &str {
        "pwd"
    }

    fn description(&self) -> &str {
        "Print working directory"
    }

    async fn run(&self, _args: &[String], session: &mut Session) -> Outcome {
        Outcome::success(session.cwd().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::vpath::VirtualPath;
    use std::sync::Arc;

    #[tokio::test]
    async fn prints_root_then_subdir() {
        let backend = MemoryBackend::new();
        backend
            .write(&VirtualPath::normalize("/sub/f"), b"x")
            .unwrap();
        let mut session = Session::new(Arc::new(backend));

        assert_eq!(
            Pwd.run(&[], &mut session).await,
            Outcome::Success("/".into())
        );

        session.change_directory("sub").await.unwrap();
        assert_eq!(
            Pwd.run(&[], &mut session).await,
            Outcome::Success("/sub".into())
        );
    }
}
