//! help — Command summary.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::session::Session;

pub struct Help;

const HELP_TEXT: &str = "\
Available commands:
  ls [-l] [path]                           List directory contents
  file <filename>                          Show file type
  stat <filename>                          Show file metadata
  du [-h] [path]                           Show disk usage
  cat <filename>                           Display file contents (text files only)
  cd [path]                                Change directory
  pwd                                      Print working directory
  hexdump [-offset N] [-len N] <filename>  Dump file bytes
  help, ?                                  Show this help
  exit, quit                               Leave the shell";

#[async_trait]
impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn usage(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Show available commands"
    }

    async fn run(&self, _args: &[String], _session: &mut Session) -> Outcome {
        Outcome::success(HELP_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn mentions_every_command() {
        let mut session = Session::new(Arc::new(MemoryBackend::new()));
        let Outcome::Success(out) = Help.run(&[], &mut session).await else {
            panic!("expected success");
        };
        for name in [
            "ls", "file", "stat", "du", "cat", "cd", "pwd", "hexdump", "help", "exit",
        ] {
            assert!(out.contains(name), "help is missing {name}");
        }
    }
}
