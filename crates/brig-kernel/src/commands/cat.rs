//! cat — Display text file contents.

use async_trait::async_trait;

use super::{Command, Outcome, MAX_READ_BYTES};
use crate::classify::is_text;
use crate::session::Session;

pub struct Cat;

#[async_trait]
impl Command for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn usage(&self) -> &str {
        "cat <filename>"
    }

    fn description(&self) -> &str {
        "Display file contents (text files only)"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let Some(raw) = args.first() else {
            return Outcome::failure(format!("Usage: {}", self.usage()));
        };

        let target = session.resolve(raw);
        let backend = session.backend().clone();

        if !backend.exists(&target).await {
            return Outcome::failure(format!("File does not exist: {raw}"));
        }
        if backend.is_directory(&target).await {
            return Outcome::failure(format!("{raw} is a directory, cannot display content"));
        }

        let data = match backend.read_at(&target, 0, MAX_READ_BYTES).await {
            Ok(data) => data,
            Err(err) => return Outcome::failure(err.to_string()),
        };

        if data.is_empty() {
            return Outcome::success("File is empty");
        }
        if !is_text(&data) {
            return Outcome::failure(format!("{raw} is a binary file, cannot display"));
        }

        Outcome::success(String::from_utf8_lossy(&data).into_owned())
    }
}
