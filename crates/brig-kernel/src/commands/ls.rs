//! ls — List directory contents.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::backend::{format_time, FileInfo};
use crate::session::Session;

pub struct Ls;

fn long_line(info: &FileInfo) -> String {
    format!(
        "{} {:>10} {} {}",
        info.permissions(),
        info.size,
        format_time(info.modified),
        info.name
    )
}

#[async_trait]
impl Command for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn usage(&self) -> &str {
        "ls [-l] [path]"
    }

    fn description(&self) -> &str {
        "List directory contents"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let mut long_format = false;
        let mut raw = ".";
        for arg in args {
            if arg == "-l" {
                long_format = true;
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

        // A non-directory target lists as a single entry, like ls(1).
        if !backend.is_directory(&target).await {
            return match backend.stat(&target).await {
                Ok(info) => {
                    if long_format {
                        Outcome::success(long_line(&info))
                    } else {
                        Outcome::success(info.name)
                    }
                }
                Err(err) => Outcome::failure(err.to_string()),
            };
        }

        let entries = match backend.list(&target).await {
            Ok(entries) => entries,
            Err(err) => return Outcome::failure(err.to_string()),
        };

        if entries.is_empty() {
            return Outcome::success("Directory is empty");
        }

        // Short format is a single two-space-separated line; long format is
        // one entry per line.
        let out = if long_format {
            entries.iter().map(long_line).collect::<Vec<_>>().join("\n")
        } else {
            entries
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join("  ")
        };
        Outcome::success(out)
    }
}
