//! stat — Show file metadata.

use async_trait::async_trait;

use super::{Command, Outcome};
use crate::backend::format_time;
use crate::session::Session;

pub struct Stat;

#[async_trait]
impl Command for Stat {
    fn name(&self) -> &str {
        "stat"
    }

    fn usage(&self) -> &str {
        "stat <filename>"
    }

    fn description(&self) -> &str {
        "Show file metadata"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let Some(raw) = args.first() else {
            return Outcome::failure(format!("Usage: {}", self.usage()));
        };

        let target = session.resolve(raw);
        let info = match session.backend().stat(&target).await {
            Ok(info) => info,
            Err(_) => return Outcome::failure(format!("File does not exist: {raw}")),
        };

        let out = format!(
            "File: {}\n\
             Type: {}\n\
             Size: {} bytes\n\
             Permissions: {} ({:o})\n\
             Modified: {}\n\
             Accessed: {}\n\
             Created: {}",
            raw,
            info.kind.as_str(),
            info.size,
            info.permissions(),
            info.mode,
            format_time(info.modified),
            format_time(info.accessed),
            format_time(info.created),
        );
        Outcome::success(out)
    }
}
