//! hexdump — Dump file bytes with binary-rendered byte groups.

use async_trait::async_trait;

use super::{Command, Outcome, MAX_READ_BYTES};
use crate::dump::{format_dump, BYTES_PER_LINE};
use crate::session::Session;

pub struct Hexdump;

struct DumpArgs {
    offset: u64,
    len: u64,
    path: String,
}

fn parse_args(args: &[String]) -> Result<DumpArgs, String> {
    let mut offset = 0u64;
    let mut len = MAX_READ_BYTES;
    let mut path: Option<&str> = None;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-offset" => {
                let value = it.next().ok_or("Usage: hexdump [-offset N] [-len N] <filename>")?;
                offset = value
                    .parse()
                    .map_err(|_| format!("Invalid offset value: {value}"))?;
            }
            "-len" => {
                let value = it.next().ok_or("Usage: hexdump [-offset N] [-len N] <filename>")?;
                len = value
                    .parse()
                    .map_err(|_| format!("Invalid length value: {value}"))?;
                // 0 means "to the end of the file", subject to the cap.
                if len == 0 {
                    len = MAX_READ_BYTES;
                }
            }
            // Unrecognized dash tokens are ignored, not treated as paths.
            other if !other.starts_with('-') => path = Some(other),
            _ => {}
        }
    }

    let path = path.ok_or("Usage: hexdump [-offset N] [-len N] <filename>")?;
    Ok(DumpArgs {
        offset,
        len: len.min(MAX_READ_BYTES),
        path: path.to_string(),
    })
}

#[async_trait]
impl Command for Hexdump {
    fn name(&self) -> &str {
        "hexdump"
    }

    fn usage(&self) -> &str {
        "hexdump [-offset N] [-len N] <filename>"
    }

    fn description(&self) -> &str {
        "Dump file bytes as binary groups with an ASCII column"
    }

    async fn run(&self, args: &[String], session: &mut Session) -> Outcome {
        let parsed = match parse_args(args) {
            Ok(parsed) => parsed,
            Err(msg) => return Outcome::failure(msg),
        };

        let target = session.resolve(&parsed.path);
        let backend = session.backend().clone();

        if !backend.exists(&target).await {
            return Outcome::failure(format!("File does not exist: {}", parsed.path));
        }
        if backend.is_directory(&target).await {
            return Outcome::failure(format!("{} is a directory, cannot hexdump", parsed.path));
        }

        let data = match backend.read_at(&target, parsed.offset, parsed.len).await {
            Ok(data) => data,
            Err(err) => return Outcome::failure(err.to_string()),
        };

        if data.is_empty() {
            return Outcome::success("No data to display (file empty or offset beyond file size)");
        }

        Outcome::success(format_dump(&data, parsed.offset, BYTES_PER_LINE))
    }
}
