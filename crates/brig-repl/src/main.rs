//! brig CLI entry point.
//!
//! Usage:
//!   brig                       # Browse the default root
//!   brig /path/to/root         # Browse a specific root
//!   brig --backend=memory      # Ephemeral in-memory session

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brig_repl::Repl;

/// Root directory browsed when none is given on the command line.
const DEFAULT_ROOT: &str = "/srv/brig/data";

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    let mut root: Option<PathBuf> = None;
    let mut use_memory = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("brig {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }
            "--backend=memory" => use_memory = true,
            "--backend=local" => use_memory = false,
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                eprintln!("Run 'brig --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
            path => root = Some(PathBuf::from(path)),
        }
    }

    let mut repl = if use_memory {
        Repl::with_memory()?
    } else {
        Repl::with_local_root(root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)))?
    };

    eprintln!("brig v{} — root: {}", env!("CARGO_PKG_VERSION"), repl.root_description());
    eprintln!("Type 'help' for commands, 'exit' to leave.");

    repl.run()?;
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        r#"brig v{} — jailed storage browser

Usage:
  brig [root_directory] [OPTIONS]

Options:
  --backend=local     Browse the real filesystem under the root (default)
  --backend=memory    Ephemeral in-memory session
  -h, --help          Show this help
  -V, --version       Show version

The root defaults to {DEFAULT_ROOT}. All paths typed at the prompt are
virtual: they resolve inside the root and cannot escape it.

Commands:
  ls, file, stat, du, cat, cd, pwd, hexdump, help, exit
"#,
        env!("CARGO_PKG_VERSION")
    );
}
