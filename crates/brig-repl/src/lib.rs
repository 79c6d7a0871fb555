//! brig REPL — interactive loop over a jailed storage backend.
//!
//! Handles line editing and history via rustyline; everything typed is
//! handed to the kernel's command dispatcher. The async backend is driven
//! with `Runtime::block_on`, so the user-visible model stays synchronous.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::runtime::Runtime;

use brig_kernel::{CommandRegistry, LocalBackend, MemoryBackend, Outcome, Session, StorageBackend};

/// REPL state: command table, session, and the runtime that drives them.
pub struct Repl {
    registry: CommandRegistry,
    session: Session,
    runtime: Runtime,
}

impl Repl {
    /// REPL over the real filesystem jailed at `root`.
    ///
    /// The root is created if missing; failure here is fatal and reported
    /// before any prompt is shown.
    pub fn with_local_root(root: PathBuf) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let backend = runtime
            .block_on(LocalBackend::open(&root))
            .with_context(|| format!("Failed to open root directory: {}", root.display()))?;
        Ok(Self::assemble(runtime, Arc::new(backend)))
    }

    /// REPL over an empty in-memory backend.
    pub fn with_memory() -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self::assemble(runtime, Arc::new(MemoryBackend::new())))
    }

    fn assemble(runtime: Runtime, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            session: Session::new(backend),
            runtime,
        }
    }

    /// Real location of the jail root, for the startup banner.
    pub fn root_description(&self) -> String {
        self.session.backend().describe_root()
    }

    /// Dispatch one input line.
    pub fn process_line(&mut self, line: &str) -> Outcome {
        self.runtime
            .block_on(self.registry.dispatch(line, &mut self.session))
    }

    /// Run the interactive loop until `exit`, `quit`, or EOF.
    pub fn run(&mut self) -> Result<()> {
        let mut rl: Editor<(), DefaultHistory> =
            Editor::new().context("Failed to create editor")?;

        let history_path = directories::BaseDirs::new()
            .map(|b| b.data_dir().join("brig").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Err(e) = rl.load_history(path) {
                // A missing file is expected on first run.
                let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
                if !is_not_found {
                    tracing::warn!("Failed to load history: {}", e);
                }
            }
        }

        loop {
            let prompt = self.session.prompt();

            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = rl.add_history_entry(line.as_str()) {
                            tracing::warn!("Failed to add history entry: {}", e);
                        }
                    }

                    match self.process_line(&line) {
                        Outcome::Success(out) => {
                            if !out.is_empty() {
                                println!("{out}");
                            }
                        }
                        Outcome::Failure(msg) => eprintln!("{msg}"),
                        Outcome::Exit => {
                            println!("Goodbye!");
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        save_history(&mut rl, &history_path);
        Ok(())
    }
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_repl_round_trip() {
        let mut repl = Repl::with_memory().unwrap();

        assert_eq!(
            repl.process_line("pwd"),
            Outcome::Success("/".into())
        );
        assert_eq!(
            repl.process_line("ls"),
            Outcome::Success("Directory is empty".into())
        );
        assert_eq!(repl.process_line("exit"), Outcome::Exit);
    }

    #[test]
    fn memory_repl_reports_unknown_commands() {
        let mut repl = Repl::with_memory().unwrap();
        assert_eq!(
            repl.process_line("bogus"),
            Outcome::Failure("Unknown command: bogus, use 'help' for available commands".into())
        );
    }

    #[test]
    fn root_description_for_memory_backend() {
        let repl = Repl::with_memory().unwrap();
        assert_eq!(repl.root_description(), "memory:");
    }
}
