//! Command dispatch.
//!
//! A fixed table of read-oriented commands. Each command parses its own
//! arguments (whitespace tokens, no quoting) and reports through [`Outcome`];
//! backend errors never cross this layer as faults.

mod cat;
mod cd;
mod du;
mod file;
mod help;
mod hexdump;
mod ls;
mod pwd;
mod stat;

use async_trait::async_trait;

use crate::session::Session;

/// Largest number of bytes a single `cat` or `hexdump` will read.
pub const MAX_READ_BYTES: u64 = 1024 * 1024;

/// Result of running one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Normal completion; the text goes to stdout.
    Success(String),
    /// The command failed; the message goes to stderr.
    Failure(String),
    /// The session should end.
    Exit,
}

impl Outcome {
    pub fn success(out: impl Into<String>) -> Self {
        Outcome::Success(out.into())
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Outcome::Failure(msg.into())
    }

    pub fn ok(&self) -> bool {
        !matches!(self, Outcome::Failure(_))
    }
}

/// One entry in the command table.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, as typed by the user.
    fn name(&self) -> &str;

    /// One-line usage string shown by `help`.
    fn usage(&self) -> &str;

    /// Short description shown by `help`.
    fn description(&self) -> &str;

    /// Run with the tokens after the command name.
    async fn run(&self, args: &[String], session: &mut Session) -> Outcome;
}

/// Split a line into whitespace-separated tokens. No quoting or escapes.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// The fixed command table.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register(ls::Ls);
        registry.register(file::File);
        registry.register(stat::Stat);
        registry.register(du::Du);
        registry.register(cat::Cat);
        registry.register(cd::Cd);
        registry.register(pwd::Pwd);
        registry.register(hexdump::Hexdump);
        registry.register(help::Help);
        registry
    }

    fn register(&mut self, command: impl Command + 'static) {
        self.commands.push(Box::new(command));
    }

    fn get(&self, name: &str) -> Option<&dyn Command> {
        // `?` is an alias for help.
        let name = if name == "?" { "help" } else { name };
        self.commands
            .iter()
            .map(|c| c.as_ref())
            .find(|c| c.name() == name)
    }

    /// Tokenize and run one input line.
    ///
    /// Blank lines are a quiet success. `exit` and `quit` short-circuit
    /// before table lookup; they are session controls, not commands.
    pub async fn dispatch(&self, line: &str, session: &mut Session) -> Outcome {
        let tokens = tokenize(line);
        let Some(name) = tokens.first() else {
            return Outcome::success("");
        };

        if name == "exit" || name == "quit" {
            return Outcome::Exit;
        }

        match self.get(name) {
            Some(command) => command.run(&tokens[1..], session).await,
            None => Outcome::failure(format!(
                "Unknown command: {name}, use 'help' for available commands"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::sync::Arc;

    fn make_session() -> Session {
        Session::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("ls -l  /a/b"), vec!["ls", "-l", "/a/b"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize("\tcat\tx "), vec!["cat", "x"]);
    }

    #[tokio::test]
    async fn empty_line_is_quiet_success() {
        let registry = CommandRegistry::new();
        let mut session = make_session();
        assert_eq!(
            registry.dispatch("", &mut session).await,
            Outcome::Success(String::new())
        );
        assert_eq!(
            registry.dispatch("   ", &mut session).await,
            Outcome::Success(String::new())
        );
    }

    #[tokio::test]
    async fn exit_and_quit_end_the_session() {
        let registry = CommandRegistry::new();
        let mut session = make_session();
        assert_eq!(registry.dispatch("exit", &mut session).await, Outcome::Exit);
        assert_eq!(registry.dispatch("quit", &mut session).await, Outcome::Exit);
        // Arguments after exit are ignored.
        assert_eq!(
            registry.dispatch("exit now", &mut session).await,
            Outcome::Exit
        );
    }

    #[tokio::test]
    async fn unknown_command_names_the_culprit() {
        let registry = CommandRegistry::new();
        let mut session = make_session();
        let outcome = registry.dispatch("frobnicate /x", &mut session).await;
        assert_eq!(
            outcome,
            Outcome::Failure(
                "Unknown command: frobnicate, use 'help' for available commands".into()
            )
        );
    }

    #[tokio::test]
    async fn question_mark_is_help() {
        let registry = CommandRegistry::new();
        let mut session = make_session();
        let help = registry.dispatch("help", &mut session).await;
        let question = registry.dispatch("?", &mut session).await;
        assert!(help.ok());
        assert_eq!(help, question);
    }
}
