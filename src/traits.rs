//! Core traits for dependency injection and testability
//!
//! The installer never talks to the host directly. Processes, the
//! terminal and the user are reached through these traits so that the
//! whole provisioning flow can run against fakes in tests:
//! - `CommandRunner` executes external commands
//! - `ConsentProvider` asks the user for the password and the yes/no answer
//! - `Reporter` renders per-target status lines

use crate::error::Result;
use crate::exec::{CommandOutput, ExternalCommand, SystemRunner};
use crate::ui::status::Status;
use crate::ui::{TerminalConsent, TerminalReporter};
use crate::utils::paths::HomePaths;

/// Trait for running external commands
///
/// Implementations block until the command has exited. A non-zero exit is
/// NOT an error at this level; only failing to spawn or wait is.
pub trait CommandRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput>;
}

/// Trait for the interactive questions asked at startup
pub trait ConsentProvider {
    /// Whether the process already has administrative rights
    fn is_elevated(&self) -> bool;

    /// Ask for the escalation password without echoing it
    fn ask_password(&self, prompt: &str) -> Result<String>;

    /// Ask a free-form question and return the raw answer
    fn ask_line(&self, question: &str) -> Result<String>;
}

/// Trait for progress output
pub trait Reporter {
    fn section(&self, title: &str);

    /// Transient status, overwritten by the next `finish` for the same target
    fn progress(&self, name: &str, status: Status);

    fn finish(&self, name: &str, status: Status);

    /// Free text shown below a status line (verbose output)
    fn detail(&self, text: &str);
}

/// Application context holding all dependencies
pub struct AppContext {
    pub runner: Box<dyn CommandRunner>,
    pub consent: Box<dyn ConsentProvider>,
    pub reporter: Box<dyn Reporter>,
    pub paths: HomePaths,
}

impl AppContext {
    /// Create a new context with the given dependencies
    pub fn new(
        runner: Box<dyn CommandRunner>,
        consent: Box<dyn ConsentProvider>,
        reporter: Box<dyn Reporter>,
        paths: HomePaths,
    ) -> Self {
        Self {
            runner,
            consent,
            reporter,
            paths,
        }
    }

    /// Create a context wired to the real host and terminal
    pub fn system() -> Result<Self> {
        Ok(Self::new(
            Box::new(SystemRunner),
            Box::new(TerminalConsent),
            Box::new(TerminalReporter),
            HomePaths::from_user_dirs()?,
        ))
    }
}
