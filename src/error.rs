use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    /// A presence probe exited with a code that means neither "present" nor "absent"
    #[error("Presence check for '{target}' is ambiguous ({probe}): {detail}")]
    PresenceCheckAmbiguous {
        target: String,
        probe: String,
        code: Option<i32>,
        detail: String,
    },

    #[error("Invalid password :(")]
    PrivilegeDenied,

    #[error("Unrecognized input '{0}', expected 'y' or 'n'")]
    InvalidUserInput(String),

    #[error("Command '{command}' failed with {}: {stderr}", describe_code(.code))]
    ExternalCommandFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt failed: {0}")]
    PromptError(String),

    /// Path resolution error
    #[error("Path error: {0}")]
    PathError(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl ProvisionError {
    /// Process exit status for this error.
    ///
    /// A failing external tool hands its own status through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExternalCommandFailure {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
