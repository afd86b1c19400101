//! Credential capture and the yes/no question.
//!
//! The credential is obtained once per run and borrowed by every
//! privileged command afterwards.

use crate::constants::GUI_QUESTION;
use crate::error::{ProvisionError, Result};
use crate::exec::ExternalCommand;
use crate::traits::{CommandRunner, ConsentProvider};
use std::fmt;

/// A password that never shows up in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Already running as root, nothing to escalate
    Root,
    /// sudo password, verified once at startup
    Password(Secret),
}

impl Credential {
    /// `sudo -v` with the password on stdin, run before each privileged
    /// action so the following `sudo -n` finds a valid timestamp.
    pub fn refresh_command(&self) -> Option<ExternalCommand> {
        match self {
            Self::Root => None,
            Self::Password(secret) => Some(
                ExternalCommand::new("sudo")
                    .args(["-S", "-v", "-p", ""])
                    .input(format!("{}\n", secret.expose())),
            ),
        }
    }
}

/// Capture and verify the privilege credential.
///
/// Asks for the password only when not already elevated. The password is
/// checked with `sudo -k` so a cached timestamp cannot mask a wrong one.
pub fn authenticate(
    consent: &dyn ConsentProvider,
    runner: &dyn CommandRunner,
) -> Result<Credential> {
    if consent.is_elevated() {
        return Ok(Credential::Root);
    }

    let user = current_user();
    let password = consent.ask_password(&format!("[sudo] password for {}", user))?;

    let probe = ExternalCommand::new("sudo")
        .args(["-S", "-k", "-p", "", "true"])
        .input(format!("{}\n", password));
    let output = runner.run(&probe)?;

    if !output.success() {
        return Err(ProvisionError::PrivilegeDenied);
    }

    Ok(Credential::Password(Secret::new(password)))
}

/// Ask whether GUI related targets should be installed.
pub fn ask_gui(consent: &dyn ConsentProvider) -> Result<bool> {
    let answer = consent.ask_line(GUI_QUESTION)?;
    parse_answer(&answer)
}

/// Accept exactly `y` or `n`. Only the line ending is stripped.
pub fn parse_answer(answer: &str) -> Result<bool> {
    match answer.trim_end_matches(['\n', '\r']) {
        "y" => Ok(true),
        "n" => Ok(false),
        other => Err(ProvisionError::InvalidUserInput(other.to_string())),
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "user".to_string())
}
