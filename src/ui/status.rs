//! Aligned status lines.
//!
//! `name.......................................................installed`
//!
//! The name is dot-filled to `OUTPUT_WIDTH - LONGEST_STATUS` columns and the
//! status word is right-aligned in the remaining `LONGEST_STATUS` columns, so
//! every word ends on the same column regardless of name length. Padding is
//! computed on the plain word; only the word itself is colored.

use crate::constants::{LONGEST_STATUS, OUTPUT_WIDTH};
use crate::core::types::Outcome;
use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Installing,
    Updating,
    Installed,
    Updated,
    UpToDate,
    AlreadyInstalled,
    NotInstalled,
    Failed,
}

impl Status {
    pub fn word(self) -> &'static str {
        match self {
            Self::Installing => "installing",
            Self::Updating => "updating",
            Self::Installed => "installed",
            Self::Updated => "updated",
            Self::UpToDate => "up to date",
            Self::AlreadyInstalled => "already installed",
            Self::NotInstalled => "not installed",
            Self::Failed => "failed",
        }
    }

    pub fn paint(self) -> ColoredString {
        let word = self.word();
        match self {
            Self::Installing | Self::Updating => word.blue(),
            Self::Installed | Self::Updated => word.green(),
            Self::UpToDate | Self::AlreadyInstalled | Self::NotInstalled => word.bright_black(),
            Self::Failed => word.red(),
        }
    }
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::AlreadyInstalled => Self::AlreadyInstalled,
            Outcome::Installed => Self::Installed,
            Outcome::Updated => Self::Updated,
            Outcome::UpToDate => Self::UpToDate,
        }
    }
}

/// Everything left of the status word: the name plus its dot filler.
pub fn leader(name: &str, status: Status) -> String {
    let spacing = OUTPUT_WIDTH - LONGEST_STATUS;
    let fill = LONGEST_STATUS.saturating_sub(status.word().chars().count());
    format!("{:.<spacing$}{}", name, ".".repeat(fill))
}

pub fn status_line(name: &str, status: Status) -> String {
    format!("{}{}", leader(name, status), status.paint())
}
