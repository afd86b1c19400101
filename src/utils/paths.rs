use crate::error::{ProvisionError, Result};
use directories::UserDirs;
use std::path::{Path, PathBuf};

/// Every location the installer writes to, resolved from one home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePaths {
    home: PathBuf,
}

impl HomePaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_user_dirs() -> Result<Self> {
        let user_dirs = UserDirs::new().ok_or_else(|| {
            ProvisionError::PathError("Could not determine user home directory".to_string())
        })?;

        Ok(Self::new(user_dirs.home_dir()))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.vim/<sub>`
    pub fn vim_dir(&self, sub: &str) -> PathBuf {
        self.home.join(".vim").join(sub)
    }

    /// `~/.oh-my-zsh`
    pub fn oh_my_zsh_dir(&self) -> PathBuf {
        self.home.join(".oh-my-zsh")
    }

    /// `~/.oh-my-zsh/custom/<sub>`
    pub fn zsh_custom_dir(&self, sub: &str) -> PathBuf {
        self.oh_my_zsh_dir().join("custom").join(sub)
    }
}
