use std::fmt;
use std::path::{Path, PathBuf};

/// Result of resolving one target during a run. Never persisted.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Outcome {
    AlreadyInstalled,
    Installed,
    Updated,
    UpToDate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled => write!(f, "already installed"),
            Self::Installed => write!(f, "installed"),
            Self::Updated => write!(f, "updated"),
            Self::UpToDate => write!(f, "up to date"),
        }
    }
}

/// An OS package, probed through `dpkg-query` and installed with `apt-get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptTarget {
    pub package: String,
}

/// A pip package. Always upgrade-installed; the freeze listing only decides
/// whether the result counts as an install or an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipTarget {
    pub pip: String,
    pub package: String,
}

/// A single file fetched with `curl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub name: String,
    pub url: String,
    pub destination: PathBuf,
    /// Directories created before the first download
    pub setup_dirs: Vec<PathBuf>,
}

/// A repository cloned on first run and pulled afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTarget {
    pub name: String,
    pub url: String,
    pub repo_dir: PathBuf,
    pub clone_flags: Vec<String>,
}

impl GitTarget {
    pub fn new(name: &str, url: &str, repo_dir: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            repo_dir,
            clone_flags: Vec::new(),
        }
    }

    pub fn flag(mut self, flag: &str) -> Self {
        self.clone_flags.push(flag.to_string());
        self
    }

    /// Directory the clone runs in.
    pub fn clone_parent(&self) -> &Path {
        self.repo_dir.parent().unwrap_or(&self.repo_dir)
    }
}

/// A remote installer script piped into `sh`, guarded by a marker path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTarget {
    pub name: String,
    pub script_url: String,
    pub marker: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Apt(AptTarget),
    Pip(PipTarget),
    Download(DownloadTarget),
    Git(GitTarget),
    Script(ScriptTarget),
}

impl Target {
    pub fn apt(package: &str) -> Self {
        Self::Apt(AptTarget {
            package: package.to_string(),
        })
    }

    pub fn pip(pip: &str, package: &str) -> Self {
        Self::Pip(PipTarget {
            pip: pip.to_string(),
            package: package.to_string(),
        })
    }

    /// Display label used in status lines
    pub fn name(&self) -> &str {
        match self {
            Self::Apt(t) => &t.package,
            Self::Pip(t) => &t.package,
            Self::Download(t) => &t.name,
            Self::Git(t) => &t.name,
            Self::Script(t) => &t.name,
        }
    }

    /// The repository behind a git-backed target.
    pub fn as_git(&self) -> Option<&GitTarget> {
        match self {
            Self::Git(t) => Some(t),
            _ => None,
        }
    }
}

/// A titled group of targets, printed under its own header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub targets: Vec<Target>,
}

impl Section {
    pub fn new(title: &str, targets: Vec<Target>) -> Self {
        Self {
            title: title.to_string(),
            targets,
        }
    }
}
