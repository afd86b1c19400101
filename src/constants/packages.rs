//! Hard-coded package lists.

/// apt packages installed on every machine
pub const APT_BASIC: &[&str] = &[
    "python2.7",
    "shellcheck",
    "python-pip",
    "python3-pip",
    "zsh",
    "curl",
    "vim",
    "apt-listchanges",
];

/// apt packages installed only when GUI targets were accepted
pub const APT_GUI: &[&str] = &["i3", "i3lock", "i3blocks", "i3status"];

/// Packages for the python2 pip (or plain `pip` when `pip2` is missing)
pub const PIP2_PACKAGES: &[&str] = &["powerline-status"];

/// Packages for the default interpreter's pip
pub const DEFAULT_PIP_PACKAGES: &[&str] = &["pydocstyle", "flake8", "pipenv"];
