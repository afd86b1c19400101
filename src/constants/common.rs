// Common constants used throughout the codebase

/// Title printed in the opening banner
pub const BANNER_TITLE: &str = "DJetelina .files";

/// Total width of every status line, section rule and banner
pub const OUTPUT_WIDTH: usize = 80;

/// Width reserved for the status word, sized for "already installed"
pub const LONGEST_STATUS: usize = "already installed".len();

/// `dpkg-query -W` exit code for "no package matches"
pub const DPKG_QUERY_NOT_FOUND: i32 = 1;

/// The one yes/no question asked per run
pub const GUI_QUESTION: &str = "Install GUI related packages? (y/n):";
