//! Side-effect-free probes deciding whether a target is already installed.
//!
//! Each probe answers present/absent or fails with
//! `PresenceCheckAmbiguous`; an unexpected answer is never coerced to absent.

use crate::constants::DPKG_QUERY_NOT_FOUND;
use crate::error::{ProvisionError, Result};
use crate::exec::{CommandOutput, ExternalCommand};
use crate::traits::CommandRunner;
use std::collections::HashSet;
use std::path::Path;

pub fn path_exists(target: &str, path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| ProvisionError::PresenceCheckAmbiguous {
        target: target.to_string(),
        probe: format!("stat {}", path.display()),
        code: None,
        detail: e.to_string(),
    })
}

/// `dpkg-query` exits 0 for known packages, 1 for unknown ones.
///
/// A known package still has to report an installed status: removed
/// packages with leftover config stay known to dpkg.
pub fn dpkg_registered(runner: &dyn CommandRunner, package: &str) -> Result<bool> {
    let probe = ExternalCommand::new("dpkg-query").args(["-W", "-f=${Status}", package]);
    let output = runner.run(&probe)?;

    match output.exit_code {
        Some(0) => Ok(is_installed_status(&output.stdout)),
        Some(DPKG_QUERY_NOT_FOUND) => Ok(false),
        _ => Err(ambiguous(package, &probe, &output)),
    }
}

/// Names from `<pip> freeze`, normalized for comparison.
pub fn pip_frozen(runner: &dyn CommandRunner, pip: &str) -> Result<HashSet<String>> {
    let probe = ExternalCommand::new(pip).arg("freeze");
    let output = runner.run(&probe)?;

    if !output.success() {
        return Err(ambiguous(pip, &probe, &output));
    }

    Ok(parse_freeze(&output.stdout))
}

pub fn parse_freeze(listing: &str) -> HashSet<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            line.split(['=', ' ', '@', '<', '>', '~', '!'])
                .next()
                .filter(|name| !name.is_empty())
        })
        .map(normalize_pip_name)
        .collect()
}

/// pip treats `Foo_Bar`, `foo-bar` and `foo.bar` as the same project.
pub fn normalize_pip_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', '.'], "-")
}

fn is_installed_status(status: &str) -> bool {
    status.split_whitespace().last() == Some("installed")
}

fn ambiguous(target: &str, probe: &ExternalCommand, output: &CommandOutput) -> ProvisionError {
    ProvisionError::PresenceCheckAmbiguous {
        target: target.to_string(),
        probe: probe.display(),
        code: output.exit_code,
        detail: match output.exit_code {
            Some(code) => format!("unexpected exit code {}: {}", code, output.stderr.trim()),
            None => "probe was killed by a signal".to_string(),
        },
    }
}
