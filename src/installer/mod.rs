//! # Idempotent Installer
//!
//! Resolves one target at a time: probe, then skip, install or update, and
//! report the outcome as an aligned status line.
//!
//! ## Target shapes
//!
//! - **apt**: `dpkg-query` probe, `sudo -v` refresh, then `sudo -n apt-get install -y`
//! - **pip**: always `install --user --upgrade`; the freeze listing decides
//!   between "installed" and "updated"
//! - **download**: destination path probe, `curl -LSso`
//! - **git**: repository directory probe, `git clone` or `git pull`
//! - **script**: marker path probe, script fetched with `curl` and handed to
//!   `sh -c` in the foreground
//!
//! Install and update failures are not recovered from. A `failed` line is
//! printed and the error propagates with the tool's exit status.

pub mod presence;

use crate::core::types::{
    AptTarget, DownloadTarget, GitTarget, Outcome, PipTarget, ScriptTarget, Target,
};
use crate::error::{ProvisionError, Result};
use crate::exec::{CommandOutput, ExternalCommand};
use crate::privilege::Credential;
use crate::traits::{CommandRunner, Reporter};
use crate::ui::status::Status;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    credential: Option<&'a Credential>,
    verbose: bool,
    pip_listings: RefCell<HashMap<String, HashSet<String>>>,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn Reporter) -> Self {
        Self {
            runner,
            reporter,
            credential: None,
            verbose: false,
            pip_listings: RefCell::new(HashMap::new()),
        }
    }

    /// Credential used for every privileged command.
    pub fn with_credential(mut self, credential: &'a Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Echo full `git pull` output for updated repositories.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn install(&self, target: &Target) -> Result<Outcome> {
        match target {
            Target::Apt(t) => self.install_apt_package(t),
            Target::Pip(t) => self.install_pip_package(t),
            Target::Download(t) => self.install_from_curl(t),
            Target::Git(t) => self.install_from_git(t),
            Target::Script(t) => self.install_from_script(t),
        }
    }

    pub fn install_apt_package(&self, target: &AptTarget) -> Result<Outcome> {
        let name = target.package.as_str();
        if presence::dpkg_registered(self.runner, name)? {
            return Ok(self.settle(name, Outcome::AlreadyInstalled));
        }

        self.reporter.progress(name, Status::Installing);
        let install = self.elevate(
            name,
            ExternalCommand::new("apt-get")
                .args(["install", "-y"])
                .arg(name),
        )?;
        self.run_action(name, &install)?;

        Ok(self.settle(name, Outcome::Installed))
    }

    pub fn install_pip_package(&self, target: &PipTarget) -> Result<Outcome> {
        let name = target.package.as_str();
        let listed = self.pip_listed(&target.pip, name)?;

        self.reporter.progress(
            name,
            if listed {
                Status::Updating
            } else {
                Status::Installing
            },
        );
        let install = ExternalCommand::new(&target.pip)
            .args(["-q", "-q", "-q", "install", "--user", "--upgrade"])
            .arg(name);
        self.run_action(name, &install)?;

        let outcome = if listed {
            Outcome::Updated
        } else {
            Outcome::Installed
        };
        Ok(self.settle(name, outcome))
    }

    pub fn install_from_curl(&self, target: &DownloadTarget) -> Result<Outcome> {
        let name = target.name.as_str();
        if presence::path_exists(name, &target.destination)? {
            return Ok(self.settle(name, Outcome::AlreadyInstalled));
        }

        for dir in &target.setup_dirs {
            create_dir(dir)?;
        }

        self.reporter.progress(name, Status::Installing);
        let download = ExternalCommand::new("curl")
            .arg("-LSso")
            .path_arg(&target.destination)
            .arg(&target.url);
        self.run_action(name, &download)?;

        Ok(self.settle(name, Outcome::Installed))
    }

    pub fn install_from_git(&self, target: &GitTarget) -> Result<Outcome> {
        if let Some(outcome) = self.refresh_git(target)? {
            return Ok(outcome);
        }

        let name = target.name.as_str();
        let parent = target.clone_parent();
        create_dir(parent)?;

        self.reporter.progress(name, Status::Installing);
        let clone = ExternalCommand::new("git")
            .arg("clone")
            .args(&target.clone_flags)
            .arg(&target.url)
            .path_arg(&target.repo_dir)
            .current_dir(parent);
        self.run_action(name, &clone)?;

        Ok(self.settle(name, Outcome::Installed))
    }

    /// Pull an existing clone. Returns `None` without side effects when the
    /// repository is not there yet.
    pub fn refresh_git(&self, target: &GitTarget) -> Result<Option<Outcome>> {
        let name = target.name.as_str();
        if !presence::path_exists(name, &target.repo_dir)? {
            return Ok(None);
        }

        self.reporter.progress(name, Status::Updating);
        let pull = ExternalCommand::new("git")
            .arg("pull")
            .current_dir(&target.repo_dir);
        let output = self.run_action(name, &pull)?;

        if reports_up_to_date(&output.stdout) {
            return Ok(Some(self.settle(name, Outcome::UpToDate)));
        }

        let outcome = self.settle(name, Outcome::Updated);
        if self.verbose {
            self.reporter.detail(output.stdout.trim_end());
        }
        Ok(Some(outcome))
    }

    pub fn install_from_script(&self, target: &ScriptTarget) -> Result<Outcome> {
        let name = target.name.as_str();
        if presence::path_exists(name, &target.marker)? {
            return Ok(self.settle(name, Outcome::AlreadyInstalled));
        }

        self.reporter.progress(name, Status::Installing);
        let fetch = ExternalCommand::new("curl")
            .arg("-fsSL")
            .arg(&target.script_url);
        let script = self.run_action(name, &fetch)?.stdout;

        // The script may prompt, so the status line is final before it starts.
        self.reporter.finish(name, Status::Installing);
        let run = ExternalCommand::new("sh")
            .arg("-c")
            .arg(script)
            .labelled(format!("sh -c \"$(curl -fsSL {})\"", target.script_url))
            .foreground();
        self.run_action(name, &run)?;

        Ok(self.settle(name, Outcome::Installed))
    }

    fn pip_listed(&self, pip: &str, package: &str) -> Result<bool> {
        let mut listings = self.pip_listings.borrow_mut();
        if !listings.contains_key(pip) {
            let frozen = presence::pip_frozen(self.runner, pip)?;
            listings.insert(pip.to_string(), frozen);
        }

        Ok(listings
            .get(pip)
            .is_some_and(|names| names.contains(&presence::normalize_pip_name(package))))
    }

    /// Refresh the sudo timestamp, then wrap `command` in `sudo -n`.
    fn elevate(&self, name: &str, command: ExternalCommand) -> Result<ExternalCommand> {
        let Some(credential) = self.credential else {
            return Ok(command);
        };
        if let Some(refresh) = credential.refresh_command() {
            self.run_action(name, &refresh)?;
        }
        Ok(command.elevated(credential))
    }

    fn run_action(&self, name: &str, command: &ExternalCommand) -> Result<CommandOutput> {
        let output = match self.runner.run(command) {
            Ok(output) => output,
            Err(e) => {
                self.reporter.finish(name, Status::Failed);
                return Err(e);
            }
        };

        if output.success() {
            return Ok(output);
        }

        self.reporter.finish(name, Status::Failed);
        Err(ProvisionError::ExternalCommandFailure {
            command: command.display(),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        })
    }

    fn settle(&self, name: &str, outcome: Outcome) -> Outcome {
        self.reporter.finish(name, outcome.into());
        outcome
    }
}

/// Old git prints "up-to-date", current git "up to date".
fn reports_up_to_date(pull_output: &str) -> bool {
    pull_output.contains("up-to-date") || pull_output.contains("up to date")
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ProvisionError::IoError {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
