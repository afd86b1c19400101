use crate::catalog;
use crate::core::types::{Outcome, Target};
use crate::error::{ProvisionError, Result};
use crate::installer::Installer;
use crate::privilege;
use crate::traits::{AppContext, CommandRunner, ConsentProvider, Reporter};
use crate::ui as output;
use crate::ui::status::Status;
use crate::utils::paths::HomePaths;

#[derive(Debug, Default, Clone)]
pub struct ProvisionOptions {
    /// Pre-answered GUI question; asked interactively when `None`
    pub gui: Option<bool>,
    pub verbose: bool,
    /// Only refresh git-backed targets that already exist
    pub pull_only: bool,
}

/// Outcomes of one run, in the order targets were resolved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub outcomes: Vec<(String, Outcome)>,
}

impl Summary {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn describe(&self) -> String {
        let parts: Vec<String> = [
            Outcome::Installed,
            Outcome::Updated,
            Outcome::UpToDate,
            Outcome::AlreadyInstalled,
        ]
        .into_iter()
        .filter(|o| self.count(*o) > 0)
        .map(|o| format!("{} {}", self.count(o), o))
        .collect();

        if parts.is_empty() {
            format!("{} targets processed", self.total())
        } else {
            format!("{} targets processed: {}", self.total(), parts.join(", "))
        }
    }
}

pub fn run(ctx: &AppContext, options: &ProvisionOptions) -> Result<Summary> {
    if options.pull_only {
        output::info("Pull-only mode: refreshing existing git checkouts");
    }

    let summary = run_with(
        ctx.runner.as_ref(),
        ctx.consent.as_ref(),
        ctx.reporter.as_ref(),
        &ctx.paths,
        options,
    )?;

    output::success(&summary.describe());
    Ok(summary)
}

/// Authenticate, ask the GUI question, then resolve every section in order.
pub fn run_with(
    runner: &dyn CommandRunner,
    consent: &dyn ConsentProvider,
    reporter: &dyn Reporter,
    paths: &HomePaths,
    options: &ProvisionOptions,
) -> Result<Summary> {
    run_until(
        runner,
        consent,
        reporter,
        paths,
        options,
        &output::is_interrupted,
    )
}

/// Like [`run_with`], stopping with `Interrupted` once `interrupted` turns
/// true. Checked after each prompt and before each target.
pub fn run_until(
    runner: &dyn CommandRunner,
    consent: &dyn ConsentProvider,
    reporter: &dyn Reporter,
    paths: &HomePaths,
    options: &ProvisionOptions,
    interrupted: &dyn Fn() -> bool,
) -> Result<Summary> {
    if options.pull_only {
        return pull_only(runner, reporter, paths, options, interrupted);
    }

    let credential = privilege::authenticate(consent, runner)?;
    check_interrupted(interrupted)?;
    let gui = match options.gui {
        Some(gui) => gui,
        None => privilege::ask_gui(consent)?,
    };
    check_interrupted(interrupted)?;

    let installer = Installer::new(runner, reporter)
        .with_credential(&credential)
        .verbose(options.verbose);
    let sections = catalog::plan(paths, gui, &catalog::resolve_pip2());

    let mut summary = Summary::default();
    for section in &sections {
        reporter.section(&section.title);
        for target in &section.targets {
            check_interrupted(interrupted)?;
            let outcome = installer.install(target)?;
            summary.outcomes.push((target.name().to_string(), outcome));
        }
    }

    Ok(summary)
}

fn pull_only(
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    paths: &HomePaths,
    options: &ProvisionOptions,
    interrupted: &dyn Fn() -> bool,
) -> Result<Summary> {
    let installer = Installer::new(runner, reporter).verbose(options.verbose);
    let sections = catalog::plan(paths, false, &catalog::resolve_pip2());

    let mut summary = Summary::default();
    for section in &sections {
        let repos: Vec<_> = section.targets.iter().filter_map(Target::as_git).collect();
        if repos.is_empty() {
            continue;
        }

        reporter.section(&section.title);
        for repo in repos {
            check_interrupted(interrupted)?;
            match installer.refresh_git(repo)? {
                Some(outcome) => summary.outcomes.push((repo.name.clone(), outcome)),
                None => reporter.finish(&repo.name, Status::NotInstalled),
            }
        }
    }

    Ok(summary)
}

fn check_interrupted(interrupted: &dyn Fn() -> bool) -> Result<()> {
    if interrupted() {
        return Err(ProvisionError::Interrupted);
    }
    Ok(())
}
