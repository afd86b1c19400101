use super::*;
use crate::privilege::Secret;
use crate::test_support::{Event, FakeRunner, RecordingReporter};
use std::path::PathBuf;
use tempfile::TempDir;

const DPKG: &str = "dpkg-query -W";

fn installed() -> CommandOutput {
    CommandOutput::new(Some(0), "install ok installed", "")
}

fn not_found() -> CommandOutput {
    CommandOutput::new(Some(1), "", "dpkg-query: no packages found matching")
}

fn syntastic(home: &TempDir) -> GitTarget {
    GitTarget::new(
        "syntastic",
        "https://github.com/vim-syntastic/syntastic.git",
        home.path().join(".vim/bundle/syntastic"),
    )
    .flag("--depth=1")
}

#[test]
fn present_apt_package_is_never_installed() {
    let runner = FakeRunner::new().respond(DPKG, installed());
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter);

    let outcome = installer.install(&Target::apt("vim")).unwrap();

    assert_eq!(outcome, Outcome::AlreadyInstalled);
    assert_eq!(runner.count("apt-get"), 0);
    assert_eq!(
        reporter.events(),
        vec![Event::Finish("vim".into(), Status::AlreadyInstalled)]
    );
}

#[test]
fn present_apt_package_reports_already_installed_even_if_install_would_fail() {
    let runner = FakeRunner::new()
        .respond(DPKG, installed())
        .respond("apt-get", CommandOutput::new(Some(100), "", "E: broken"));
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter)
        .install(&Target::apt("zsh"))
        .unwrap();

    assert_eq!(outcome, Outcome::AlreadyInstalled);
}

#[test]
fn absent_apt_package_is_installed_with_credential() {
    let credential = Credential::Password(Secret::new("hunter2"));
    let runner = FakeRunner::new().respond(DPKG, not_found());
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter).with_credential(&credential);

    let outcome = installer.install(&Target::apt("shellcheck")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    let calls = runner.calls();
    assert_eq!(calls.len(), 3);
    let refresh = &calls[1];
    assert_eq!(refresh.get_args(), &["-S", "-v", "-p", ""]);
    assert_eq!(refresh.get_input(), Some("hunter2\n"));
    let install = &calls[2];
    assert_eq!(install.program(), "sudo");
    assert_eq!(
        install.get_args(),
        &["-n", "apt-get", "install", "-y", "shellcheck"]
    );
    assert_eq!(install.get_input(), None, "password must not reach apt-get");
    assert_eq!(
        reporter.events(),
        vec![
            Event::Progress("shellcheck".into(), Status::Installing),
            Event::Finish("shellcheck".into(), Status::Installed),
        ]
    );
}

#[test]
fn root_credential_runs_apt_directly() {
    let runner = FakeRunner::new().respond(DPKG, not_found());
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter).with_credential(&Credential::Root);

    installer.install(&Target::apt("curl")).unwrap();

    assert_eq!(runner.calls().last().unwrap().program(), "apt-get");
}

#[test]
fn rejected_sudo_refresh_never_runs_apt() {
    let credential = Credential::Password(Secret::new("changed"));
    let runner = FakeRunner::new()
        .respond(DPKG, not_found())
        .respond("sudo -S -v", CommandOutput::new(Some(1), "", "Sorry, try again."));
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter).with_credential(&credential);

    let err = installer.install(&Target::apt("shellcheck")).unwrap_err();

    assert!(matches!(err, ProvisionError::ExternalCommandFailure { .. }));
    assert_eq!(runner.count("apt-get"), 0);
    assert_eq!(
        reporter.finals(),
        vec![("shellcheck".to_string(), Status::Failed)]
    );
}

#[test]
fn ambiguous_probe_stops_before_install() {
    let runner = FakeRunner::new().respond(DPKG, CommandOutput::new(Some(2), "", "locked"));
    let reporter = RecordingReporter::new();

    let err = Installer::new(&runner, &reporter)
        .install(&Target::apt("vim"))
        .unwrap_err();

    assert!(matches!(err, ProvisionError::PresenceCheckAmbiguous { .. }));
    assert_eq!(runner.count("apt-get"), 0);
}

#[test]
fn failed_install_reports_failed_and_keeps_exit_code() {
    let runner = FakeRunner::new()
        .respond(DPKG, not_found())
        .respond(
            "apt-get install",
            CommandOutput::new(Some(100), "", "E: Unable to locate package i3blocks\n"),
        );
    let reporter = RecordingReporter::new();

    let err = Installer::new(&runner, &reporter)
        .install(&Target::apt("i3blocks"))
        .unwrap_err();

    assert_eq!(err.exit_code(), 100);
    assert!(err.to_string().contains("Unable to locate package"));
    assert_eq!(
        reporter.finals(),
        vec![("i3blocks".to_string(), Status::Failed)]
    );
}

#[test]
fn pip_package_listed_in_freeze_is_updated() {
    let runner = FakeRunner::new().respond(
        "pip freeze",
        CommandOutput::new(Some(0), "Flake8==3.9.2\npipenv==2022.1.8\n", ""),
    );
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter);

    assert_eq!(
        installer.install(&Target::pip("pip", "flake8")).unwrap(),
        Outcome::Updated
    );
    assert_eq!(
        installer.install(&Target::pip("pip", "pydocstyle")).unwrap(),
        Outcome::Installed
    );

    assert_eq!(runner.count("pip freeze"), 1, "listing is read once per pip");
    assert_eq!(
        runner.count("pip -q -q -q install --user --upgrade"),
        2,
        "pip packages are always upgrade-installed"
    );
    assert_eq!(
        reporter.events()[0],
        Event::Progress("flake8".into(), Status::Updating)
    );
}

#[test]
fn download_skips_existing_file() {
    let home = TempDir::new().unwrap();
    let destination = home.path().join("pathogen.vim");
    std::fs::write(&destination, "\" pathogen").unwrap();

    let runner = FakeRunner::new();
    let reporter = RecordingReporter::new();
    let target = Target::Download(DownloadTarget {
        name: "pathogen".into(),
        url: "https://tpo.pe/pathogen.vim".into(),
        destination,
        setup_dirs: vec![home.path().join("never-created")],
    });

    let outcome = Installer::new(&runner, &reporter).install(&target).unwrap();

    assert_eq!(outcome, Outcome::AlreadyInstalled);
    assert!(runner.calls().is_empty());
    assert!(!home.path().join("never-created").exists());
}

#[test]
fn download_creates_setup_dirs_then_fetches() {
    let home = TempDir::new().unwrap();
    let autoload = home.path().join(".vim/autoload");
    let bundle = home.path().join(".vim/bundle");
    let destination = autoload.join("pathogen.vim");

    let runner = FakeRunner::new();
    let reporter = RecordingReporter::new();
    let target = Target::Download(DownloadTarget {
        name: "pathogen".into(),
        url: "https://tpo.pe/pathogen.vim".into(),
        destination: destination.clone(),
        setup_dirs: vec![autoload.clone(), bundle.clone()],
    });

    let outcome = Installer::new(&runner, &reporter).install(&target).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert!(autoload.is_dir());
    assert!(bundle.is_dir());
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program(), "curl");
    assert_eq!(
        calls[0].get_args(),
        &[
            "-LSso".to_string(),
            destination.to_string_lossy().into_owned(),
            "https://tpo.pe/pathogen.vim".to_string(),
        ]
    );
}

#[test]
fn absent_syntastic_is_cloned_into_bundle_dir() {
    let home = TempDir::new().unwrap();
    let target = syntastic(&home);
    let runner = FakeRunner::new();
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter)
        .install_from_git(&target)
        .unwrap();

    assert_eq!(outcome, Outcome::Installed);
    let bundle = home.path().join(".vim/bundle");
    assert!(bundle.is_dir(), "clone parent is created on demand");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let clone = &calls[0];
    assert_eq!(clone.program(), "git");
    assert_eq!(
        clone.get_args(),
        &[
            "clone".to_string(),
            "--depth=1".to_string(),
            "https://github.com/vim-syntastic/syntastic.git".to_string(),
            target.repo_dir.to_string_lossy().into_owned(),
        ]
    );
    assert_eq!(clone.working_dir(), Some(bundle.as_path()));
    assert_eq!(
        reporter.finals(),
        vec![("syntastic".to_string(), Status::Installed)]
    );
}

#[test]
fn up_to_date_pull_reports_up_to_date_without_detail() {
    let home = TempDir::new().unwrap();
    let target = syntastic(&home);
    std::fs::create_dir_all(&target.repo_dir).unwrap();

    let runner = FakeRunner::new().respond(
        "git pull",
        CommandOutput::new(Some(0), "Already up to date.\n", ""),
    );
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter)
        .verbose(true)
        .install_from_git(&target)
        .unwrap();

    assert_eq!(outcome, Outcome::UpToDate);
    assert_eq!(runner.count("git clone"), 0);
    assert_eq!(runner.calls()[0].working_dir(), Some(target.repo_dir.as_path()));
    assert_eq!(
        reporter.events(),
        vec![
            Event::Progress("syntastic".into(), Status::Updating),
            Event::Finish("syntastic".into(), Status::UpToDate),
        ]
    );
}

#[test]
fn legacy_up_to_date_wording_is_recognized() {
    assert!(reports_up_to_date("Already up-to-date.\n"));
    assert!(reports_up_to_date("Already up to date.\n"));
    assert!(!reports_up_to_date("Fast-forward\n plugin/k.zsh | 2 +-\n"));
}

#[test]
fn second_run_after_clone_is_up_to_date() {
    let home = TempDir::new().unwrap();
    let target = syntastic(&home);
    let runner = FakeRunner::new().respond(
        "git pull",
        CommandOutput::new(Some(0), "Already up to date.\n", ""),
    );
    let reporter = RecordingReporter::new();
    let installer = Installer::new(&runner, &reporter);

    assert_eq!(installer.install_from_git(&target).unwrap(), Outcome::Installed);
    // the fake runner does not touch the disk, stand in for the clone
    std::fs::create_dir_all(&target.repo_dir).unwrap();
    assert_eq!(installer.install_from_git(&target).unwrap(), Outcome::UpToDate);
}

#[test]
fn changed_pull_is_updated_and_echoed_when_verbose() {
    let home = TempDir::new().unwrap();
    let target = syntastic(&home);
    std::fs::create_dir_all(&target.repo_dir).unwrap();
    let pull_output = "Updating 1a2b3c4..5d6e7f8\nFast-forward\n README.md | 1 +\n";

    let runner =
        FakeRunner::new().respond("git pull", CommandOutput::new(Some(0), pull_output, ""));

    let quiet_reporter = RecordingReporter::new();
    let outcome = Installer::new(&runner, &quiet_reporter)
        .install_from_git(&target)
        .unwrap();
    assert_eq!(outcome, Outcome::Updated);
    assert!(
        !quiet_reporter
            .events()
            .iter()
            .any(|e| matches!(e, Event::Detail(_)))
    );

    let verbose_reporter = RecordingReporter::new();
    Installer::new(&runner, &verbose_reporter)
        .verbose(true)
        .install_from_git(&target)
        .unwrap();
    assert_eq!(
        verbose_reporter.events().last(),
        Some(&Event::Detail(pull_output.trim_end().to_string()))
    );
}

#[test]
fn refresh_leaves_absent_repository_alone() {
    let home = TempDir::new().unwrap();
    let target = syntastic(&home);
    let runner = FakeRunner::new();
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter)
        .refresh_git(&target)
        .unwrap();

    assert_eq!(outcome, None);
    assert!(runner.calls().is_empty());
    assert!(reporter.events().is_empty());
    assert!(!home.path().join(".vim").exists());
}

#[test]
fn script_runs_fetched_installer_in_foreground() {
    let home = TempDir::new().unwrap();
    let target = Target::Script(ScriptTarget {
        name: "oh-my-zsh".into(),
        script_url: "https://example.invalid/install.sh".into(),
        marker: home.path().join(".oh-my-zsh"),
    });
    let runner = FakeRunner::new().respond(
        "curl -fsSL",
        CommandOutput::new(Some(0), "echo installing oh-my-zsh\n", ""),
    );
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter).install(&target).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].program(), "sh");
    assert_eq!(
        calls[1].get_args(),
        &["-c".to_string(), "echo installing oh-my-zsh\n".to_string()]
    );
    assert_eq!(calls[1].mode(), crate::exec::OutputMode::Foreground);
    assert!(calls[1].display().contains("install.sh"));
}

#[test]
fn script_skipped_when_marker_exists() {
    let home = TempDir::new().unwrap();
    let marker: PathBuf = home.path().join(".oh-my-zsh");
    std::fs::create_dir_all(&marker).unwrap();
    let target = Target::Script(ScriptTarget {
        name: "oh-my-zsh".into(),
        script_url: "https://example.invalid/install.sh".into(),
        marker,
    });
    let runner = FakeRunner::new();
    let reporter = RecordingReporter::new();

    let outcome = Installer::new(&runner, &reporter).install(&target).unwrap();

    assert_eq!(outcome, Outcome::AlreadyInstalled);
    assert!(runner.calls().is_empty());
}
