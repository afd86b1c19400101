//! Typed external commands.
//!
//! Every tool the installer touches (`apt-get`, `dpkg-query`, `pip`, `curl`,
//! `git`, `sh`, `sudo`) is described by an [`ExternalCommand`] value and run
//! through a [`CommandRunner`](crate::traits::CommandRunner). Arguments are
//! always passed as a vector, never joined into a shell string.

use crate::error::{ProvisionError, Result};
use crate::privilege::Credential;
use crate::traits::CommandRunner;
use crate::ui;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// How the child's stdio is wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// stdout/stderr are captured and returned
    #[default]
    Captured,
    /// stdout/stderr go straight to the terminal
    Foreground,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    input: Option<String>,
    mode: OutputMode,
    label: Option<String>,
}

impl ExternalCommand {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            working_dir: None,
            input: None,
            mode: OutputMode::Captured,
            label: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    /// Append a filesystem path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Data written to the child's stdin before waiting on it.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn foreground(mut self) -> Self {
        self.mode = OutputMode::Foreground;
        self
    }

    /// Text shown instead of the real command line, for commands whose
    /// arguments are too large to print.
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Wrap the command so it runs with elevated privileges.
    ///
    /// With a root credential the command already runs elevated and is
    /// returned as is. Otherwise it becomes `sudo -n <program> <args>`: sudo
    /// must already hold a fresh timestamp (see [`Credential::refresh_command`])
    /// and the password never reaches the wrapped program's stdin.
    pub fn elevated(self, credential: &Credential) -> Self {
        match credential {
            Credential::Root => self,
            Credential::Password(_) => {
                let mut args = vec!["-n".to_string(), self.program];
                args.extend(self.args);
                Self {
                    program: "sudo".to_string(),
                    args,
                    working_dir: self.working_dir,
                    input: self.input,
                    mode: self.mode,
                    label: self.label.map(|label| format!("sudo {}", label)),
                }
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn get_input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Shell-quoted command line, for logs and error messages.
    pub fn display(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let words: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect();
        shlex::try_join(words.iter().copied()).unwrap_or_else(|_| words.join(" "))
    }
}

// Input may carry a password, keep it out of debug output.
impl fmt::Debug for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCommand")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .field("input", &self.input.as_ref().map(|_| "<redacted>"))
            .field("mode", &self.mode)
            .field("label", &self.label)
            .finish()
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: Option<i32>, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs commands on the host through `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<CommandOutput> {
        ui::verbose(&format!("$ {}", command.display()));

        let mut cmd = Command::new(command.program());
        cmd.args(command.get_args());
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }

        cmd.stdin(if command.get_input().is_some() {
            Stdio::piped()
        } else if command.mode() == OutputMode::Foreground {
            Stdio::inherit()
        } else {
            Stdio::null()
        });

        match command.mode() {
            OutputMode::Captured => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
                let mut child = spawn(&mut cmd, command)?;
                feed_input(&mut child, command)?;
                let output = child
                    .wait_with_output()
                    .map_err(|e| system_failure(command, e))?;

                Ok(CommandOutput {
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            OutputMode::Foreground => {
                cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
                let mut child = spawn(&mut cmd, command)?;
                feed_input(&mut child, command)?;
                let status = child.wait().map_err(|e| system_failure(command, e))?;

                Ok(CommandOutput {
                    exit_code: status.code(),
                    ..CommandOutput::default()
                })
            }
        }
    }
}

fn spawn(cmd: &mut Command, command: &ExternalCommand) -> Result<Child> {
    cmd.spawn().map_err(|e| system_failure(command, e))
}

/// Write the command's input and close stdin.
fn feed_input(child: &mut Child, command: &ExternalCommand) -> Result<()> {
    let (Some(input), Some(mut stdin)) = (command.get_input(), child.stdin.take()) else {
        return Ok(());
    };

    match stdin.write_all(input.as_bytes()) {
        Ok(()) => Ok(()),
        // `sudo -v` with a cached timestamp exits without reading stdin
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(system_failure(command, e)),
    }
}

fn system_failure(command: &ExternalCommand, e: std::io::Error) -> ProvisionError {
    ProvisionError::SystemCommandFailed {
        command: command.display(),
        reason: e.to_string(),
    }
}
