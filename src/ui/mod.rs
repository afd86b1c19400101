use crate::constants::OUTPUT_WIDTH;
use crate::traits::Reporter;
use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod prompt;
pub mod status;

pub use prompt::TerminalConsent;
use status::{Status, status_line};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Turn colors off when stdout is not a terminal or `NO_COLOR` is set.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Boxed title shown once at startup.
pub fn banner(title: &str) {
    if is_quiet() {
        return;
    }
    let rule = "#".repeat(OUTPUT_WIDTH);
    println!("{}", rule.green());
    println!(
        "{}",
        format!("# {:^width$} #", title, width = OUTPUT_WIDTH - 4).green()
    );
    println!("{}", rule.green());
}

/// Centered section title over a full-width rule.
pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "\n{}",
        format!("{:^width$}", title, width = OUTPUT_WIDTH).green()
    );
    println!("{}", "=".repeat(OUTPUT_WIDTH).green());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue().bold(), msg);
    }
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Only shown with `--verbose`.
pub fn verbose(msg: &str) {
    if is_verbose() {
        eprintln!("{}", msg.dimmed());
    }
}

pub fn indent(msg: &str, level: usize) {
    let spaces = " ".repeat(level * 2);
    for line in msg.lines() {
        println!("{}{}", spaces, line);
    }
}

/// Writes status lines to stdout.
///
/// Transient lines end in `\r` so the final line for the same target
/// overwrites them in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn section(&self, title: &str) {
        section(title);
    }

    fn progress(&self, name: &str, status: Status) {
        if is_quiet() {
            return;
        }
        print!("{}\r", status_line(name, status));
        io::stdout().flush().unwrap_or(());
    }

    fn finish(&self, name: &str, status: Status) {
        println!("{}", status_line(name, status));
    }

    fn detail(&self, text: &str) {
        indent(text, 1);
    }
}
