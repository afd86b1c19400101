pub mod catalog;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod core;
pub mod error;
pub mod exec;
pub mod installer;
pub mod privilege;
pub mod traits;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_support;

use clap::Parser;
use commands::provision::{self, ProvisionOptions};
use std::process::exit;
use traits::AppContext;

/// Run dotstrap CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal Handling (the running child gets the signal too; stop before the next target)
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    let options = ProvisionOptions {
        gui: args.gui,
        verbose: args.global.verbose,
        pull_only: args.pull_only,
    };

    let result = AppContext::system().and_then(|ctx| {
        ui::banner(constants::BANNER_TITLE);
        provision::run(&ctx, &options)
    });

    if let Err(e) = result {
        ui::error(&format!("{}", e));
        exit(e.exit_code());
    }
}
