use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dotstrap",
    about = "Idempotent workstation provisioning",
    long_about = "Installs apt and pip packages, vim plugins and oh-my-zsh plugins. \
                  Targets that are already present are skipped, git checkouts are pulled.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    /// Answer the "install GUI related packages" question up front
    #[arg(long, value_name = "y|n", value_parser = parse_gui_answer)]
    pub gui: Option<bool>,

    /// Only pull git checkouts that already exist (no sudo, no prompts)
    #[arg(long)]
    pub pull_only: bool,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output (show git pull output and every command run)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

fn parse_gui_answer(value: &str) -> Result<bool, String> {
    crate::privilege::parse_answer(value).map_err(|e| e.to_string())
}
