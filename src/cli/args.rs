use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "callmap")]
#[command(about = "Replay call-mapped test doubles described in TOML scenarios", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario and check its expectations
    Run(RunArgs),

    /// Validate a scenario's target and call map without running it
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the scenario TOML file
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Keep unmapped calls away from the original implementation
    #[arg(long)]
    pub prevent_parent_calls: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the invocation ledger after the run
    #[arg(long)]
    pub show_ledger: bool,
}

impl RunArgs {
    /// Fill in options the command line left unset from the config file.
    pub fn merge_config(&mut self, config: &crate::config::Config) {
        if !self.prevent_parent_calls {
            self.prevent_parent_calls = config.run.prevent_parent_calls.unwrap_or(false);
        }
        if self.format.is_none() {
            self.format = config
                .output
                .format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok());
        }
        if !self.show_ledger {
            self.show_ledger = config.output.show_ledger.unwrap_or(false);
        }
    }
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the scenario TOML file
    #[arg(short, long)]
    pub scenario: PathBuf,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }

    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}
