pub mod args;
pub mod commands;
pub mod output;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, OutputFormat, RunArgs, Verbosity};
