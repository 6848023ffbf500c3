use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

// Stand-in for the crate's config module, which src/cli/args.rs refers to
#[allow(dead_code)]
mod config {
    pub struct Config {
        pub run: RunConfig,
        pub output: OutputConfig,
    }

    pub struct RunConfig {
        pub prevent_parent_calls: Option<bool>,
        pub verbosity: Option<u8>,
    }

    pub struct OutputConfig {
        pub format: Option<String>,
        pub show_ledger: Option<bool>,
    }
}

#[allow(dead_code)]
#[path = "src/cli/args.rs"]
mod args;

use args::Cli;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=src/cli/args.rs");
    println!("cargo:rerun-if-changed=build.rs");

    emit_build_metadata();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| "target".to_string()));
    write_man_pages(&out_dir.join("man1"))?;
    write_completions(&out_dir.join("completions"))?;
    Ok(())
}

fn emit_build_metadata() {
    let git_hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    let build_date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    println!("cargo:rustc-env=CALLMAP_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=CALLMAP_BUILD_DATE={}", build_date);
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

/// One page for `callmap` and one per visible subcommand (`callmap-run.1`, ...).
fn write_man_pages(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let root = Cli::command();
    let root_name = root.get_name().to_string();

    render_page(&root, &dir.join(format!("{}.1", root_name)))?;
    for sub in root.get_subcommands().filter(|s| !s.is_hide_set()) {
        let page = dir.join(format!("{}-{}.1", root_name, sub.get_name()));
        render_page(sub, &page)?;
    }
    Ok(())
}

fn render_page(cmd: &clap::Command, path: &Path) -> io::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer)
}

fn write_completions(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut cmd = Cli::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, "callmap", dir)?;
    }
    Ok(())
}
