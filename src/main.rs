use callmap::cli::{Cli, Commands, Verbosity};
use callmap::config::Config;
use callmap::ui::formatter::Formatter;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("callmap={}", verbosity.to_log_level()).into());

    let (json_layer, text_layer) = if std::env::var_os("CALLMAP_LOG_JSON").is_some() {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(true);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let loaded = Config::load();

    let mut verbosity = cli.verbosity();
    if verbosity == Verbosity::Normal {
        if let Some(level) = loaded.as_ref().ok().and_then(|c| c.run.verbosity) {
            verbosity = Verbosity::from_count(level);
        }
    }
    initialize_tracing(verbosity);
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("CALLMAP_GIT_HASH"),
        built = env!("CALLMAP_BUILD_DATE"),
        "callmap starting"
    );

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Config::default()
    });

    let result = match cli.command {
        Commands::Run(mut args) => {
            args.merge_config(&config);
            callmap::cli::commands::run(args)
        }
        Commands::Check(args) => callmap::cli::commands::check(args),
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "callmap", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{}", Formatter::error(format!("Error: {err}")));
        return Err(err.into());
    }
    Ok(())
}
