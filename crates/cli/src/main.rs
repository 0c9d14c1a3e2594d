mod cli;
mod error;
mod fetch;
mod theme;
mod view;
mod watch;

use std::process;

use clap::Parser;
use estudio_vis::theme::Theme;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::cli::Cli;
use crate::cli::Commands;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let system_theme = cli.system_theme.map(Theme::from);

    let result = match cli.command {
        Commands::Render(args) => view::render(args, system_theme),
        Commands::Fetch(args) => fetch::fetch(args),
        Commands::Watch(args) => watch::watch(args, system_theme),
        Commands::Theme(args) => theme::theme(args, system_theme),
    };

    if let Err(error) = result {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_tracing() {
    // default to INFO logs but allow the RUST_LOG env variable to override.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}
