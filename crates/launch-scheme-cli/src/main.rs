mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("launch_scheme=warn,launch_scheme_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Install {
            player,
            extra_args,
            scheme,
        } => commands::install::run(player, extra_args, scheme.scheme),
        Command::Uninstall { scheme } => commands::uninstall::run(&scheme.scheme),
        Command::Status { scheme, json } => commands::status::run(&scheme.scheme, json),
    }
}
