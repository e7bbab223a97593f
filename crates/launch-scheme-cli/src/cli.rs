//! CLI argument definitions for launch-scheme.

use clap::{Parser, Subcommand};
use launch_scheme_core::{Scheme, SearchEnv, ValidatedPlayer, validate_player};

#[derive(Parser)]
#[command(name = "launch-scheme")]
#[command(about = "Open custom URL scheme links in an external media player", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the scheme handler
    Install {
        /// Player name if it is in PATH, or the full path to the player (mpv, vlc)
        #[arg(value_parser = parse_player)]
        player: ValidatedPlayer,
        /// Extra arguments to send to the player
        #[arg(long, allow_hyphen_values = true)]
        extra_args: Option<String>,
        #[command(flatten)]
        scheme: SchemeArg,
    },
    /// Uninstall the scheme handler
    Uninstall {
        #[command(flatten)]
        scheme: SchemeArg,
    },
    /// Show which handler artifacts exist for a scheme
    Status {
        #[command(flatten)]
        scheme: SchemeArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
pub struct SchemeArg {
    /// The name to use for the URL scheme (lowercased)
    #[arg(long, env = "LAUNCH_SCHEME_NAME", value_parser = parse_scheme)]
    pub scheme: Scheme,
}

fn parse_player(value: &str) -> launch_scheme_core::Result<ValidatedPlayer> {
    validate_player(value, &SearchEnv::from_process())
}

fn parse_scheme(value: &str) -> launch_scheme_core::Result<Scheme> {
    Scheme::parse(value)
}
