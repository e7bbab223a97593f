//! Install a scheme handler for a validated player.

use anyhow::{Context, Result};
use launch_scheme_core::{InstallRequest, Scheme, ValidatedPlayer};

use crate::cli_utils::open_backend;

pub fn run(player: ValidatedPlayer, extra_args: Option<String>, scheme: Scheme) -> Result<()> {
    let backend = open_backend()?;
    let request = InstallRequest::new(scheme, player, extra_args);

    backend
        .install(&request)
        .with_context(|| format!("Failed to install handler for '{}:'", request.scheme))?;

    println!(
        "Scheme '{}:' now opens in {} ({}).",
        request.scheme,
        request.player.player,
        request.player.resolved.display()
    );
    Ok(())
}
