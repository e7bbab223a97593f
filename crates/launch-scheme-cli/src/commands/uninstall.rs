//! Remove a scheme handler.

use anyhow::{Context, Result};
use launch_scheme_core::Scheme;

use crate::cli_utils::open_backend;

pub fn run(scheme: &Scheme) -> Result<()> {
    let backend = open_backend()?;
    backend
        .uninstall(scheme)
        .with_context(|| format!("Failed to uninstall handler for '{scheme}:'"))?;

    println!("Scheme '{scheme}:' handler removed.");
    Ok(())
}
