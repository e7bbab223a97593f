//! Common CLI utility functions shared across commands.

use anyhow::Result;
use launch_scheme_core::{ArtifactLayout, SchemeHandlerBackend, detect};
use tracing::debug;

/// Resolve per-user directories and pick the backend for this platform.
pub fn open_backend() -> Result<Box<dyn SchemeHandlerBackend>> {
    let layout = ArtifactLayout::from_user_dirs()?;
    debug!("Artifacts under {}", layout.data_dir().display());
    let backend = detect(layout)?;
    debug!("Using {} backend", backend.name());
    Ok(backend)
}
