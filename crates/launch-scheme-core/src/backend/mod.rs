//! Platform backends that register a scheme with the host OS.
//!
//! One backend is chosen per run by [`detect`]:
//! - `WindowsBackend` - VBScript launcher plus `HKCU\SOFTWARE\Classes` keys
//! - `LinuxBackend` - shell launcher plus an XDG desktop entry

pub mod helper;
#[cfg(unix)]
pub mod linux;
pub mod registry;
pub mod windows;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::config::ArtifactLayout;
use crate::error::Result;
use crate::scheme::Scheme;
use crate::validate::ValidatedPlayer;

pub use helper::{HelperOutcome, HelperRunner, SystemHelperRunner};
#[cfg(unix)]
pub use linux::LinuxBackend;
#[cfg(target_os = "windows")]
pub use registry::CurrentUserRegistry;
pub use registry::{MemoryRegistry, RegistryStore};
pub use self::windows::WindowsBackend;

/// Everything needed to install a handler for one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub scheme: Scheme,
    pub player: ValidatedPlayer,
    pub extra_args: Option<String>,
}

impl InstallRequest {
    pub fn new(scheme: Scheme, player: ValidatedPlayer, extra_args: Option<String>) -> Self {
        Self {
            scheme,
            player,
            extra_args,
        }
    }
}

/// Registers and deregisters scheme handlers on one platform.
pub trait SchemeHandlerBackend {
    /// Short platform name for messages.
    fn name(&self) -> &'static str;

    /// Write all artifacts for the scheme, replacing any previous install.
    fn install(&self, request: &InstallRequest) -> Result<()>;

    /// Remove every artifact `install` creates. Missing artifacts are not an error.
    fn uninstall(&self, scheme: &Scheme) -> Result<()>;

    /// Report which artifacts currently exist.
    fn status(&self, scheme: &Scheme) -> Result<InstallStatus>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    RegistryKey,
    OpenCommand,
    LauncherScript,
    DesktopEntry,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::RegistryKey => "registry key",
            ArtifactKind::OpenCommand => "open command",
            ArtifactKind::LauncherScript => "launcher script",
            ArtifactKind::DesktopEntry => "desktop entry",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactState {
    pub kind: ArtifactKind,
    pub location: String,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub scheme: String,
    pub backend: &'static str,
    pub installed: bool,
    pub artifacts: Vec<ArtifactState>,
}

impl InstallStatus {
    pub fn new(scheme: &Scheme, backend: &'static str, artifacts: Vec<ArtifactState>) -> Self {
        Self {
            scheme: scheme.to_string(),
            backend,
            installed: !artifacts.is_empty() && artifacts.iter().all(|a| a.present),
            artifacts,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Pick the backend for the host platform.
pub fn detect(layout: ArtifactLayout) -> Result<Box<dyn SchemeHandlerBackend>> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(WindowsBackend::new(layout, CurrentUserRegistry)))
    }
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(LinuxBackend::new(layout, SystemHelperRunner)))
    }
    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        let _ = layout;
        Err(crate::error::Error::UnsupportedPlatform(std::env::consts::OS))
    }
}

/// Delete a file, treating absence as success. Returns whether a file was removed.
pub(crate) fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
