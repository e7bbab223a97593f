//! Windows backend: VBScript launcher registered under `HKCU\SOFTWARE\Classes\<scheme>`.
//!
//! The registry layout is the standard URL protocol handler shape:
//!
//! ```text
//! HKCU\SOFTWARE\Classes\<scheme>
//!     (default)      = "URL:<Scheme> Protocol"
//!     URL Protocol   = ""
//!     DefaultIcon\(default)        = "\"<player>\",1"
//!     shell\open\command\(default) = "wscript.exe \"<launcher.vbs>\" \"%1\""
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::registry::RegistryStore;
use super::{
    ArtifactKind, ArtifactState, InstallRequest, InstallStatus, SchemeHandlerBackend,
    remove_if_exists,
};
use crate::config::{ArtifactLayout, ensure_parent_dir, registry as registry_config};
use crate::error::Result;
use crate::scheme::Scheme;
use crate::script::vbscript;

pub struct WindowsBackend<R: RegistryStore> {
    layout: ArtifactLayout,
    registry: R,
}

impl<R: RegistryStore> WindowsBackend<R> {
    pub fn new(layout: ArtifactLayout, registry: R) -> Self {
        Self { layout, registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Registry key for the scheme, relative to `HKEY_CURRENT_USER`.
    pub fn scheme_key(scheme: &Scheme) -> String {
        format!(r"{}\{}", registry_config::CLASSES_ROOT, scheme.as_str())
    }

    fn write_registration(&self, request: &InstallRequest, script_path: &Path) -> Result<()> {
        let key = Self::scheme_key(&request.scheme);
        let icon_key = format!(r"{}\{}", key, registry_config::DEFAULT_ICON_KEY);
        let command_key = format!(r"{}\{}", key, registry_config::OPEN_COMMAND_KEY);

        self.registry.set_string(
            &key,
            "",
            &format!("URL:{} Protocol", request.scheme.title_case()),
        )?;
        self.registry
            .set_string(&key, registry_config::URL_PROTOCOL_VALUE, "")?;
        self.registry.set_string(
            &icon_key,
            "",
            &format!("\"{}\",1", request.player.command),
        )?;
        self.registry
            .set_string(&command_key, "", &open_command(script_path))?;
        Ok(())
    }

    /// Undo a failed install. Errors here are logged, not returned.
    fn rollback(&self, scheme: &Scheme, script_path: &Path) {
        if let Err(e) = self.registry.delete_tree(&Self::scheme_key(scheme)) {
            warn!("Rollback: failed to delete registry key: {}", e);
        }
        if let Err(e) = remove_if_exists(script_path) {
            warn!(
                "Rollback: failed to remove {}: {}",
                script_path.display(),
                e
            );
        }
    }
}

/// `shell\open\command` value that runs the launcher with the clicked URL.
pub fn open_command(script_path: &Path) -> String {
    format!("wscript.exe \"{}\" \"%1\"", script_path.display())
}

impl<R: RegistryStore> SchemeHandlerBackend for WindowsBackend<R> {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn install(&self, request: &InstallRequest) -> Result<()> {
        let scheme = &request.scheme;
        let script_path = self.layout.vbscript_path(scheme);
        ensure_parent_dir(&script_path)?;

        let script = vbscript::render(
            scheme,
            request.player.player,
            &request.player.command,
            request.extra_args.as_deref(),
        );
        fs::write(&script_path, script)?;
        debug!("Wrote launcher {}", script_path.display());

        // Register only once the launcher is on disk.
        if let Err(e) = self.write_registration(request, &script_path) {
            self.rollback(scheme, &script_path);
            return Err(e);
        }

        info!(
            "Registered {}: with {} via {}",
            scheme,
            request.player.player,
            script_path.display()
        );
        Ok(())
    }

    fn uninstall(&self, scheme: &Scheme) -> Result<()> {
        let key = Self::scheme_key(scheme);
        if !self.registry.delete_tree(&key)? {
            debug!(r"HKCU\{} not present", key);
        }

        let script_path = self.layout.vbscript_path(scheme);
        if !remove_if_exists(&script_path)? {
            debug!("{} not present", script_path.display());
        }

        info!("Unregistered {}:", scheme);
        Ok(())
    }

    fn status(&self, scheme: &Scheme) -> Result<InstallStatus> {
        let key = Self::scheme_key(scheme);
        let command_key = format!(r"{}\{}", key, registry_config::OPEN_COMMAND_KEY);
        let script_path = self.layout.vbscript_path(scheme);

        // Another program may have taken over the scheme since install.
        let command = self.registry.get_string(&command_key, "")?;
        let points_at_launcher = command.as_deref() == Some(open_command(&script_path).as_str());
        if command.is_some() && !points_at_launcher {
            debug!(r"HKCU\{} points elsewhere: {:?}", command_key, command);
        }

        let artifacts = vec![
            ArtifactState {
                kind: ArtifactKind::RegistryKey,
                location: format!(r"HKCU\{key}"),
                present: self.registry.key_exists(&key)?,
            },
            ArtifactState {
                kind: ArtifactKind::OpenCommand,
                location: format!(r"HKCU\{command_key}"),
                present: points_at_launcher,
            },
            ArtifactState {
                kind: ArtifactKind::LauncherScript,
                location: script_path.display().to_string(),
                present: script_path.is_file(),
            },
        ];
        Ok(InstallStatus::new(scheme, self.name(), artifacts))
    }
}
