//! Linux backend: shell launcher plus an XDG desktop entry for `x-scheme-handler/<scheme>`.

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::{debug, info, warn};

use super::helper::{HelperRunner, run_non_fatal};
use super::{
    ArtifactKind, ArtifactState, InstallRequest, InstallStatus, SchemeHandlerBackend,
    remove_if_exists,
};
use crate::config::{ArtifactLayout, ensure_parent_dir, helper as helper_config};
use crate::error::Result;
use crate::scheme::Scheme;
use crate::script::{desktop, shell};

pub struct LinuxBackend<H: HelperRunner> {
    layout: ArtifactLayout,
    helper: H,
}

impl<H: HelperRunner> LinuxBackend<H> {
    pub fn new(layout: ArtifactLayout, helper: H) -> Self {
        Self { layout, helper }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    fn write_desktop_entry(&self, scheme: &Scheme, script_path: &Path) -> Result<()> {
        let entry_path = self.layout.desktop_entry_path(scheme);
        ensure_parent_dir(&entry_path)?;
        fs::write(&entry_path, desktop::render(scheme, script_path))?;
        debug!("Wrote desktop entry {}", entry_path.display());
        Ok(())
    }
}

/// Add execute permission for owner, group and other, keeping existing bits.
pub fn add_execute_permissions(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

impl<H: HelperRunner> SchemeHandlerBackend for LinuxBackend<H> {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn install(&self, request: &InstallRequest) -> Result<()> {
        let scheme = &request.scheme;
        let script_path = self.layout.shell_script_path(scheme);
        ensure_parent_dir(&script_path)?;

        let script = shell::render(
            scheme,
            request.player.player,
            &request.player.command,
            request.extra_args.as_deref(),
        );
        fs::write(&script_path, script)?;
        add_execute_permissions(&script_path)?;
        debug!("Wrote launcher {}", script_path.display());

        // The desktop entry is what makes the handler visible, so it goes last.
        if let Err(e) = self.write_desktop_entry(scheme, &script_path) {
            if let Err(cleanup) = remove_if_exists(&script_path) {
                warn!(
                    "Rollback: failed to remove {}: {}",
                    script_path.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        let entry_path = self.layout.desktop_entry_path(scheme);
        let applications_dir = self.layout.applications_dir();
        let mut dir_arg = OsString::from("--dir=");
        dir_arg.push(applications_dir.as_os_str());
        run_non_fatal(
            &self.helper,
            helper_config::DESKTOP_FILE_INSTALL,
            &[
                dir_arg,
                OsString::from("--rebuild-mime-info-cache"),
                entry_path.clone().into_os_string(),
            ],
        );
        add_execute_permissions(&entry_path)?;

        info!(
            "Registered {} for {} with {}",
            entry_path.display(),
            desktop::mime_type(scheme),
            request.player.player
        );
        Ok(())
    }

    fn uninstall(&self, scheme: &Scheme) -> Result<()> {
        let entry_path = self.layout.desktop_entry_path(scheme);
        let script_path = self.layout.shell_script_path(scheme);

        for path in [&entry_path, &script_path] {
            if !remove_if_exists(path)? {
                debug!("{} not present", path.display());
            }
        }

        run_non_fatal(
            &self.helper,
            helper_config::UPDATE_DESKTOP_DATABASE,
            &[self.layout.applications_dir().into_os_string()],
        );

        info!("Unregistered {}", desktop::mime_type(scheme));
        Ok(())
    }

    fn status(&self, scheme: &Scheme) -> Result<InstallStatus> {
        let entry_path = self.layout.desktop_entry_path(scheme);
        let script_path = self.layout.shell_script_path(scheme);

        let artifacts = vec![
            ArtifactState {
                kind: ArtifactKind::DesktopEntry,
                location: entry_path.display().to_string(),
                present: entry_path.is_file(),
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
