use std::fs;
use std::path::{Path, PathBuf};

use super::paths;
use crate::error::{Error, Result};
use crate::scheme::Scheme;

/// Per-user locations of every file an install writes.
///
/// Everything hangs off one data directory: roaming AppData on Windows,
/// `$XDG_DATA_HOME` (or `~/.local/share`) on Linux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    data_dir: PathBuf,
}

impl ArtifactLayout {
    /// Resolve the layout from the current user's data directory.
    pub fn from_user_dirs() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or(Error::DirectoryUnavailable("user data"))?;
        Ok(Self { data_dir })
    }

    /// Build a layout rooted at an explicit directory.
    pub fn with_root(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Folder holding generated launcher scripts.
    pub fn launcher_dir(&self) -> PathBuf {
        self.data_dir.join(paths::APP_DIR_NAME)
    }

    /// Folder holding desktop entries (`~/.local/share/applications`).
    pub fn applications_dir(&self) -> PathBuf {
        self.data_dir.join(paths::APPLICATIONS_DIR_NAME)
    }

    pub fn vbscript_path(&self, scheme: &Scheme) -> PathBuf {
        self.launcher_dir().join(launcher_file_name(scheme, "vbs"))
    }

    pub fn shell_script_path(&self, scheme: &Scheme) -> PathBuf {
        self.launcher_dir().join(launcher_file_name(scheme, "sh"))
    }

    pub fn desktop_entry_path(&self, scheme: &Scheme) -> PathBuf {
        self.applications_dir()
            .join(format!("{}.desktop", scheme.as_str()))
    }
}

fn launcher_file_name(scheme: &Scheme, extension: &str) -> String {
    format!(
        "{}{}.{}",
        scheme.as_str(),
        paths::LAUNCHER_STEM_SUFFIX,
        extension
    )
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
