//! Configuration constants and per-user artifact locations.
//!
//! - `paths` - folder and file naming for generated launchers
//! - `helper` - bounds for external desktop-integration tools
//! - `registry` - registry roots used by the Windows backend
//! - `ArtifactLayout` - resolves where artifacts for a scheme live

mod layout;

pub use layout::*;

/// File and folder naming for generated artifacts.
pub mod paths {
    /// Product folder under the per-user data directory.
    pub const APP_DIR_NAME: &str = "PlayerLaunchScheme";

    /// Appended to the scheme name to form launcher script file stems.
    pub const LAUNCHER_STEM_SUFFIX: &str = "-ext-player-start";

    /// Desktop entries directory under the per-user data directory.
    pub const APPLICATIONS_DIR_NAME: &str = "applications";
}

/// External helper process configuration.
pub mod helper {
    use std::time::Duration;

    /// Maximum time to wait for `desktop-file-install` / `update-desktop-database`.
    pub const TIMEOUT: Duration = Duration::from_secs(2);

    /// Interval between exit checks while waiting on a helper.
    pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

    pub const DESKTOP_FILE_INSTALL: &str = "desktop-file-install";
    pub const UPDATE_DESKTOP_DATABASE: &str = "update-desktop-database";
}

/// Registry locations (relative to `HKEY_CURRENT_USER`).
pub mod registry {
    pub const CLASSES_ROOT: &str = r"SOFTWARE\Classes";
    pub const URL_PROTOCOL_VALUE: &str = "URL Protocol";
    pub const DEFAULT_ICON_KEY: &str = "DefaultIcon";
    pub const OPEN_COMMAND_KEY: &str = r"shell\open\command";
}
