//! # launch-scheme-core
//!
//! Registers a custom URL scheme with the desktop so that clicking a link
//! such as `shizou://example.com/video.mkv` opens the URL in mpv or vlc.
//!
//! This crate provides:
//! - Player validation against `PATH`/`PATHEXT`
//! - Launcher script generation (VBScript on Windows, bash on Linux)
//! - Platform backends that install and remove the OS-level registration

pub mod backend;
pub mod config;
pub mod error;
pub mod player;
pub mod scheme;
pub mod script;
pub mod validate;

pub use backend::{
    ArtifactKind, ArtifactState, InstallRequest, InstallStatus, SchemeHandlerBackend, detect,
};
pub use config::ArtifactLayout;
pub use error::{Error, Result};
pub use player::{LaunchTemplate, Player};
pub use scheme::Scheme;
pub use validate::{SearchEnv, ValidatedPlayer, validate_player};
