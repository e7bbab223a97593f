//! Player argument validation.
//!
//! Checks that a player token names a supported player and points at an
//! existing file, either by absolute path or through the search path. The
//! check is advisory: it proves the file exists, not that it is executable.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::player::Player;

/// Search-path environment consulted during validation.
#[derive(Debug, Clone, Default)]
pub struct SearchEnv {
    /// Value of `PATH`.
    pub path: Option<OsString>,
    /// Value of `PATHEXT` (Windows executable suffixes).
    pub pathext: Option<OsString>,
}

impl SearchEnv {
    pub fn from_process() -> Self {
        Self {
            path: std::env::var_os("PATH"),
            pathext: std::env::var_os("PATHEXT"),
        }
    }

    /// Executable suffixes to try, always starting with the empty suffix.
    pub fn suffixes(&self) -> Vec<OsString> {
        let mut suffixes = vec![OsString::new()];
        if let Some(pathext) = &self.pathext {
            suffixes.extend(
                std::env::split_paths(pathext)
                    .map(PathBuf::into_os_string)
                    .filter(|s| !s.is_empty()),
            );
        }
        suffixes
    }

    pub fn search_dirs(&self) -> Vec<PathBuf> {
        self.path
            .as_deref()
            .map(|p| std::env::split_paths(p).collect())
            .unwrap_or_default()
    }
}

/// A player token that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPlayer {
    pub player: Player,
    /// The token as the user gave it; this is what the launchers invoke.
    pub command: String,
    /// The file that satisfied the existence check.
    pub resolved: PathBuf,
}

pub fn validate_player(token: &str, env: &SearchEnv) -> Result<ValidatedPlayer> {
    if token.trim().is_empty() {
        return Err(Error::EmptyPlayer);
    }

    let player = Player::detect(token).ok_or_else(|| Error::UnsupportedPlayer {
        supported: Player::supported_names(),
    })?;

    let suffixes = env.suffixes();
    let resolved = if Path::new(token).is_absolute() {
        find_with_suffixes(Path::new(token), &suffixes)
            .ok_or_else(|| Error::PlayerNotFoundAt(token.to_string()))?
    } else if is_valid_file_name(token) {
        env.search_dirs()
            .iter()
            .find_map(|dir| find_with_suffixes(&dir.join(token), &suffixes))
            .ok_or(Error::PlayerNotFoundInPath)?
    } else {
        return Err(Error::InvalidPlayerPath);
    };

    debug!("Resolved {} to {}", token, resolved.display());
    Ok(ValidatedPlayer {
        player,
        command: token.to_string(),
        resolved,
    })
}

fn find_with_suffixes(base: &Path, suffixes: &[OsString]) -> Option<PathBuf> {
    suffixes
        .iter()
        .map(|suffix| with_suffix(base, suffix))
        .find(|candidate| candidate.is_file())
}

// Plain concatenation: `mpv` + `.EXE`, not an extension replacement.
fn with_suffix(base: &Path, suffix: &OsStr) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

fn is_valid_file_name(name: &str) -> bool {
    !name.chars().any(is_invalid_file_name_char)
}

#[cfg(windows)]
fn is_invalid_file_name_char(c: char) -> bool {
    matches!(c, '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/') || (c as u32) < 0x20
}

#[cfg(not(windows))]
fn is_invalid_file_name_char(c: char) -> bool {
    matches!(c, '/' | '\0')
}
