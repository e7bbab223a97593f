//! Supported media players and how each one is launched.

use std::path::Path;

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// A media player this tool can hand URLs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    Mpv,
    Vlc,
}

/// Fixed launch parameters for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchTemplate {
    /// Flags placed before any user-supplied extra arguments.
    pub flags: &'static [&'static str],
    /// End-of-options marker placed between the extra arguments and the URL.
    pub separator: Option<&'static str>,
    /// `WScript.Shell.Run` window style (0 = hidden, 1 = normal).
    pub window_style: u8,
}

impl LaunchTemplate {
    /// Words that go between the executable and the URL, in order.
    pub fn argument_words<'a>(&self, extra_args: Option<&'a str>) -> Vec<&'a str> {
        let mut words: Vec<&'a str> = self.flags.to_vec();
        if let Some(extra) = extra_args.map(str::trim).filter(|e| !e.is_empty()) {
            words.push(extra);
        }
        if let Some(separator) = self.separator {
            words.push(separator);
        }
        words
    }
}

impl Player {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn template(&self) -> LaunchTemplate {
        match self {
            Player::Mpv => LaunchTemplate {
                flags: &["--no-terminal", "--no-ytdl"],
                separator: Some("--"),
                window_style: 0,
            },
            Player::Vlc => LaunchTemplate {
                flags: &[],
                separator: None,
                window_style: 1,
            },
        }
    }

    /// Match the file-name part of `command` against supported player names,
    /// ignoring case (`C:\Tools\MPV.exe` -> `Mpv`).
    pub fn detect(command: &str) -> Option<Self> {
        let file_name = Path::new(command).file_name()?.to_string_lossy().to_lowercase();
        Player::iter().find(|p| file_name.starts_with(p.name()))
    }

    /// Comma-separated list of supported player names.
    pub fn supported_names() -> String {
        Player::iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_prefix() {
        assert_eq!(Player::detect("mpv"), Some(Player::Mpv));
        assert_eq!(Player::detect("/usr/bin/vlc"), Some(Player::Vlc));
        assert_eq!(Player::detect("/opt/MPV.AppImage"), Some(Player::Mpv));
        assert_eq!(Player::detect("vlc-wrapper"), Some(Player::Vlc));
    }

    #[test]
    fn test_detect_uses_file_name_only() {
        assert_eq!(Player::detect("/opt/mpv/celluloid"), None);
        assert_eq!(Player::detect("totem"), None);
        assert_eq!(Player::detect("/"), None);
    }

    #[test]
    fn test_supported_names() {
        assert_eq!(Player::supported_names(), "mpv, vlc");
    }

    #[test]
    fn test_argument_words() {
        let mpv = Player::Mpv.template();
        assert_eq!(
            mpv.argument_words(Some("--fs")),
            vec!["--no-terminal", "--no-ytdl", "--fs", "--"]
        );
        assert_eq!(
            mpv.argument_words(None),
            vec!["--no-terminal", "--no-ytdl", "--"]
        );

        let vlc = Player::Vlc.template();
        assert_eq!(vlc.argument_words(Some("--fullscreen")), vec!["--fullscreen"]);
        assert!(vlc.argument_words(Some("  ")).is_empty());
    }

    #[test]
    fn test_window_styles() {
        assert_eq!(Player::Mpv.template().window_style, 0);
        assert_eq!(Player::Vlc.template().window_style, 1);
    }
}
