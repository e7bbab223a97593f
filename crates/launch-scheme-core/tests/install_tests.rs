//! Install / uninstall lifecycle tests for both backends.
//!
//! The Windows backend runs against an in-memory registry and the Linux
//! backend against a helper runner that records calls, so both run on any host.

use std::fs;
use std::path::{Path, PathBuf};

use launch_scheme_core::backend::{MemoryRegistry, RegistryStore, WindowsBackend};
use launch_scheme_core::{
    ArtifactLayout, InstallRequest, Player, Scheme, SchemeHandlerBackend, ValidatedPlayer,
};
use tempfile::TempDir;

fn request(scheme: &str, player: Player, command: &str, extra: Option<&str>) -> InstallRequest {
    InstallRequest::new(
        Scheme::parse(scheme).unwrap(),
        ValidatedPlayer {
            player,
            command: command.to_string(),
            resolved: PathBuf::from(command),
        },
        extra.map(str::to_string),
    )
}

/// Every file below `root`, relative to it.
fn files_under(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

mod windows_backend {
    use super::*;

    fn backend(temp: &TempDir) -> WindowsBackend<MemoryRegistry> {
        WindowsBackend::new(ArtifactLayout::with_root(temp.path()), MemoryRegistry::new())
    }

    #[test]
    fn test_install_example() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp);
        backend
            .install(&request("foo", Player::Mpv, r"C:\mpv\mpv.exe", None))
            .unwrap();

        let script_path = temp
            .path()
            .join("PlayerLaunchScheme")
            .join("foo-ext-player-start.vbs");
        let script = fs::read_to_string(&script_path).unwrap();
        assert!(script.contains(r#"InStr(1, WScript.Arguments(0), "foo:") <> 1"#));

        let command = backend
            .registry()
            .get_string(r"SOFTWARE\Classes\foo\shell\open\command", "")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            format!("wscript.exe \"{}\" \"%1\"", script_path.display())
        );
    }

    #[test]
    fn test_install_then_uninstall_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp);
        let req = request("foo", Player::Vlc, r"C:\vlc\vlc.exe", Some("--fullscreen"));

        backend.install(&req).unwrap();
        assert!(backend.status(&req.scheme).unwrap().installed);

        backend.uninstall(&req.scheme).unwrap();
        assert!(backend.registry().is_empty());
        assert!(files_under(temp.path()).is_empty());
        assert!(!backend.status(&req.scheme).unwrap().installed);
    }

    #[test]
    fn test_reinstall_overwrites() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp);

        backend
            .install(&request("foo", Player::Mpv, r"C:\mpv\mpv.exe", None))
            .unwrap();
        backend
            .install(&request("foo", Player::Vlc, r"C:\vlc\vlc.exe", None))
            .unwrap();

        let icon = backend
            .registry()
            .get_string(r"SOFTWARE\Classes\foo\DefaultIcon", "")
            .unwrap();
        assert_eq!(icon.as_deref(), Some(r#""C:\vlc\vlc.exe",1"#));

        let files = files_under(temp.path());
        assert_eq!(files.len(), 1);
        let script = fs::read_to_string(temp.path().join(&files[0])).unwrap();
        assert!(script.contains("vlc.exe"));
        assert!(!script.contains("mpv.exe"));
        assert!(script.ends_with(", 1, False\n"));
    }

    #[test]
    fn test_scheme_lowercased_everywhere() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp);
        backend
            .install(&request("MyTV", Player::Mpv, r"C:\mpv\mpv.exe", None))
            .unwrap();

        assert!(
            backend
                .registry()
                .get_string(r"SOFTWARE\Classes\mytv", "")
                .unwrap()
                .is_some_and(|v| v == "URL:Mytv Protocol")
        );
        assert_eq!(
            files_under(temp.path()),
            vec![PathBuf::from("PlayerLaunchScheme").join("mytv-ext-player-start.vbs")]
        );
    }

    #[test]
    fn test_uninstall_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let backend = backend(&temp);
        let req = request("foo", Player::Mpv, r"C:\mpv\mpv.exe", None);

        backend.install(&req).unwrap();
        backend.uninstall(&req.scheme).unwrap();
        backend.uninstall(&req.scheme).unwrap();
    }
}

#[cfg(unix)]
mod linux_backend {
    use super::*;
    use launch_scheme_core::backend::{HelperOutcome, HelperRunner, LinuxBackend};
    use std::ffi::OsString;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;

    struct OkRunner;

    impl HelperRunner for OkRunner {
        fn run(
            &self,
            _program: &str,
            _args: &[OsString],
            _timeout: Duration,
        ) -> std::io::Result<HelperOutcome> {
            Ok(HelperOutcome::Exited {
                success: true,
                code: Some(0),
            })
        }
    }

    /// A runner that behaves as if the desktop tools are not installed.
    struct MissingToolRunner;

    impl HelperRunner for MissingToolRunner {
        fn run(
            &self,
            _program: &str,
            _args: &[OsString],
            _timeout: Duration,
        ) -> std::io::Result<HelperOutcome> {
            Err(std::io::ErrorKind::NotFound.into())
        }
    }

    #[test]
    fn test_install_example() {
        let temp = TempDir::new().unwrap();
        let backend = LinuxBackend::new(ArtifactLayout::with_root(temp.path()), OkRunner);
        backend
            .install(&request("bar", Player::Vlc, "/usr/bin/vlc", Some("--fullscreen")))
            .unwrap();

        let script_path = temp
            .path()
            .join("PlayerLaunchScheme")
            .join("bar-ext-player-start.sh");
        let script = fs::read_to_string(&script_path).unwrap();
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("\"${1:4}\""));
        assert!(script.contains("/usr/bin/vlc --fullscreen \"${url}\"\n"));

        let entry_path = temp.path().join("applications").join("bar.desktop");
        let entry = fs::read_to_string(&entry_path).unwrap();
        assert!(entry.contains("MimeType=x-scheme-handler/bar;\n"));
        assert!(entry.contains("Name=Bar External Player\n"));
        assert!(entry.contains(&format!("Exec={} %u\n", script_path.display())));
        assert!(entry.contains("Terminal=false\n"));

        for path in [&script_path, &entry_path] {
            let mode = fs::metadata(path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "{} not executable", path.display());
        }
    }

    #[test]
    fn test_install_then_uninstall_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let backend = LinuxBackend::new(ArtifactLayout::with_root(temp.path()), OkRunner);
        let req = request("foo", Player::Mpv, "/usr/bin/mpv", None);

        backend.install(&req).unwrap();
        assert_eq!(files_under(temp.path()).len(), 2);

        backend.uninstall(&req.scheme).unwrap();
        assert!(files_under(temp.path()).is_empty());
        assert!(!backend.status(&req.scheme).unwrap().installed);
    }

    #[test]
    fn test_reinstall_overwrites() {
        let temp = TempDir::new().unwrap();
        let backend = LinuxBackend::new(ArtifactLayout::with_root(temp.path()), OkRunner);

        backend
            .install(&request("foo", Player::Mpv, "/usr/bin/mpv", None))
            .unwrap();
        backend
            .install(&request("foo", Player::Vlc, "/usr/bin/vlc", None))
            .unwrap();

        let script = fs::read_to_string(
            temp.path()
                .join("PlayerLaunchScheme")
                .join("foo-ext-player-start.sh"),
        )
        .unwrap();
        assert!(script.contains("/usr/bin/vlc \"${url}\""));
        assert!(!script.contains("mpv"));
        assert_eq!(files_under(temp.path()).len(), 2);
    }

    #[test]
    fn test_missing_desktop_tools_are_not_fatal() {
        let temp = TempDir::new().unwrap();
        let backend = LinuxBackend::new(ArtifactLayout::with_root(temp.path()), MissingToolRunner);
        let req = request("foo", Player::Mpv, "/usr/bin/mpv", None);

        backend.install(&req).unwrap();
        assert!(backend.status(&req.scheme).unwrap().installed);
        backend.uninstall(&req.scheme).unwrap();
    }

    #[test]
    fn test_uninstall_never_installed() {
        let temp = TempDir::new().unwrap();
        let backend = LinuxBackend::new(ArtifactLayout::with_root(temp.path()), OkRunner);
        backend.uninstall(&Scheme::parse("ghost").unwrap()).unwrap();
    }
}
