//! Report installed artifacts for a scheme.

use anyhow::Result;
use launch_scheme_core::{InstallStatus, Scheme};

use crate::cli_utils::open_backend;

pub fn run(scheme: &Scheme, json: bool) -> Result<()> {
    let backend = open_backend()?;
    let status = backend.status(scheme)?;

    if json {
        println!("{}", status.to_json()?);
    } else {
        print!("{}", format_status(&status));
    }
    Ok(())
}

fn format_status(status: &InstallStatus) -> String {
    let state = if status.installed {
        "installed"
    } else if status.artifacts.iter().any(|a| a.present) {
        "partially installed"
    } else {
        "not installed"
    };

    let mut out = format!("{}: {} ({})\n", status.scheme, state, status.backend);
    for artifact in &status.artifacts {
        let mark = if artifact.present { "x" } else { " " };
        out.push_str(&format!(
            "  [{}] {:<16} {}\n",
            mark,
            artifact.kind.to_string(),
            artifact.location
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_scheme_core::{ArtifactKind, ArtifactState};

    fn status(present: [bool; 2]) -> InstallStatus {
        let scheme = Scheme::parse("foo").unwrap();
        InstallStatus::new(
            &scheme,
            "linux",
            vec![
                ArtifactState {
                    kind: ArtifactKind::DesktopEntry,
                    location: "/home/u/.local/share/applications/foo.desktop".into(),
                    present: present[0],
                },
                ArtifactState {
                    kind: ArtifactKind::LauncherScript,
                    location: "/home/u/.local/share/PlayerLaunchScheme/foo-ext-player-start.sh"
                        .into(),
                    present: present[1],
                },
            ],
        )
    }

    #[test]
    fn test_format_installed() {
        let text = format_status(&status([true, true]));
        assert!(text.starts_with("foo: installed (linux)\n"));
        assert!(text.contains("  [x] desktop entry    /home/u/.local/share/applications/foo.desktop\n"));
    }

    #[test]
    fn test_format_partial() {
        let text = format_status(&status([false, true]));
        assert!(text.starts_with("foo: partially installed (linux)\n"));
        assert!(text.contains("  [ ] desktop entry"));
    }

    #[test]
    fn test_format_not_installed() {
        let text = format_status(&status([false, false]));
        assert!(text.starts_with("foo: not installed (linux)\n"));
    }
}
