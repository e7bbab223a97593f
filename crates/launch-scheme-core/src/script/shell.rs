//! Bash launcher used by the Linux backend.

use super::padded_arguments;
use crate::player::Player;
use crate::scheme::Scheme;

/// Backslash-escape spaces so a path survives word splitting.
pub fn escape_spaces(path: &str) -> String {
    path.replace(' ', "\\ ")
}

/// Render the launcher.
///
/// `$1` is the full URL handed over by the desktop; the first `len(scheme) + 1`
/// characters (`<scheme>:`) are dropped and the remainder percent-decoded.
pub fn render(scheme: &Scheme, player: Player, command: &str, extra_args: Option<&str>) -> String {
    let template = player.template();
    let arguments = padded_arguments(&template, extra_args);

    let mut script = String::from("#!/bin/bash\n");
    script.push_str("function urldecode() { echo -e \"${1//%/\\\\x}\"; }\n");
    script.push_str(&format!(
        "url=\"$(urldecode \"${{1:{}}}\")\"\n",
        scheme.char_len() + 1
    ));
    script.push_str(&format!(
        "{}{}\"${{url}}\"\n",
        escape_spaces(command),
        arguments
    ));
    script
}
