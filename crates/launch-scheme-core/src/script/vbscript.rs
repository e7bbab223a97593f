//! VBScript launcher used by the Windows backend.

use super::padded_arguments;
use crate::player::Player;
use crate::scheme::Scheme;

/// Strip one layer of surrounding double quotes.
pub fn unquote(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Double every `"` so the text can sit inside a VBScript string literal.
pub fn escape_literal(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// Prepare user-supplied extra arguments for embedding in the script.
pub fn escape_extra_args(extra_args: &str) -> String {
    escape_literal(unquote(extra_args))
}

/// Render the launcher.
///
/// The script rejects any argument not starting with `<scheme>:`, percent-decodes
/// the rest, and starts the player through `WScript.Shell` without waiting.
pub fn render(scheme: &Scheme, player: Player, command: &str, extra_args: Option<&str>) -> String {
    let template = player.template();
    let extra = extra_args.map(escape_extra_args);
    let arguments = padded_arguments(&template, extra.as_deref());
    let prefix = scheme.prefix();

    let mut script = String::new();
    script.push_str(&format!(
        "If InStr(1, WScript.Arguments(0), \"{prefix}\") <> 1 Then\n"
    ));
    script.push_str(&format!(
        "   MsgBox \"Error: protocol needs to be {prefix}, started with \" & WScript.Arguments(0)\n"
    ));
    script.push_str("   WScript.Quit 1\n");
    script.push_str("End If\n");
    script.push_str("Dim url, player_path\n");
    script.push_str(&format!(
        "url = chr(34) & Unescape(Mid(WScript.Arguments(0), {})) & chr(34)\n",
        scheme.char_len() + 2
    ));
    script.push_str(&format!(
        "player_path = chr(34) & \"{}\" & chr(34)\n",
        escape_literal(command)
    ));
    script.push_str(&format!(
        "CreateObject(\"Wscript.Shell\").Run player_path & \"{arguments}\" & url, {}, False\n",
        template.window_style
    ));
    script
}
