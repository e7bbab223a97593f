//! XDG desktop entry registering a launcher script for `x-scheme-handler/<scheme>`.

use std::path::Path;

use crate::scheme::Scheme;

pub fn mime_type(scheme: &Scheme) -> String {
    format!("x-scheme-handler/{}", scheme.as_str())
}

pub fn render(scheme: &Scheme, script_path: &Path) -> String {
    let script = script_path.to_string_lossy();
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={} External Player\n\
         TryExec={}\n\
         Exec={} %u\n\
         Terminal=false\n\
         StartupNotify=false\n\
         MimeType={};\n",
        scheme.title_case(),
        escape_string(&script),
        quote_exec_arg(&script),
        mime_type(scheme),
    )
}

/// Escape a desktop entry string value (`\` becomes `\\`).
fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\")
}

/// Quote an `Exec` argument per the desktop entry spec when it contains reserved characters.
fn quote_exec_arg(arg: &str) -> String {
    const RESERVED: &[char] = &[
        ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
        ')', '`',
    ];
    if !arg.contains(RESERVED) {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    // Every escape is applied twice: once for quoting, once for the string value.
    for c in arg.chars() {
        match c {
            '\\' => quoted.push_str("\\\\\\\\"),
            '"' | '`' | '$' => {
                quoted.push_str("\\\\");
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
