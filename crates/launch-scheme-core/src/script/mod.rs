//! Launcher script and desktop entry generation.
//!
//! Pure string templating; nothing here touches the filesystem.

pub mod desktop;
pub mod shell;
pub mod vbscript;

use crate::player::LaunchTemplate;

/// Argument text between the quoted executable and the URL, padded with one
/// space on each side.
pub(crate) fn padded_arguments(template: &LaunchTemplate, extra_args: Option<&str>) -> String {
    let words = template.argument_words(extra_args);
    if words.is_empty() {
        " ".to_string()
    } else {
        format!(" {} ", words.join(" "))
    }
}
