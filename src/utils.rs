//! Small helpers shared by the binary and printers.

use owo_colors::OwoColorize;

/// Colors are enabled for human output unless `NO_COLOR` is set.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(label)
    } else {
        label.to_string()
    }
}

/// Prefix for fatal messages printed to stderr.
pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

/// Prefix for friendly notes (missing optional config and similar).
pub fn note_prefix() -> String {
    prefix("note:", |s| s.yellow().bold().to_string())
}

/// Prefix for informational lines.
pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}
