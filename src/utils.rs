//! Supporting helpers: stderr prefixes, color detection and path display.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are used unless the output is machine-readable or `NO_COLOR` is set.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if use_colors("human") {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Render `path` relative to `base` when possible.
pub fn display_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_relative_to_base() {
        let base = Path::new("/repo");
        assert_eq!(
            display_path(Path::new("/repo/commitlint.toml"), base),
            "commitlint.toml"
        );
        assert_eq!(display_path(Path::new("/repo"), base), "/repo");
    }

    #[test]
    fn test_json_output_never_colors() {
        assert!(!use_colors("json"));
    }
}
