//! Error types for configuration loading and message input.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, parsing or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML, YAML or JSON, or does not fit the schema.
    #[error("cannot parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// The extension does not map to a supported format.
    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// One or more rule names are not known to the evaluator.
    #[error("found invalid rule names: {}", .0.join(", "))]
    UnknownRules(Vec<String>),

    /// The rule value has the wrong shape for the rule.
    #[error("rule '{rule}' expects {expected}")]
    InvalidValue { rule: String, expected: &'static str },

    /// An enabled rule needs a value but none was given.
    #[error("rule '{rule}' is enabled but has no value")]
    MissingValue { rule: String },

    /// An `ignores` entry is not a valid regular expression.
    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnore { pattern: String, reason: String },

    /// The resolved configuration could not be serialized for printing.
    #[error("cannot render configuration as {format}: {reason}")]
    Render { format: &'static str, reason: String },
}

/// Errors raised while reading commit messages.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// `git` could not be spawned or exited unsuccessfully.
    #[error("git log failed: {0}")]
    Git(String),

    #[error("no commit message to lint")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_names_format_not_a_path() {
        let err = ConfigError::Render {
            format: "toml",
            reason: "unsupported value".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot render configuration as toml: unsupported value"
        );
    }
}
