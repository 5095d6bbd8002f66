//! Commit message sources: an edit file, literal text, stdin or a git range.

use crate::error::InputError;
use crate::message::strip_comments;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default message file written by `git commit`.
pub const DEFAULT_EDIT_FILE: &str = ".git/COMMIT_EDITMSG";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the messages to lint come from.
pub enum Source {
    /// Message file; relative paths resolve against the repository root.
    Edit(PathBuf),
    Text(String),
    /// Commits in `from..to` as reported by `git log`.
    Range { from: String, to: String },
    Stdin,
}

/// Collect the messages for `source`. Fails with `Empty` when nothing is left
/// to lint after comment stripping.
pub fn read_messages(source: &Source, repo_root: &Path) -> Result<Vec<String>, InputError> {
    let messages = match source {
        Source::Edit(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                repo_root.join(path)
            };
            let text = std::fs::read_to_string(&path)
                .map_err(|source| InputError::Io { path, source })?;
            vec![text]
        }
        Source::Text(text) => vec![text.clone()],
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(InputError::Stdin)?;
            vec![text]
        }
        Source::Range { from, to } => git_log_messages(repo_root, from, to)?,
    };
    let messages: Vec<String> = messages
        .into_iter()
        .filter(|m| !strip_comments(m).trim().is_empty())
        .collect();
    if messages.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(messages)
}

/// Read full commit messages for `from..to`, newest first.
fn git_log_messages(repo_root: &Path, from: &str, to: &str) -> Result<Vec<String>, InputError> {
    let range = format!("{}..{}", from, to);
    tracing::debug!(range = %range, "reading commits from git");
    let output = Command::new("git")
        .args(["log", "--format=%B%x00", &range])
        .current_dir(repo_root)
        .output()
        .map_err(|e| InputError::Git(e.to_string()))?;
    if !output.status.success() {
        return Err(InputError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .split('\0')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect())
}
