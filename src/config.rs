//! Configuration discovery, loading and effective settings resolution.
//!
//! The linter reads its configuration from the repository root (or closest
//! ancestor). Candidates, in order of authority:
//! - `commitlint.toml`
//! - `.commitlintrc.toml`
//! - `.commitlintrc.yaml` / `.commitlintrc.yml`
//! - `.commitlintrc.json`
//!
//! When several candidates sit in the same directory the first one wins and
//! the rest are reported as shadowed. When none exists the built-in
//! configuration is used.
//!
//! Settings precedence: CLI > `COMMITLINT_OUTPUT` > defaults.

use crate::error::ConfigError;
use crate::models::configuration::LintConfiguration;
use crate::models::presets;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration file names, most authoritative first.
pub const CONFIG_CANDIDATES: &[&str] = &[
    "commitlint.toml",
    ".commitlintrc.toml",
    ".commitlintrc.yaml",
    ".commitlintrc.yml",
    ".commitlintrc.json",
];

/// Environment variable consulted for the output mode.
pub const OUTPUT_ENV: &str = "COMMITLINT_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Serialization format of a configuration file.
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// A loaded configuration and where it came from.
pub struct Loaded {
    pub config: LintConfiguration,
    /// `None` when the built-in configuration is in use.
    pub source: Option<PathBuf>,
    /// Other candidates found next to `source` and ignored.
    pub shadowed: Vec<PathBuf>,
    /// `extends` entries that are not known commitlint presets.
    pub unknown_presets: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub strict: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a configuration candidate or a `.git` entry is found. A relative
/// `start` is taken from the current directory.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => detect_repo_root_from(start, &cwd),
        Err(e) => {
            tracing::warn!(error = %e, "cannot read current directory");
            detect_repo_root_from(start, Path::new("/"))
        }
    }
}

/// `detect_repo_root` with relative paths resolved against `base`.
pub fn detect_repo_root_from(start: &Path, base: &Path) -> PathBuf {
    let joined = base.join(start);
    // `parent()` of a relative path like "." stops at "", so walk an absolute one.
    let start = fs::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined));
    let mut cur = start.as_path();
    loop {
        if CONFIG_CANDIDATES.iter().any(|c| cur.join(c).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.clone(),
        }
    }
}

/// Lexically drop `.` and resolve `..` for paths that do not exist.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Existing candidates in `root`, most authoritative first.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|c| root.join(c))
        .filter(|p| p.is_file())
        .collect()
}

/// Parse and validate configuration text.
pub fn parse_str(text: &str, format: Format, path: &Path) -> Result<LintConfiguration, ConfigError> {
    let parse_err = |reason: String| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let config: LintConfiguration = match format {
        Format::Toml => toml::from_str(text).map_err(|e| parse_err(e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| parse_err(e.to_string()))?,
        Format::Json => serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?,
    };
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a configuration file.
pub fn load(path: &Path) -> Result<LintConfiguration, ConfigError> {
    let format =
        Format::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text, format, path)
}

/// Load the configuration for `root`, or the file at `explicit` when given.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Loaded, ConfigError> {
    let (config, source, shadowed) = match explicit {
        Some(path) => (load(path)?, Some(path.to_path_buf()), Vec::new()),
        None => {
            let mut found = discover(root).into_iter();
            match found.next() {
                Some(primary) => {
                    tracing::debug!(path = %primary.display(), "configuration discovered");
                    (load(&primary)?, Some(primary), found.collect())
                }
                None => (LintConfiguration::default(), None, Vec::new()),
            }
        }
    };
    let unknown_presets = config
        .extends()
        .iter()
        .filter(|id| !presets::is_known(id))
        .cloned()
        .collect();
    Ok(Loaded {
        config,
        source,
        shadowed,
        unknown_presets,
    })
}

/// Resolve `Effective` by merging CLI flags, the environment and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_strict: bool,
) -> Effective {
    resolve_with_env(
        cli_repo_root,
        cli_config,
        cli_output,
        cli_strict,
        std::env::var(OUTPUT_ENV).ok(),
    )
}

fn resolve_with_env(
    cli_repo_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_strict: bool,
    env_output: Option<String>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let output = cli_output
        .map(|s| s.to_string())
        .or(env_output.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "human".to_string());
    Effective {
        repo_root,
        config_path: cli_config.map(PathBuf::from),
        output,
        strict: cli_strict,
    }
}
