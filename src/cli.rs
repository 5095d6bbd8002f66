//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "commitlint",
    version,
    about = "Lint commit messages against a conventional-commit configuration",
    long_about = "commitlint — checks commit messages against rule overrides declared in commitlint.toml or .commitlintrc.{toml,yaml,yml,json}.\n\nSettings precedence: CLI > COMMITLINT_OUTPUT > defaults.",
    after_help = "Examples:\n  commitlint lint --edit\n  echo 'feat: add parser' | commitlint lint\n  commitlint lint --from origin/main --output json\n  commitlint print-config --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current commitlint version.")]
    Version,
    /// Lint commit messages
    #[command(
        about = "Lint commit messages",
        long_about = "Check one or more commit messages. Reads stdin unless --edit, --message or --from is given. Error-level issues fail the run; with --strict warnings do too.",
        after_help = "Examples:\n  commitlint lint --edit .git/COMMIT_EDITMSG\n  commitlint lint --message 'fix: handle empty input'\n  commitlint lint --from HEAD~5 --to HEAD --strict"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to a configuration file (skips discovery)")]
        config: Option<String>,
        #[arg(long, value_parser = ["human", "json"], help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(
            long,
            num_args = 0..=1,
            default_missing_value = crate::input::DEFAULT_EDIT_FILE,
            conflicts_with_all = ["message", "from"],
            help = "Read the message from a file (default: .git/COMMIT_EDITMSG)"
        )]
        edit: Option<String>,
        #[arg(short, long, conflicts_with = "from", help = "Lint the given message text")]
        message: Option<String>,
        #[arg(long, help = "Lower end of a git range (exclusive)")]
        from: Option<String>,
        #[arg(long, requires = "from", help = "Upper end of a git range (default: HEAD)")]
        to: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Fail on warnings as well as errors")]
        strict: bool,
    },
    /// Print the resolved configuration
    #[command(
        about = "Print resolved configuration",
        long_about = "Show the configuration the linter would use after discovery and validation.",
        after_help = "Examples:\n  commitlint print-config\n  commitlint print-config --config demos/commitlint.header-limit.toml --output json"
    )]
    PrintConfig {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Path to a configuration file (skips discovery)")]
        config: Option<String>,
        #[arg(long, value_parser = ["toml", "json"], help = "Output mode: toml|json (default: toml)")]
        output: Option<String>,
    },
}
