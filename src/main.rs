//! commitlint CLI binary entry point.
//! Resolves configuration, reads messages, delegates to the linter and prints results.

use clap::Parser;
use commitlint::cli::{Cli, Commands};
use commitlint::config::{self, Effective, Loaded};
use commitlint::input::{self, Source};
use commitlint::lint::{self, Linter};
use commitlint::output;
use commitlint::utils::{display_path, error_prefix, note_prefix, warn_prefix};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // COMMITLINT_LOG sets the filter; COMMITLINT_LOG_FORMAT=json switches to JSON lines.
    let filter = tracing_subscriber::EnvFilter::try_from_env("COMMITLINT_LOG")
        .unwrap_or_else(|_| "warn".into());
    let json = std::env::var("COMMITLINT_LOG_FORMAT").is_ok_and(|f| f == "json");
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            repo_root,
            config,
            output,
            edit,
            message,
            from,
            to,
            strict,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
                strict,
            );
            let loaded = load_or_exit(&eff);
            let linter = match Linter::new(&loaded.config) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            let source = match (edit, message, from) {
                (Some(path), _, _) => Source::Edit(path.into()),
                (None, Some(text), _) => Source::Text(text),
                (None, None, Some(from)) => Source::Range {
                    from,
                    to: to.unwrap_or_else(|| "HEAD".to_string()),
                },
                (None, None, None) => Source::Stdin,
            };
            let messages = match input::read_messages(&source, &eff.repo_root) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            tracing::info!(count = messages.len(), "linting commit messages");
            let results = linter.lint_all(&messages);
            output::print_lint(&results, &eff.output, loaded.config.help_url());
            let code = lint::exit_code(&results, eff.strict);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::PrintConfig {
            repo_root,
            config,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
                false,
            );
            let loaded = load_or_exit(&eff);
            match output::render_config(&loaded.config, &eff.output) {
                Ok(text) => print!("{}", ensure_newline(text)),
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            }
        }
    }
}

/// Load the configuration, printing notes about its origin; exits with 2 on failure.
fn load_or_exit(eff: &Effective) -> Loaded {
    let loaded = match config::load_config(&eff.repo_root, eff.config_path.as_deref()) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    };
    let quiet = eff.output == "json";
    let cwd = std::env::current_dir().unwrap_or_else(|_| eff.repo_root.clone());
    match loaded.source.as_deref() {
        Some(path) => tracing::debug!(path = %path.display(), "using configuration"),
        None if !quiet => eprintln!(
            "{} No commitlint configuration found; using built-in defaults.",
            note_prefix()
        ),
        None => {}
    }
    if !loaded.shadowed.is_empty() {
        let primary = loaded
            .source
            .as_deref()
            .map(|p| display_path(p, &cwd))
            .unwrap_or_default();
        let others: Vec<String> = loaded
            .shadowed
            .iter()
            .map(|p| display_path(p, &cwd))
            .collect();
        eprintln!(
            "{} multiple configuration files found; using {} and ignoring {}",
            warn_prefix(),
            primary,
            others.join(", ")
        );
    }
    for preset in &loaded.unknown_presets {
        tracing::debug!(preset = %preset, "unknown preset in extends");
        if !quiet {
            eprintln!(
                "{} preset '{}' is not a known commitlint preset; its rules are not applied",
                note_prefix(),
                preset
            );
        }
    }
    loaded
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
