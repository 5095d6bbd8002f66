//! Lint runner: applies a configuration to commit messages.
//!
//! Produces a `LintResult` per message. Disabled rules are skipped, ignored
//! messages are reported as valid, and issues are ordered by severity
//! (errors first) then rule name.

use crate::checks::run_check;
use crate::error::ConfigError;
use crate::message::{parse, strip_comments};
use crate::models::configuration::LintConfiguration;
use crate::models::rules::{RuleName, RuleSpec, Severity};
use crate::models::{Issue, LintResult, Summary};
use rayon::prelude::*;
use regex::Regex;
use std::sync::OnceLock;

/// Messages git or hosting tools generate, skipped unless `defaultIgnores = false`.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"(?m)^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?)))(?:\r?\n)*$)",
    r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
    r"^(R|r)evert (.*)",
    r"^(R|r)eapply (.*)",
    r"^(amend|fixup|squash)!",
    r"^(Merged (.*?)(in|into) (.*?))",
    r"^Merge remote-tracking branch(\s*)(.*)",
    r"^Automatic merge(.*)",
    r"^Auto-merged (.*?) into (.*)",
];

fn default_ignores() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("valid default ignore pattern"))
            .collect()
    })
}

/// A configuration prepared for evaluation: enabled rules resolved and
/// ignore patterns compiled.
pub struct Linter<'a> {
    config: &'a LintConfiguration,
    rules: Vec<(RuleName, &'a RuleSpec)>,
    ignores: Vec<Regex>,
}

impl<'a> Linter<'a> {
    pub fn new(config: &'a LintConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = config
            .rules()
            .iter()
            .filter(|(_, spec)| spec.is_enabled())
            .filter_map(|(name, spec)| name.parse::<RuleName>().ok().map(|r| (r, spec)))
            .collect();
        let ignores = config
            .ignores()
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidIgnore {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            rules,
            ignores,
        })
    }

    /// True when the message matches a configured or default ignore pattern.
    pub fn is_ignored(&self, message: &str) -> bool {
        let cleaned = strip_comments(message);
        if self.ignores.iter().any(|re| re.is_match(&cleaned)) {
            return true;
        }
        self.config.default_ignores() && default_ignores().iter().any(|re| re.is_match(&cleaned))
    }

    /// Lint one commit message.
    pub fn lint(&self, message: &str) -> LintResult {
        let commit = parse(message);
        if self.is_ignored(message) {
            tracing::debug!(header = %commit.header, "message ignored");
            return LintResult {
                input: commit.header,
                valid: true,
                ignored: true,
                issues: Vec::new(),
                summary: Summary {
                    messages: 1,
                    ..Summary::default()
                },
            };
        }

        let mut issues: Vec<Issue> = Vec::new();
        for (rule, spec) in &self.rules {
            let (valid, message) = run_check(*rule, &commit, spec.when, spec.value.as_ref());
            tracing::trace!(rule = %rule, valid, "rule evaluated");
            if !valid {
                issues.push(Issue {
                    rule: rule.as_str().to_string(),
                    level: spec.level,
                    message,
                });
            }
        }
        // Rules arrive name-sorted; a stable sort keeps that within each level.
        issues.sort_by(|a, b| b.level.cmp(&a.level));

        let errors = issues.iter().filter(|i| i.level == Severity::Error).count();
        let warnings = issues
            .iter()
            .filter(|i| i.level == Severity::Warning)
            .count();
        LintResult {
            input: commit.header,
            valid: errors == 0,
            ignored: false,
            issues,
            summary: Summary {
                errors,
                warnings,
                messages: 1,
            },
        }
    }

    /// Lint several messages in parallel, keeping input order.
    pub fn lint_all(&self, messages: &[String]) -> Vec<LintResult> {
        messages.par_iter().map(|m| self.lint(m)).collect()
    }
}

/// Process exit code for a finished run: `1` when any message has errors, or
/// warnings under `strict`, otherwise `0`.
///
/// Configuration and input failures exit with `2` before linting starts.
pub fn exit_code(results: &[LintResult], strict: bool) -> i32 {
    let failed = results
        .iter()
        .any(|r| !r.valid || (strict && r.summary.warnings > 0));
    if failed {
        1
    } else {
        0
    }
}

/// Validate `config` and lint a single message with it.
pub fn lint_message(config: &LintConfiguration, message: &str) -> Result<LintResult, ConfigError> {
    Ok(Linter::new(config)?.lint(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::DEFAULT_HEADER_LIMIT;

    fn limited() -> LintConfiguration {
        LintConfiguration::conventional_lower_case().with_header_limit(DEFAULT_HEADER_LIMIT)
    }

    fn header_of_len(len: usize) -> String {
        let prefix = "feat: ";
        format!("{}{}", prefix, "a".repeat(len - prefix.len()))
    }

    #[test]
    fn test_header_of_exactly_80_chars_passes() {
        let header = header_of_len(80);
        assert_eq!(header.chars().count(), 80);
        let res = lint_message(&limited(), &header).unwrap();
        assert!(res.valid);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_header_of_81_chars_is_a_warning_only() {
        let res = lint_message(&limited(), &header_of_len(81)).unwrap();
        assert!(res.valid);
        assert_eq!(res.issues.len(), 1);
        assert_eq!(res.issues[0].rule, "header-max-length");
        assert_eq!(res.issues[0].level, Severity::Warning);
        assert_eq!(res.summary.warnings, 1);
        assert_eq!(res.summary.errors, 0);
    }

    #[test]
    fn test_upper_case_type_is_an_error() {
        let res = lint_message(
            &LintConfiguration::conventional_lower_case(),
            "Feat: add parser",
        )
        .unwrap();
        assert!(!res.valid);
        let type_case = res
            .issues
            .iter()
            .find(|i| i.rule == "type-case")
            .expect("type-case issue");
        assert_eq!(type_case.level, Severity::Error);
        assert_eq!(type_case.message, "type must be lower-case");
    }

    #[test]
    fn test_no_header_bound_without_header_max_length() {
        let res = lint_message(
            &LintConfiguration::conventional_lower_case(),
            &header_of_len(300),
        )
        .unwrap();
        assert!(res.valid);
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_long_body_lines_are_allowed() {
        let msg = format!("docs: explain\n\n{}", "word ".repeat(100));
        let res = lint_message(&limited(), &msg).unwrap();
        assert!(res.issues.is_empty());
    }

    #[test]
    fn test_errors_sort_before_warnings() {
        let long_upper = format!("Feat: {}", "a".repeat(90));
        let res = lint_message(&limited(), &long_upper).unwrap();
        let rules: Vec<&str> = res.issues.iter().map(|i| i.rule.as_str()).collect();
        assert_eq!(rules, ["header-case", "type-case", "header-max-length"]);
    }

    #[test]
    fn test_default_and_custom_ignores() {
        let cfg = LintConfiguration::conventional_lower_case();
        let linter = Linter::new(&cfg).unwrap();
        let merged = linter.lint("Merge branch 'Main' into Feature");
        assert!(merged.ignored && merged.valid);
        assert!(linter.lint("Revert \"Feat: x\"").ignored);

        let custom: LintConfiguration =
            toml::from_str("ignores = [\"^WIP\"]\ndefaultIgnores = false\n").unwrap();
        let linter = Linter::new(&custom).unwrap();
        assert!(linter.lint("WIP everything").ignored);
        assert!(!linter.lint("Merge branch 'x'").ignored);
    }

    #[test]
    fn test_exit_code_follows_strictness() {
        let clean = lint_message(&limited(), "fix: ok").unwrap();
        let warned = lint_message(&limited(), &header_of_len(81)).unwrap();
        let failed = lint_message(&limited(), "Feat: add parser").unwrap();

        assert_eq!(exit_code(&[clean.clone()], false), 0);
        assert_eq!(exit_code(&[clean.clone()], true), 0);
        assert_eq!(exit_code(&[warned.clone()], false), 0);
        assert_eq!(exit_code(&[warned.clone()], true), 1);
        assert_eq!(exit_code(&[clean, failed.clone()], false), 1);
        assert_eq!(exit_code(&[failed], true), 1);
        assert_eq!(exit_code(&[warned], true), 1);
    }

    #[test]
    fn test_lint_all_keeps_order() {
        let cfg = LintConfiguration::conventional_lower_case();
        let linter = Linter::new(&cfg).unwrap();
        let msgs = vec!["fix: a".to_string(), "Fix: b".to_string(), "chore: c".to_string()];
        let results = linter.lint_all(&msgs);
        let valid: Vec<bool> = results.iter().map(|r| r.valid).collect();
        assert_eq!(valid, [true, false, true]);
        let total = Summary::total(&results);
        assert_eq!(total.messages, 3);
        assert_eq!(total.errors, 2);
    }
}
