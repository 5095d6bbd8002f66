//! Shared data models: configuration record, rule tuples, presets and lint output.

pub mod configuration;
pub mod presets;
pub mod rules;

use rules::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A single rule violation.
pub struct Issue {
    pub rule: String,
    pub level: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub messages: usize,
}

impl Summary {
    /// Fold per-message summaries into one.
    pub fn total<'a>(results: impl IntoIterator<Item = &'a LintResult>) -> Summary {
        results
            .into_iter()
            .fold(Summary::default(), |acc, r| Summary {
                errors: acc.errors + r.summary.errors,
                warnings: acc.warnings + r.summary.warnings,
                messages: acc.messages + r.summary.messages,
            })
    }
}

#[derive(Debug, Clone, Serialize)]
/// Lint result for one commit message.
pub struct LintResult {
    /// The header line, shown as the input in reports.
    pub input: String,
    /// No error-level issue was found.
    pub valid: bool,
    /// The message matched an ignore pattern and was not checked.
    pub ignored: bool,
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
