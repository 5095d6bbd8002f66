//! Implementation of the individual commit-message rules.
//!
//! Each check returns `(valid, message)`. The message is phrased for the
//! configured applicability and is only shown when the check fails.

use crate::case::{matches_any, TargetCase};
use crate::message::Commit;
use crate::models::rules::{Applicability, Limit, RuleName, RuleValue};

/// Evaluate one rule against a parsed commit.
///
/// A value of the wrong shape makes the rule pass; configurations are
/// validated before they reach this point.
pub fn run_check(
    rule: RuleName,
    commit: &Commit,
    when: Applicability,
    value: Option<&RuleValue>,
) -> (bool, String) {
    let limit = value.and_then(RuleValue::as_limit);
    let cases = value.and_then(RuleValue::as_cases);
    match rule {
        RuleName::HeaderMaxLength => max_length("header", Some(commit.header.as_str()), limit),
        RuleName::HeaderMinLength => min_length("header", Some(commit.header.as_str()), limit),
        RuleName::BodyMaxLineLength => max_line_length("body", commit.body.as_deref(), limit),
        RuleName::FooterMaxLineLength => {
            max_line_length("footer", commit.footer.as_deref(), limit)
        }
        RuleName::HeaderCase => case_rule("header", Some(commit.header.as_str()), when, cases, true),
        RuleName::TypeCase => case_rule("type", commit.kind.as_deref(), when, cases, false),
        RuleName::SubjectCase => {
            case_rule("subject", commit.subject.as_deref(), when, cases, true)
        }
        RuleName::ScopeCase => scope_case(commit.scope.as_deref(), when, cases),
        RuleName::HeaderFullStop => full_stop(
            "header",
            Some(commit.header.as_str()),
            when,
            value.and_then(RuleValue::as_text),
        ),
        RuleName::SubjectFullStop => full_stop(
            "subject",
            commit.subject.as_deref(),
            when,
            value.and_then(RuleValue::as_text),
        ),
        RuleName::TypeEnum => type_enum(
            commit.kind.as_deref(),
            when,
            value.and_then(RuleValue::as_list),
        ),
        RuleName::TypeEmpty => empty("type", commit.kind.as_deref(), when),
        RuleName::ScopeEmpty => empty("scope", commit.scope.as_deref(), when),
        RuleName::SubjectEmpty => empty("subject", commit.subject.as_deref(), when),
        RuleName::BodyEmpty => empty("body", commit.body.as_deref(), when),
        RuleName::BodyLeadingBlank => leading_blank(
            "body",
            commit.body.is_some(),
            commit.blank_after_header(),
            when,
        ),
        RuleName::FooterLeadingBlank => leading_blank(
            "footer",
            commit.footer.is_some(),
            commit.blank_before_footer(),
            when,
        ),
    }
}

fn must(when: Applicability) -> &'static str {
    match when {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    }
}

fn applies(when: Applicability, holds: bool) -> bool {
    match when {
        Applicability::Always => holds,
        Applicability::Never => !holds,
    }
}

fn max_length(field: &str, input: Option<&str>, limit: Option<Limit>) -> (bool, String) {
    let len = input.map(|s| s.chars().count()).unwrap_or(0);
    let limit = match limit {
        Some(l) => l,
        None => return (true, String::new()),
    };
    (
        len == 0 || limit.admits_max(len),
        format!(
            "{} must not be longer than {} characters, current length is {}",
            field, limit, len
        ),
    )
}

fn min_length(field: &str, input: Option<&str>, limit: Option<Limit>) -> (bool, String) {
    let len = input.map(|s| s.chars().count()).unwrap_or(0);
    let limit = match limit {
        Some(l) => l,
        None => return (true, String::new()),
    };
    (
        len == 0 || limit.admits_min(len),
        format!(
            "{} must not be shorter than {} characters, current length is {}",
            field, limit, len
        ),
    )
}

fn max_line_length(field: &str, input: Option<&str>, limit: Option<Limit>) -> (bool, String) {
    let (text, limit) = match (input, limit) {
        (Some(t), Some(l)) => (t, l),
        _ => return (true, String::new()),
    };
    let valid = text.lines().all(|line| limit.admits_max(line.chars().count()));
    (
        valid,
        format!("{}'s lines must not be longer than {} characters", field, limit),
    )
}

fn case_names(cases: &[TargetCase]) -> String {
    cases
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Case check; `letter_start` skips input that does not begin with a letter.
fn case_rule(
    field: &str,
    input: Option<&str>,
    when: Applicability,
    cases: Option<Vec<TargetCase>>,
    letter_start: bool,
) -> (bool, String) {
    let (text, cases) = match (input, cases) {
        (Some(t), Some(c)) if !t.is_empty() => (t, c),
        _ => return (true, String::new()),
    };
    if letter_start && !text.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return (true, String::new());
    }
    (
        applies(when, matches_any(text, &cases)),
        format!("{} {} be {}", field, must(when), case_names(&cases)),
    )
}

/// Scope case is checked per segment; scopes may list several names.
fn scope_case(
    input: Option<&str>,
    when: Applicability,
    cases: Option<Vec<TargetCase>>,
) -> (bool, String) {
    let (text, cases) = match (input, cases) {
        (Some(t), Some(c)) if !t.is_empty() => (t, c),
        _ => return (true, String::new()),
    };
    let holds = text
        .split(|c| c == '/' || c == '\\' || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .all(|segment| matches_any(segment, &cases));
    (
        applies(when, holds),
        format!("scope {} be {}", must(when), case_names(&cases)),
    )
}

fn full_stop(
    field: &str,
    input: Option<&str>,
    when: Applicability,
    stop: Option<&str>,
) -> (bool, String) {
    let (text, stop) = match (input, stop) {
        (Some(t), Some(s)) if !t.is_empty() => (t, s),
        _ => return (true, String::new()),
    };
    let verb = match when {
        Applicability::Always => "must",
        Applicability::Never => "may not",
    };
    (
        applies(when, text.ends_with(stop)),
        format!("{} {} end with full stop", field, verb),
    )
}

fn type_enum(
    input: Option<&str>,
    when: Applicability,
    allowed: Option<&[String]>,
) -> (bool, String) {
    let (kind, allowed) = match (input, allowed) {
        (Some(k), Some(a)) => (k, a),
        _ => return (true, String::new()),
    };
    (
        applies(when, allowed.iter().any(|a| a == kind)),
        format!("type {} be one of [{}]", must(when), allowed.join(", ")),
    )
}

fn empty(field: &str, input: Option<&str>, when: Applicability) -> (bool, String) {
    let is_empty = input.map(|s| s.trim().is_empty()).unwrap_or(true);
    let verb = match when {
        Applicability::Always => "must",
        Applicability::Never => "may not",
    };
    (
        applies(when, is_empty),
        format!("{} {} be empty", field, verb),
    )
}

fn leading_blank(
    field: &str,
    present: bool,
    blank: bool,
    when: Applicability,
) -> (bool, String) {
    if !present {
        return (true, String::new());
    }
    let verb = match when {
        Applicability::Always => "must",
        Applicability::Never => "may not",
    };
    (
        applies(when, blank),
        format!("{} {} have leading blank line", field, verb),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse;

    fn text(s: &str) -> RuleValue {
        RuleValue::Text(s.into())
    }

    #[test]
    fn test_header_max_length_boundary() {
        let limit = RuleValue::Integer(10);
        let ok = parse("fix: 12345");
        let (valid, _) = run_check(
            RuleName::HeaderMaxLength,
            &ok,
            Applicability::Always,
            Some(&limit),
        );
        assert!(valid);
        let long = parse("fix: 123456");
        let (valid, msg) = run_check(
            RuleName::HeaderMaxLength,
            &long,
            Applicability::Always,
            Some(&limit),
        );
        assert!(!valid);
        assert_eq!(
            msg,
            "header must not be longer than 10 characters, current length is 11"
        );
    }

    #[test]
    fn test_unbounded_line_length_never_fails() {
        let commit = parse(&format!("docs: x\n\n{}", "a".repeat(5000)));
        let (valid, _) = run_check(
            RuleName::BodyMaxLineLength,
            &commit,
            Applicability::Always,
            Some(&RuleValue::Float(f64::INFINITY)),
        );
        assert!(valid);
        let (valid, _) = run_check(
            RuleName::BodyMaxLineLength,
            &commit,
            Applicability::Always,
            Some(&RuleValue::Integer(100)),
        );
        assert!(!valid);
    }

    #[test]
    fn test_type_case_and_never_inversion() {
        let commit = parse("Feat: add parser");
        let (valid, msg) = run_check(
            RuleName::TypeCase,
            &commit,
            Applicability::Always,
            Some(&text("lower-case")),
        );
        assert!(!valid);
        assert_eq!(msg, "type must be lower-case");
        let (valid, _) = run_check(
            RuleName::TypeCase,
            &commit,
            Applicability::Never,
            Some(&text("lower-case")),
        );
        assert!(valid);
    }

    #[test]
    fn test_header_case_skips_non_letter_start() {
        let commit = parse("[WIP] Something");
        let (valid, _) = run_check(
            RuleName::HeaderCase,
            &commit,
            Applicability::Always,
            Some(&text("lower-case")),
        );
        assert!(valid);
    }

    #[test]
    fn test_scope_case_checks_each_segment() {
        let commit = parse("fix(core/Parser): x");
        let (valid, _) = run_check(
            RuleName::ScopeCase,
            &commit,
            Applicability::Always,
            Some(&text("lower-case")),
        );
        assert!(!valid);
    }

    #[test]
    fn test_type_enum_and_empty() {
        let allowed = RuleValue::List(vec!["feat".into(), "fix".into()]);
        let commit = parse("perf: faster");
        let (valid, msg) = run_check(
            RuleName::TypeEnum,
            &commit,
            Applicability::Always,
            Some(&allowed),
        );
        assert!(!valid);
        assert_eq!(msg, "type must be one of [feat, fix]");
        let untyped = parse("just words");
        let (valid, msg) = run_check(RuleName::TypeEmpty, &untyped, Applicability::Never, None);
        assert!(!valid);
        assert_eq!(msg, "type may not be empty");
    }

    #[test]
    fn test_full_stop_and_leading_blank() {
        let commit = parse("fix: trailing dot.\nbody right away");
        let (valid, _) = run_check(
            RuleName::SubjectFullStop,
            &commit,
            Applicability::Never,
            Some(&text(".")),
        );
        assert!(!valid);
        let (valid, msg) = run_check(
            RuleName::BodyLeadingBlank,
            &commit,
            Applicability::Always,
            None,
        );
        assert!(!valid);
        assert_eq!(msg, "body must have leading blank line");
    }
}
