//! Conventional-commit message parsing.
//!
//! Splits a raw message into header, type, scope, subject, body and footer.
//! Comment lines (`#`) and everything below a git scissors line are dropped
//! before parsing.

use regex::Regex;
use std::sync::OnceLock;

const SCISSORS: &str = "# ------------------------ >8 ------------------------";

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w*)(?:\((.*)\))?!?: (.*)$").expect("valid header pattern"))
}

fn trailer_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[\w-]+)(?:: | #)").expect("valid trailer pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed commit message.
pub struct Commit {
    /// Message after comment stripping; the text every rule sees.
    pub raw: String,
    pub header: String,
    /// The conventional-commit type.
    pub kind: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub footer: Option<String>,
    footer_line: Option<usize>,
}

impl Commit {
    /// True when the line right after the header is empty.
    pub fn blank_after_header(&self) -> bool {
        self.raw
            .lines()
            .nth(1)
            .map(|l| l.trim().is_empty())
            .unwrap_or(false)
    }

    /// True when the line right before the footer is empty.
    pub fn blank_before_footer(&self) -> bool {
        match self.footer_line {
            Some(idx) if idx > 0 => self
                .raw
                .lines()
                .nth(idx - 1)
                .map(|l| l.trim().is_empty())
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// Remove comment lines and the scissors section, trimming trailing blank lines.
pub fn strip_comments(input: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in input.lines() {
        let line = line.trim_end_matches('\r');
        if line == SCISSORS {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

/// Parse a commit message.
pub fn parse(input: &str) -> Commit {
    let raw = strip_comments(input);
    let lines: Vec<&str> = raw.lines().collect();
    let header = lines.first().copied().unwrap_or("").to_string();

    let (kind, scope, subject) = match header_pattern().captures(&header) {
        Some(caps) => {
            let group = |i: usize| {
                caps.get(i)
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty())
            };
            (group(1), group(2), group(3))
        }
        None => (None, None, None),
    };

    let footer_line = find_footer(&lines);
    let body_end = footer_line.unwrap_or(lines.len());
    let body = join_section(lines.get(1..body_end).unwrap_or(&[]));
    let footer = footer_line.and_then(|idx| join_section(&lines[idx..]));

    Commit {
        raw,
        header,
        kind,
        scope,
        subject,
        body,
        footer,
        footer_line,
    }
}

/// First line after the header from which every non-blank line is a trailer.
fn find_footer(lines: &[&str]) -> Option<usize> {
    let mut start: Option<usize> = None;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        if trailer_pattern().is_match(line) {
            if start.is_none() {
                start = Some(idx);
            }
        } else {
            start = None;
        }
    }
    start
}

fn join_section(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_parts() {
        let c = parse("feat(parser)!: support nested scopes");
        assert_eq!(c.kind.as_deref(), Some("feat"));
        assert_eq!(c.scope.as_deref(), Some("parser"));
        assert_eq!(c.subject.as_deref(), Some("support nested scopes"));
        assert!(c.body.is_none());
        assert!(c.footer.is_none());
    }

    #[test]
    fn test_non_conventional_header_has_no_type() {
        let c = parse("Update readme");
        assert_eq!(c.header, "Update readme");
        assert!(c.kind.is_none());
        assert!(c.subject.is_none());
    }

    #[test]
    fn test_body_and_footer_split() {
        let c = parse(
            "fix: handle empty input\n\nThe loader crashed on empty files.\nNow it returns early.\n\nRefs #12\nReviewed-by: Sam",
        );
        assert_eq!(
            c.body.as_deref(),
            Some("The loader crashed on empty files.\nNow it returns early.")
        );
        assert_eq!(c.footer.as_deref(), Some("Refs #12\nReviewed-by: Sam"));
        assert!(c.blank_after_header());
        assert!(c.blank_before_footer());
    }

    #[test]
    fn test_footer_without_leading_blank() {
        let c = parse("fix: x\n\nbody text\nBREAKING CHANGE: drops v1");
        assert_eq!(c.body.as_deref(), Some("body text"));
        assert_eq!(c.footer.as_deref(), Some("BREAKING CHANGE: drops v1"));
        assert!(!c.blank_before_footer());
    }

    #[test]
    fn test_comments_and_scissors_are_dropped() {
        let text = "chore: bump\n# Please enter the commit message\n\nbody\n# ------------------------ >8 ------------------------\ndiff --git a b\n";
        let c = parse(text);
        assert_eq!(c.raw, "chore: bump\n\nbody");
        assert_eq!(c.body.as_deref(), Some("body"));
    }

    #[test]
    fn test_empty_message() {
        let c = parse("");
        assert_eq!(c.header, "");
        assert!(c.kind.is_none());
        assert!(!c.blank_after_header());
    }
}
