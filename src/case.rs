//! Text case names and the check behind the `*-case` rules.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Case styles accepted as the parameter of case rules.
pub enum TargetCase {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl TargetCase {
    pub const ALL: [TargetCase; 8] = [
        TargetCase::LowerCase,
        TargetCase::UpperCase,
        TargetCase::CamelCase,
        TargetCase::KebabCase,
        TargetCase::PascalCase,
        TargetCase::SentenceCase,
        TargetCase::SnakeCase,
        TargetCase::StartCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetCase::LowerCase => "lower-case",
            TargetCase::UpperCase => "upper-case",
            TargetCase::CamelCase => "camel-case",
            TargetCase::KebabCase => "kebab-case",
            TargetCase::PascalCase => "pascal-case",
            TargetCase::SentenceCase => "sentence-case",
            TargetCase::SnakeCase => "snake-case",
            TargetCase::StartCase => "start-case",
        }
    }

    /// Rewrite `input` into this case.
    pub fn apply(self, input: &str) -> String {
        match self {
            TargetCase::LowerCase => input.to_lowercase(),
            TargetCase::UpperCase => input.to_uppercase(),
            TargetCase::SentenceCase => {
                let mut chars = input.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
            TargetCase::CamelCase => words(input)
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    if i == 0 {
                        w.to_lowercase()
                    } else {
                        capitalize(w)
                    }
                })
                .collect(),
            TargetCase::PascalCase => words(input).iter().map(|w| capitalize(w)).collect(),
            TargetCase::KebabCase => join_lower(input, "-"),
            TargetCase::SnakeCase => join_lower(input, "_"),
            TargetCase::StartCase => words(input)
                .iter()
                .map(|w| capitalize(w))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// True when `input` is already in this case.
    ///
    /// Inputs that transform to nothing or start with a digit are accepted,
    /// mirroring commitlint.
    pub fn matches(self, input: &str) -> bool {
        let transformed = self.apply(input);
        if transformed.is_empty() || transformed.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        transformed == input
    }
}

impl FromStr for TargetCase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetCase::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for TargetCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `input` matches at least one of `cases`.
pub fn matches_any(input: &str, cases: &[TargetCase]) -> bool {
    cases.iter().any(|c| c.matches(input))
}

/// Split into words on separators and lower-to-upper transitions.
fn words(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut prev_lower = false;
    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !cur.is_empty() {
            out.push(std::mem::take(&mut cur));
        }
        prev_lower = ch.is_lowercase() || ch.is_numeric();
        cur.push(ch);
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn join_lower(input: &str, sep: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}
