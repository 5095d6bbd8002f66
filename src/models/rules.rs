//! Rule tuple schema: `[severity, applicability, value]`.
//!
//! Key components:
//! - `Severity`: 0 (disabled), 1 (warning), 2 (error). Serialized as the bare integer.
//! - `Applicability`: `always` or `never`. `never` inverts rules that support it.
//! - `RuleValue`: the rule-specific parameter (number, string or list of strings).
//! - `RuleName`: every rule the evaluator knows, with the value kind it expects.
//!
//! Tuples may have one to three elements, so `[0]` is a valid disabled rule.

use crate::case::TargetCase;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Enforcement level of a rule.
pub enum Severity {
    Disabled,
    Warning,
    Error,
}

impl Severity {
    /// Map a numeric level onto a severity; only 0, 1 and 2 are defined.
    pub fn from_level(level: u8) -> Option<Severity> {
        match level {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Tag shown in human reports.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Disabled => "off",
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        Severity::from_level(level).ok_or_else(|| {
            de::Error::custom(format!("severity must be 0, 1 or 2, got {}", level))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether the rule condition must hold (`always`) or must not hold (`never`).
pub enum Applicability {
    #[default]
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
/// Rule parameter as written in the configuration file.
pub enum RuleValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

/// Upper or lower bound for a length rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Bounded(usize),
    Unbounded,
}

impl Limit {
    /// True when `len` does not exceed the bound.
    pub fn admits_max(self, len: usize) -> bool {
        match self {
            Limit::Bounded(max) => len <= max,
            Limit::Unbounded => true,
        }
    }

    /// True when `len` reaches the bound. An unbounded minimum can never be met.
    pub fn admits_min(self, len: usize) -> bool {
        match self {
            Limit::Bounded(min) => len >= min,
            Limit::Unbounded => false,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(n) => write!(f, "{}", n),
            Limit::Unbounded => f.write_str("Infinity"),
        }
    }
}

impl RuleValue {
    /// Interpret the value as a length bound. `inf` and `"Infinity"` are unbounded.
    pub fn as_limit(&self) -> Option<Limit> {
        match self {
            RuleValue::Integer(n) if *n >= 0 => Some(Limit::Bounded(*n as usize)),
            RuleValue::Float(f) if f.is_infinite() && f.is_sign_positive() => {
                Some(Limit::Unbounded)
            }
            RuleValue::Float(f) if f.is_finite() && *f >= 0.0 => {
                Some(Limit::Bounded(f.floor() as usize))
            }
            RuleValue::Text(s) if s == "Infinity" => Some(Limit::Unbounded),
            _ => None,
        }
    }

    /// Interpret the value as one case or a list of accepted cases.
    pub fn as_cases(&self) -> Option<Vec<TargetCase>> {
        match self {
            RuleValue::Text(s) => s.parse().ok().map(|c| vec![c]),
            RuleValue::List(items) if !items.is_empty() => items
                .iter()
                .map(|s| s.parse().ok())
                .collect::<Option<Vec<_>>>(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RuleValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One entry of the `rules` table.
pub struct RuleSpec {
    pub level: Severity,
    pub when: Applicability,
    pub value: Option<RuleValue>,
}

impl RuleSpec {
    pub fn new(level: Severity, when: Applicability, value: Option<RuleValue>) -> Self {
        Self { level, when, value }
    }

    pub fn is_enabled(&self) -> bool {
        self.level != Severity::Disabled
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.level)?;
        seq.serialize_element(&self.when)?;
        if let Some(v) = &self.value {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

struct RuleSpecVisitor;

impl<'de> Visitor<'de> for RuleSpecVisitor {
    type Value = RuleSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rule tuple [severity, \"always\"|\"never\", value]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSpec, A::Error> {
        let level: Severity = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let when: Applicability = seq.next_element()?.unwrap_or_default();
        // JSON has no infinity literal; `null` stands in for an unbounded value.
        let value = seq
            .next_element::<Option<RuleValue>>()?
            .map(|v| v.unwrap_or(RuleValue::Float(f64::INFINITY)));
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }
        Ok(RuleSpec { level, when, value })
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RuleSpecVisitor)
    }
}

/// Shape of the parameter a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Limit,
    Cases,
    Text,
    List,
    Nothing,
}

impl ValueKind {
    /// Check a configured value against this kind. `Nothing` ignores whatever is given.
    pub fn accepts(self, value: Option<&RuleValue>) -> bool {
        match (self, value) {
            (ValueKind::Nothing, _) => true,
            (ValueKind::Limit, Some(v)) => v.as_limit().is_some(),
            (ValueKind::Cases, Some(v)) => v.as_cases().is_some(),
            (ValueKind::Text, Some(v)) => v.as_text().is_some(),
            (ValueKind::List, Some(v)) => v.as_list().is_some(),
            (_, None) => false,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ValueKind::Limit => "a non-negative number or inf",
            ValueKind::Cases => "a case name or a list of case names",
            ValueKind::Text => "a string",
            ValueKind::List => "a list of strings",
            ValueKind::Nothing => "no value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Rules understood by the evaluator.
pub enum RuleName {
    BodyEmpty,
    BodyLeadingBlank,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterMaxLineLength,
    HeaderCase,
    HeaderFullStop,
    HeaderMaxLength,
    HeaderMinLength,
    ScopeCase,
    ScopeEmpty,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    TypeCase,
    TypeEmpty,
    TypeEnum,
}

impl RuleName {
    pub const ALL: [RuleName; 17] = [
        RuleName::BodyEmpty,
        RuleName::BodyLeadingBlank,
        RuleName::BodyMaxLineLength,
        RuleName::FooterLeadingBlank,
        RuleName::FooterMaxLineLength,
        RuleName::HeaderCase,
        RuleName::HeaderFullStop,
        RuleName::HeaderMaxLength,
        RuleName::HeaderMinLength,
        RuleName::ScopeCase,
        RuleName::ScopeEmpty,
        RuleName::SubjectCase,
        RuleName::SubjectEmpty,
        RuleName::SubjectFullStop,
        RuleName::TypeCase,
        RuleName::TypeEmpty,
        RuleName::TypeEnum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::BodyEmpty => "body-empty",
            RuleName::BodyLeadingBlank => "body-leading-blank",
            RuleName::BodyMaxLineLength => "body-max-line-length",
            RuleName::FooterLeadingBlank => "footer-leading-blank",
            RuleName::FooterMaxLineLength => "footer-max-line-length",
            RuleName::HeaderCase => "header-case",
            RuleName::HeaderFullStop => "header-full-stop",
            RuleName::HeaderMaxLength => "header-max-length",
            RuleName::HeaderMinLength => "header-min-length",
            RuleName::ScopeCase => "scope-case",
            RuleName::ScopeEmpty => "scope-empty",
            RuleName::SubjectCase => "subject-case",
            RuleName::SubjectEmpty => "subject-empty",
            RuleName::SubjectFullStop => "subject-full-stop",
            RuleName::TypeCase => "type-case",
            RuleName::TypeEmpty => "type-empty",
            RuleName::TypeEnum => "type-enum",
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            RuleName::BodyMaxLineLength
            | RuleName::FooterMaxLineLength
            | RuleName::HeaderMaxLength
            | RuleName::HeaderMinLength => ValueKind::Limit,
            RuleName::HeaderCase
            | RuleName::ScopeCase
            | RuleName::SubjectCase
            | RuleName::TypeCase => ValueKind::Cases,
            RuleName::HeaderFullStop | RuleName::SubjectFullStop => ValueKind::Text,
            RuleName::TypeEnum => ValueKind::List,
            RuleName::BodyEmpty
            | RuleName::BodyLeadingBlank
            | RuleName::FooterLeadingBlank
            | RuleName::ScopeEmpty
            | RuleName::SubjectEmpty
            | RuleName::TypeEmpty => ValueKind::Nothing,
        }
    }
}

impl FromStr for RuleName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
