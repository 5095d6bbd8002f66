//! The lint configuration record and its built-in values.
//!
//! Shape (TOML):
//!
//! ```toml
//! extends = ["@commitlint/config-conventional"]
//! [rules]
//! body-max-line-length = [0, "always", inf]
//! header-case = [2, "always", "lower-case"]
//! type-case = [2, "always", "lower-case"]
//! ```
//!
//! Fields are private; a configuration is only obtained through a built-in
//! constructor or a validated load, and is read-only afterwards.

use crate::error::ConfigError;
use crate::models::rules::{Applicability, RuleName, RuleSpec, RuleValue, Severity, ValueKind};
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Preset every built-in configuration extends.
pub const CONVENTIONAL_PRESET: &str = "@commitlint/config-conventional";

/// Header bound used by the header-limited variant.
pub const DEFAULT_HEADER_LIMIT: usize = 80;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
/// Rule overrides for the commit-message linter.
pub struct LintConfiguration {
    #[serde(default)]
    extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ignores: Vec<String>,
    #[serde(default = "default_true")]
    default_ignores: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help_url: Option<String>,
    // Kept last so TOML output writes plain keys before the table.
    #[serde(default, deserialize_with = "unique_rules")]
    rules: BTreeMap<String, RuleSpec>,
}

fn default_true() -> bool {
    true
}

/// Deserialize the rules table, rejecting names that occur twice.
///
/// TOML and YAML already refuse duplicate keys; JSON maps would silently keep
/// the last one.
fn unique_rules<'de, D>(deserializer: D) -> Result<BTreeMap<String, RuleSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = BTreeMap<String, RuleSpec>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of rule tuples")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = BTreeMap::new();
            while let Some((name, spec)) = map.next_entry::<String, RuleSpec>()? {
                if out.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate rule name: {}", name)));
                }
                out.insert(name, spec);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}

impl LintConfiguration {
    /// The authoritative project configuration.
    ///
    /// Extends the conventional preset, switches off body line-length limits and
    /// requires lower-case headers and types.
    pub fn conventional_lower_case() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            RuleName::BodyMaxLineLength.as_str().to_string(),
            RuleSpec::new(
                Severity::Disabled,
                Applicability::Always,
                Some(RuleValue::Float(f64::INFINITY)),
            ),
        );
        for rule in [RuleName::HeaderCase, RuleName::TypeCase] {
            rules.insert(
                rule.as_str().to_string(),
                RuleSpec::new(
                    Severity::Error,
                    Applicability::Always,
                    Some(RuleValue::Text("lower-case".into())),
                ),
            );
        }
        Self {
            extends: vec![CONVENTIONAL_PRESET.to_string()],
            ignores: Vec::new(),
            default_ignores: true,
            help_url: None,
            rules,
        }
    }

    /// Add a warning-level `header-max-length` bound.
    pub fn with_header_limit(mut self, limit: usize) -> Self {
        self.rules.insert(
            RuleName::HeaderMaxLength.as_str().to_string(),
            RuleSpec::new(
                Severity::Warning,
                Applicability::Always,
                Some(RuleValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX))),
            ),
        );
        self
    }

    pub fn extends(&self) -> &[String] {
        &self.extends
    }

    pub fn rules(&self) -> &BTreeMap<String, RuleSpec> {
        &self.rules
    }

    pub fn rule(&self, name: RuleName) -> Option<&RuleSpec> {
        self.rules.get(name.as_str())
    }

    pub fn ignores(&self) -> &[String] {
        &self.ignores
    }

    pub fn default_ignores(&self) -> bool {
        self.default_ignores
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    /// Check rule names, value shapes and ignore patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unknown: Vec<String> = self
            .rules
            .keys()
            .filter(|name| name.parse::<RuleName>().is_err())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ConfigError::UnknownRules(unknown));
        }
        for (name, spec) in &self.rules {
            let kind = match name.parse::<RuleName>() {
                Ok(rule) => rule.value_kind(),
                Err(()) => continue,
            };
            match spec.value.as_ref() {
                None if spec.is_enabled() && kind != ValueKind::Nothing => {
                    return Err(ConfigError::MissingValue { rule: name.clone() });
                }
                Some(v) if !kind.accepts(Some(v)) => {
                    return Err(ConfigError::InvalidValue {
                        rule: name.clone(),
                        expected: kind.describe(),
                    });
                }
                _ => {}
            }
        }
        for pattern in &self.ignores {
            if let Err(e) = Regex::new(pattern) {
                return Err(ConfigError::InvalidIgnore {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for LintConfiguration {
    fn default() -> Self {
        Self::conventional_lower_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rules::Limit;

    fn lower_case() -> Option<RuleValue> {
        Some(RuleValue::Text("lower-case".into()))
    }

    #[test]
    fn test_authoritative_rules_are_exactly_documented() {
        let cfg = LintConfiguration::conventional_lower_case();
        assert_eq!(cfg.extends(), [CONVENTIONAL_PRESET.to_string()]);
        let names: Vec<&str> = cfg.rules().keys().map(String::as_str).collect();
        assert_eq!(names, ["body-max-line-length", "header-case", "type-case"]);
        assert!(cfg.rule(RuleName::HeaderMaxLength).is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_case_rules_are_errors_with_lower_case() {
        for cfg in [
            LintConfiguration::conventional_lower_case(),
            LintConfiguration::conventional_lower_case().with_header_limit(DEFAULT_HEADER_LIMIT),
        ] {
            for rule in [RuleName::HeaderCase, RuleName::TypeCase] {
                let spec = cfg.rule(rule).unwrap();
                assert_eq!(spec.level, Severity::Error);
                assert_eq!(spec.when, Applicability::Always);
                assert_eq!(spec.value, lower_case());
            }
            let body = cfg.rule(RuleName::BodyMaxLineLength).unwrap();
            assert_eq!(body.level, Severity::Disabled);
            assert!(!body.is_enabled());
        }
    }

    #[test]
    fn test_header_limit_variant_adds_warning_at_80() {
        let cfg =
            LintConfiguration::conventional_lower_case().with_header_limit(DEFAULT_HEADER_LIMIT);
        assert_eq!(cfg.rules().len(), 4);
        let spec = cfg.rule(RuleName::HeaderMaxLength).unwrap();
        assert_eq!(spec.level, Severity::Warning);
        assert_eq!(
            spec.value.as_ref().and_then(RuleValue::as_limit),
            Some(Limit::Bounded(80))
        );
    }

    #[test]
    fn test_huge_header_limit_saturates() {
        let cfg = LintConfiguration::conventional_lower_case().with_header_limit(usize::MAX);
        let spec = cfg.rule(RuleName::HeaderMaxLength).unwrap();
        match spec.value {
            Some(RuleValue::Integer(n)) => assert!(n > 0),
            ref other => panic!("unexpected: {:?}", other),
        }
        let limit = spec.value.as_ref().and_then(RuleValue::as_limit).unwrap();
        assert!(limit.admits_max(DEFAULT_HEADER_LIMIT));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_unknown_names() {
        let cfg: LintConfiguration = toml::from_str(
            r#"
[rules]
header-lenght = [1, "always", 80]
type-case = [2, "always", "lower-case"]
body-width = [0]
"#,
        )
        .unwrap();
        match cfg.validate() {
            Err(ConfigError::UnknownRules(names)) => {
                assert_eq!(names, ["body-width", "header-lenght"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_checks_value_shape() {
        let wrong: LintConfiguration =
            toml::from_str("[rules]\nheader-case = [2, \"always\", 80]\n").unwrap();
        assert!(matches!(
            wrong.validate(),
            Err(ConfigError::InvalidValue { ref rule, .. }) if rule == "header-case"
        ));
        let missing: LintConfiguration =
            toml::from_str("[rules]\nheader-max-length = [1, \"always\"]\n").unwrap();
        assert!(matches!(
            missing.validate(),
            Err(ConfigError::MissingValue { .. })
        ));
        let disabled: LintConfiguration =
            toml::from_str("[rules]\nheader-max-length = [0]\n").unwrap();
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_json_duplicate_rule_names_are_rejected() {
        let text = r#"{"rules": {"type-case": [2, "always", "lower-case"], "type-case": [0]}}"#;
        let err = serde_json::from_str::<LintConfiguration>(text).unwrap_err();
        assert!(err.to_string().contains("duplicate rule name"));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let cfg: LintConfiguration = toml::from_str("ignores = [\"(unclosed\"]\n").unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidIgnore { .. })
        ));
        assert!(cfg.default_ignores());
    }
}
