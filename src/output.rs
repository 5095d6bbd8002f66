//! Output rendering for lint results and the resolved configuration.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-message results and a top-level summary.

use crate::error::ConfigError;
use crate::models::configuration::LintConfiguration;
use crate::models::rules::Severity;
use crate::models::{LintResult, Summary};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print lint results in the requested format.
pub fn print_lint(results: &[LintResult], output: &str, help_url: Option<&str>) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(results)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            for line in render_human(results, help_url, use_colors(output)) {
                println!("{}", line);
            }
        }
    }
}

/// Human report lines. Valid, issue-free messages are only summarized.
pub fn render_human(results: &[LintResult], help_url: Option<&str>, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for res in results {
        if res.issues.is_empty() {
            continue;
        }
        let input = if color {
            res.input.bold().to_string()
        } else {
            res.input.clone()
        };
        lines.push(format!("⧗ input: {}", input));
        for is in &res.issues {
            let icon = match is.level {
                Severity::Error => "✖",
                Severity::Warning => "▲",
                Severity::Disabled => "◆",
            };
            let sev = format!("⟦{}⟧", is.level.label());
            let (icon, sev) = if color {
                match is.level {
                    Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
                    Severity::Warning => {
                        (icon.yellow().to_string(), sev.yellow().bold().to_string())
                    }
                    Severity::Disabled => (icon.blue().to_string(), sev.blue().bold().to_string()),
                }
            } else {
                (icon.to_string(), sev)
            };
            lines.push(format!("{} {} {} ❲{}❳", icon, sev, is.message, is.rule));
        }
    }
    let total = Summary::total(results);
    let summary = format!(
        "— Summary — errors={} warnings={} messages={}",
        total.errors, total.warnings, total.messages
    );
    lines.push(if color {
        summary.bold().to_string()
    } else {
        summary
    });
    if total.errors + total.warnings > 0 {
        if let Some(url) = help_url {
            lines.push(format!("ⓘ Get help: {}", url));
        }
    }
    lines
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(results: &[LintResult]) -> JsonVal {
    let total = Summary::total(results);
    json!({
        "valid": results.iter().all(|r| r.valid),
        "results": results,
        "summary": total,
    })
}

/// Serialize the configuration as TOML or JSON.
pub fn render_config(config: &LintConfiguration, output: &str) -> Result<String, ConfigError> {
    match output {
        "json" => serde_json::to_string_pretty(config).map_err(|e| ConfigError::Render {
            format: "json",
            reason: e.to_string(),
        }),
        _ => toml::to_string(config).map_err(|e| ConfigError::Render {
            format: "toml",
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::lint_message;

    fn limited() -> LintConfiguration {
        LintConfiguration::conventional_lower_case().with_header_limit(80)
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let res = lint_message(&limited(), &format!("feat: {}", "a".repeat(80))).unwrap();
        let out = compose_lint_json(&[res]);
        assert_eq!(out["valid"], true);
        assert_eq!(out["summary"]["warnings"], 1);
        assert_eq!(out["results"][0]["issues"][0]["rule"], "header-max-length");
        assert_eq!(out["results"][0]["issues"][0]["level"], 1);
    }

    #[test]
    fn test_render_human_lists_issues_and_help() {
        let mut cfg_text = String::from("helpUrl = \"https://example.com/commits\"\n");
        cfg_text.push_str("[rules]\ntype-case = [2, \"always\", \"lower-case\"]\n");
        let cfg: LintConfiguration = toml::from_str(&cfg_text).unwrap();
        let res = lint_message(&cfg, "Feat: x").unwrap();
        let lines = render_human(&[res], cfg.help_url(), false);
        assert_eq!(lines[0], "⧗ input: Feat: x");
        assert_eq!(lines[1], "✖ ⟦error⟧ type must be lower-case ❲type-case❳");
        assert_eq!(lines[2], "— Summary — errors=1 warnings=0 messages=1");
        assert_eq!(lines[3], "ⓘ Get help: https://example.com/commits");
    }

    #[test]
    fn test_render_human_tags_warnings() {
        let res = lint_message(&limited(), &format!("feat: {}", "a".repeat(80))).unwrap();
        let lines = render_human(&[res], None, false);
        assert_eq!(
            lines[1],
            "▲ ⟦warn⟧ header must not be longer than 80 characters, current length is 86 ❲header-max-length❳"
        );
        assert_eq!(lines[2], "— Summary — errors=0 warnings=1 messages=1");
    }

    #[test]
    fn test_clean_result_prints_summary_only() {
        let res = lint_message(&limited(), "fix: ok").unwrap();
        let lines = render_human(&[res], Some("https://example.com"), false);
        assert_eq!(lines, ["— Summary — errors=0 warnings=0 messages=1"]);
    }

    #[test]
    fn test_render_config_round_trips_through_toml() {
        let cfg = limited();
        let text = render_config(&cfg, "toml").unwrap();
        assert!(text.contains("header-max-length = [1, \"always\", 80]"));
        let back: LintConfiguration = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_render_config_json_uses_null_for_unbounded() {
        let text = render_config(&LintConfiguration::conventional_lower_case(), "json").unwrap();
        let v: JsonVal = serde_json::from_str(&text).unwrap();
        assert_eq!(
            v["rules"]["body-max-line-length"],
            json!([0, "always", null])
        );
        assert_eq!(v["defaultIgnores"], true);
    }
}
