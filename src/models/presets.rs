//! Preset identifiers listed under `extends`.
//!
//! Presets are recorded and checked against a known list only; their rules
//! are not merged into the local configuration.

/// Presets published by the commitlint project.
pub const KNOWN_PRESETS: &[&str] = &[
    "@commitlint/config-conventional",
    "@commitlint/config-angular",
    "@commitlint/config-angular-type-enum",
    "@commitlint/config-lerna-scopes",
    "@commitlint/config-nx-scopes",
    "@commitlint/config-pnpm-scopes",
    "@commitlint/config-rush-scopes",
    "@commitlint/config-workspace-scopes",
];

/// Normalize an `extends` entry the way commitlint resolves shareable configs.
///
/// - Scoped ids (`@scope/name`) are kept, except `@scope` alone which becomes
///   `@scope/commitlint-config`.
/// - Bare names gain the `commitlint-config-` prefix unless they already carry it.
/// - Relative and absolute paths are kept verbatim.
pub fn normalize_preset(id: &str) -> String {
    let id = id.trim();
    if id.starts_with('.') || id.starts_with('/') {
        return id.to_string();
    }
    if let Some(scope) = id.strip_prefix('@') {
        if !scope.contains('/') {
            return format!("@{}/commitlint-config", scope);
        }
        return id.to_string();
    }
    if id.starts_with("commitlint-config-") {
        id.to_string()
    } else {
        format!("commitlint-config-{}", id)
    }
}

/// True when the normalized id is one of the commitlint-published presets.
pub fn is_known(id: &str) -> bool {
    let normalized = normalize_preset(id);
    KNOWN_PRESETS.contains(&normalized.as_str())
}
