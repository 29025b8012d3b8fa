//! Manifest validation: mod identifier rules, version and author checks, and
//! the mandatory engine dependency.
//!
//! Problems are collected rather than returned on the first failure so that a
//! single restore reports everything wrong with the manifest at once.

use std::fmt;

use crate::dependency::DependencyRef;
use crate::manifest::Manifest;
use crate::ENGINE_DEPENDENCY;

/// One problem found in a manifest, with optional remediation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
    pub help: Option<String>,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref help) = self.help {
            write!(f, " ({help})")?;
        }
        Ok(())
    }
}

fn is_strict_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

/// A mod identifier uses letters, digits, `.`, `-` and `_`, and starts and
/// ends with a letter or digit.
pub fn validate_mod_id(id: &str) -> bool {
    let (Some(first), Some(last)) = (id.chars().next(), id.chars().last()) else {
        return false;
    };
    id.chars().all(is_id_char) && is_strict_id_char(first) && is_strict_id_char(last)
}

/// Propose a valid identifier: disallowed characters become `-`, then
/// separators are trimmed from both ends.
pub fn suggest_mod_id(id: &str) -> String {
    let replaced: String = id
        .chars()
        .map(|c| if is_id_char(c) { c } else { '-' })
        .collect();
    replaced
        .trim_matches(|c| matches!(c, '.' | '-' | '_'))
        .to_string()
}

/// Check a manifest and return every problem found.
pub fn validate(manifest: &Manifest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let info = &manifest.mod_info;

    if !validate_mod_id(&info.name) {
        let suggestion = suggest_mod_id(&info.name);
        issues.push(ValidationIssue {
            field: "mod.name",
            message: format!("'{}' is not a valid mod identifier", info.name),
            help: (!suggestion.is_empty()).then(|| format!("try '{suggestion}'")),
        });
    }

    if let Err(e) = semver::Version::parse(&info.version) {
        issues.push(ValidationIssue {
            field: "mod.version",
            message: format!("'{}' is not a semantic version: {e}", info.version),
            help: Some("use MAJOR.MINOR.PATCH, e.g. '0.1.0'".to_string()),
        });
    }

    if info.authors.iter().all(|a| a.trim().is_empty()) {
        issues.push(ValidationIssue {
            field: "mod.authors",
            message: "at least one author is required".to_string(),
            help: Some("add `authors = [\"Your Name\"]` under [mod]".to_string()),
        });
    }

    let declares_engine = manifest
        .dependencies
        .keys()
        .any(|k| DependencyRef::parse(k).name == ENGINE_DEPENDENCY);
    if !declares_engine {
        issues.push(ValidationIssue {
            field: "dependencies",
            message: format!("the '{ENGINE_DEPENDENCY}' dependency must be declared"),
            help: Some(format!("add `{ENGINE_DEPENDENCY} = \"^1.0.0\"` under [dependencies]")),
        });
    }

    issues
}
