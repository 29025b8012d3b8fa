//! Version parsing and range matching.
//!
//! A range is a comma-separated conjunction of comparators:
//! - `>=1.0.0`, `>1.0`, `<=2`, `<2.0.0`
//! - `==1.0.0` or `=1.0.0` or a bare `1.0.0` (exact)
//! - `!=1.0.1`
//! - `*` or an empty string (any version)
//!
//! A caret is rewritten to `>=` before parsing, so `^1.2.0` has no upper bound.

use std::fmt;

use semver::Version;

/// Rewrite the raw range syntax into the comparator form used for matching.
pub fn normalize_range(raw: &str) -> String {
    raw.trim().replace('^', ">=")
}

/// Parse a version leniently: a leading `v` is dropped and missing minor or
/// patch components default to zero (`v1.2` parses as `1.2.0`).
pub fn parse_loose(input: &str) -> Option<Version> {
    let s = input.trim();
    let s = s
        .strip_prefix('v')
        .or_else(|| s.strip_prefix('V'))
        .unwrap_or(s);
    if let Ok(v) = Version::parse(s) {
        return Some(v);
    }

    let split_at = s.find(['-', '+']).unwrap_or(s.len());
    let (core, rest) = s.split_at(split_at);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part.parse().ok()?;
    }
    Version::parse(&format!("{}.{}.{}{rest}", numbers[0], numbers[1], numbers[2])).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Any,
    Exact,
    NotEqual,
    Greater,
    GreaterEq,
    Less,
    LessEq,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    version: Option<Version>,
}

impl Comparator {
    fn parse(token: &str) -> Result<Self, String> {
        let token = token.trim();
        if token.is_empty() || token == "*" {
            return Ok(Self {
                op: Op::Any,
                version: None,
            });
        }

        let (op, rest) = [
            (">=", Op::GreaterEq),
            ("<=", Op::LessEq),
            ("==", Op::Exact),
            ("!=", Op::NotEqual),
            (">", Op::Greater),
            ("<", Op::Less),
            ("=", Op::Exact),
        ]
        .iter()
        .find_map(|(prefix, op)| token.strip_prefix(*prefix).map(|rest| (*op, rest)))
        .unwrap_or((Op::Exact, token));

        let version =
            parse_loose(rest).ok_or_else(|| format!("'{}' is not a version", rest.trim()))?;
        Ok(Self {
            op,
            version: Some(version),
        })
    }

    fn matches(&self, candidate: &Version) -> bool {
        let Some(ref v) = self.version else {
            return true;
        };
        match self.op {
            Op::Any => true,
            Op::Exact => candidate == v,
            Op::NotEqual => candidate != v,
            Op::Greater => candidate > v,
            Op::GreaterEq => candidate >= v,
            Op::Less => candidate < v,
            Op::LessEq => candidate <= v,
        }
    }
}

/// A parsed version range; a version matches when every comparator accepts it.
#[derive(Debug, Clone)]
pub struct VersionRange {
    raw: String,
    comparators: Vec<Comparator>,
}

impl VersionRange {
    /// Parse an already-normalized range string.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let comparators = raw
            .split(',')
            .map(Comparator::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: raw.to_string(),
            comparators,
        })
    }

    /// Check if a version satisfies this range.
    pub fn matches(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
