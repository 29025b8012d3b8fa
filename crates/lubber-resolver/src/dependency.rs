use std::collections::BTreeMap;
use std::fmt;

use semver::Version;

use crate::version::VersionRange;

/// A further dependency declared by a dependency, with its raw range string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Dependency name, optionally `provider:name`.
    pub name: String,
    pub version_range: String,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version_range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
        }
    }
}

/// A dependency as it moves through resolution.
///
/// `versions` holds the remaining candidates, highest first; the first entry
/// is the version that gets installed and locked.
#[derive(Debug, Clone)]
pub struct Dependency {
    pub name: String,
    /// Identifier of the resolver that supplied this dependency.
    pub provided_by: String,
    pub versions: Vec<Version>,
    /// Every range contributed by a consumer, most recent last.
    pub version_ranges: Vec<String>,
    pub needed_by: Vec<String>,
    pub relies_on: Vec<Requirement>,
    /// Provider-specific reference per version (e.g. the git tag it came from).
    pub source_refs: BTreeMap<Version, String>,
}

impl Dependency {
    /// Create a candidate set; versions are sorted descending and deduplicated.
    pub fn new(name: impl Into<String>, versions: Vec<Version>) -> Self {
        let mut dep = Self {
            name: name.into(),
            provided_by: String::new(),
            versions,
            version_ranges: Vec::new(),
            needed_by: Vec::new(),
            relies_on: Vec::new(),
            source_refs: BTreeMap::new(),
        };
        dep.sort_versions();
        dep
    }

    pub fn with_relies_on(mut self, relies_on: Vec<Requirement>) -> Self {
        self.relies_on = relies_on;
        self
    }

    pub fn with_source_ref(mut self, version: Version, reference: impl Into<String>) -> Self {
        self.source_refs.insert(version, reference.into());
        self
    }

    /// The selected (highest remaining) version.
    pub fn selected(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// Drop every candidate that does not satisfy `range`.
    pub fn retain_matching(&mut self, range: &VersionRange) {
        self.versions.retain(|v| range.matches(v));
    }

    /// Restore the strictly-descending order of `versions`.
    pub fn sort_versions(&mut self) {
        self.versions.sort_by(|a, b| b.cmp(a));
        self.versions.dedup();
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selected() {
            Some(v) => write!(f, "{}@{v}", self.name),
            None => write!(f, "{}@?", self.name),
        }
    }
}
