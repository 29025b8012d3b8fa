use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use lubber_util::errors::LubberError;

/// Persisted record of what the last successful restore installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    /// SHA-256 of the raw `lubber.toml` bytes that produced this lock.
    #[serde(default)]
    pub project_hash: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, LockedDependency>,
}

/// A single installed dependency: its selected version and provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedDependency {
    pub version: String,
    pub provided_by: String,
}

impl Lockfile {
    /// Load and parse a lockfile from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LubberError::Generic {
            message: format!("Failed to read lockfile: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            LubberError::Generic {
                message: format!("Failed to parse lockfile: {e}"),
            }
            .into()
        })
    }

    /// Load the lockfile if it exists, otherwise start from an empty one.
    pub fn load_or_default(path: &Path) -> miette::Result<Self> {
        if path.is_file() {
            Self::from_path(path)
        } else {
            tracing::debug!("no lockfile at {}, starting fresh", path.display());
            Ok(Self::default())
        }
    }

    /// Serialize the lockfile to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the lockfile to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| LubberError::Generic {
            message: format!("Failed to serialize lockfile: {e}"),
        })?;
        if let Some(parent) = path.parent() {
            lubber_util::fs::ensure_dir(parent).map_err(LubberError::Io)?;
        }
        std::fs::write(path, content).map_err(LubberError::Io)?;
        Ok(())
    }
}
