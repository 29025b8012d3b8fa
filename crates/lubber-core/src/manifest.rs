use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use lubber_util::errors::LubberError;

/// The parsed representation of a `lubber.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "mod")]
    pub mod_info: ModInfo,

    /// Dependency name (optionally `provider:name`) to raw version range.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub directories: Directories,

    #[serde(default)]
    pub build: BuildSettings,
}

/// Mod identity from the `[mod]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModInfo {
    #[serde(default = "default_mod_name")]
    pub name: String,
    #[serde(default = "default_mod_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl Default for ModInfo {
    fn default() -> Self {
        Self {
            name: default_mod_name(),
            version: default_mod_version(),
            description: String::new(),
            authors: Vec::new(),
        }
    }
}

fn default_mod_name() -> String {
    "mod-name".to_string()
}

fn default_mod_version() -> String {
    "0.0.0".to_string()
}

/// Project-relative directory names from `[directories]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directories {
    #[serde(default = "default_assets_dir")]
    pub assets: String,
    #[serde(default = "default_source_dir")]
    pub source: String,
    #[serde(default = "default_output_dir")]
    pub output: String,
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            assets: default_assets_dir(),
            source: default_source_dir(),
            output: default_output_dir(),
        }
    }
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

/// Output packaging switches from `[build]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Bundle every compiled module into one bytecode file.
    #[serde(default)]
    pub output_single_file: bool,
    /// Replace output file names with minimal letter sequences.
    #[serde(default)]
    pub shorten_names: bool,
}

impl Manifest {
    /// Parse a `lubber.toml` read as raw bytes; the file must be UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> miette::Result<Self> {
        let content = std::str::from_utf8(bytes).map_err(|e| LubberError::Manifest {
            message: format!("lubber.toml is not valid UTF-8: {e}"),
        })?;
        Self::parse_toml(content)
    }

    /// Parse a `lubber.toml` from a string.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            LubberError::Manifest {
                message: format!("Failed to parse lubber.toml: {e}"),
            }
            .into()
        })
    }
}
