use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lubber_util::errors::LubberError;

/// Global user configuration loaded from `~/.lubber/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// External executables from `[paths]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Lua bytecode compiler, as a bare name looked up on `PATH` or a path.
    #[serde(default = "default_luac_exe")]
    pub luac_exe: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            luac_exe: default_luac_exe(),
        }
    }
}

fn default_luac_exe() -> String {
    "luac".to_string()
}

/// Remote endpoints used by the `coop` resolver, from `[remote]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_raw_url")]
    pub raw_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            raw_url: default_raw_url(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.lubber/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, defaulting when it is absent.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(|e| LubberError::Generic {
                message: format!("Failed to read global config: {e}"),
            })?;
            toml::from_str(&content).map_err(|e| {
                LubberError::Generic {
                    message: format!("Failed to parse global config: {e}"),
                }
                .into()
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the lubber data directory (`~/.lubber/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".lubber")
}
