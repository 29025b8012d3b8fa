//! Resolver for the sm64coopdx engine interface files, backed by the
//! upstream GitHub repository.
//!
//! Versions are the repository's tags. Installing a version downloads the
//! generated Lua definition files for that tag so editors can offer
//! completion against the engine API.

use std::fs::File;
use std::path::Path;

use lubber_core::config::RemoteConfig;
use lubber_core::ENGINE_DEPENDENCY;
use lubber_util::errors::LubberError;
use serde::Deserialize;

use crate::dependency::Dependency;
use crate::provider::Resolver;
use crate::version::{parse_loose, VersionRange};

/// Registry identifier of this resolver.
pub const COOP_ID: &str = "coop";

const REPOSITORY: &str = "coop-deluxe/sm64coopdx";
const TAGS_PER_PAGE: usize = 100;

/// Files fetched for every installed version, relative to the repository root.
pub const INTERFACE_FILES: &[&str] = &[
    "autogen/lua_constants/built-in.lua",
    "autogen/lua_definitions/constants.lua",
    "autogen/lua_definitions/functions.lua",
    "autogen/lua_definitions/manual.lua",
    "autogen/lua_definitions/structs.lua",
];

#[derive(Debug, Deserialize)]
struct GhTag {
    name: String,
}

pub struct CoopResolver {
    client: reqwest::blocking::Client,
    api_url: String,
    raw_url: String,
}

impl CoopResolver {
    pub fn new(remote: &RemoteConfig) -> miette::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("lubber/0.2")
            .build()
            .map_err(|e| LubberError::Network {
                message: format!("HTTP client error: {e}"),
            })?;
        Ok(Self {
            client,
            api_url: remote.api_url.clone(),
            raw_url: remote.raw_url.clone(),
        })
    }

    fn fetch_tags(&self) -> miette::Result<Vec<String>> {
        let mut tags = Vec::new();
        for page in 1.. {
            let url = tags_url(&self.api_url, page);
            tracing::debug!("GET {url}");
            let body = self
                .client
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
                .map_err(|e| LubberError::Network {
                    message: format!("Failed to list tags from {url}: {e}"),
                })?;
            let page_tags = parse_tags(&body)?;
            let last_page = page_tags.len() < TAGS_PER_PAGE;
            tags.extend(page_tags);
            if last_page {
                break;
            }
        }
        Ok(tags)
    }

    fn download(&self, url: &str, dest: &Path) -> miette::Result<()> {
        tracing::debug!("GET {url}");
        let mut resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| LubberError::Network {
                message: format!("Failed to download {url}: {e}"),
            })?;
        if !resp.status().is_success() {
            return Err(LubberError::Network {
                message: format!("HTTP {} for {url}", resp.status()),
            }
            .into());
        }
        if let Some(parent) = dest.parent() {
            lubber_util::fs::ensure_dir(parent).map_err(LubberError::Io)?;
        }
        let mut out = File::create(dest).map_err(LubberError::Io)?;
        resp.copy_to(&mut out).map_err(|e| LubberError::Network {
            message: format!("Read error for {url}: {e}"),
        })?;
        Ok(())
    }
}

impl Resolver for CoopResolver {
    fn resolve(&self, name: &str, range: &VersionRange) -> miette::Result<Option<Dependency>> {
        if name != ENGINE_DEPENDENCY {
            return Ok(None);
        }
        let mut dep = Dependency::new(name, Vec::new());
        for tag in self.fetch_tags()? {
            match parse_loose(&tag) {
                Some(version) if range.matches(&version) => {
                    dep.versions.push(version.clone());
                    dep.source_refs.insert(version, tag);
                }
                Some(_) => {}
                None => tracing::debug!("skipping tag '{tag}'"),
            }
        }
        dep.sort_versions();
        Ok(Some(dep))
    }

    fn install(&self, dependency: &Dependency, destination: &Path) -> miette::Result<()> {
        if dependency.provided_by != COOP_ID {
            return Err(LubberError::Install {
                message: format!(
                    "{} is provided by '{}', not '{COOP_ID}'",
                    dependency.name, dependency.provided_by
                ),
            }
            .into());
        }
        let version = dependency.selected().ok_or_else(|| LubberError::Install {
            message: format!("no version selected for {}", dependency.name),
        })?;
        let tag = dependency
            .source_refs
            .get(version)
            .cloned()
            .unwrap_or_else(|| format!("v{version}"));
        for path in INTERFACE_FILES {
            let url = file_url(&self.raw_url, &tag, path);
            self.download(&url, &destination.join(path))?;
        }
        Ok(())
    }
}

/// URL of one page of repository tags.
pub fn tags_url(api_url: &str, page: usize) -> String {
    format!(
        "{}/repos/{REPOSITORY}/tags?per_page={TAGS_PER_PAGE}&page={page}",
        api_url.trim_end_matches('/')
    )
}

/// URL of a repository file at a given tag.
pub fn file_url(raw_url: &str, tag: &str, path: &str) -> String {
    format!(
        "{}/{REPOSITORY}/refs/tags/{tag}/{path}",
        raw_url.trim_end_matches('/')
    )
}

/// Tag names from a GitHub tags API response body.
pub fn parse_tags(body: &str) -> miette::Result<Vec<String>> {
    let tags: Vec<GhTag> = serde_json::from_str(body).map_err(|e| LubberError::Network {
        message: format!("Failed to parse GitHub tags JSON: {e}"),
    })?;
    Ok(tags.into_iter().map(|t| t.name).collect())
}
