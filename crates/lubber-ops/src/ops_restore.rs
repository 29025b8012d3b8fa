//! Operation: validate the manifest, resolve dependencies and bring the
//! installed set in line with the lockfile.

use std::path::Path;

use lubber_core::config::GlobalConfig;
use lubber_core::lockfile::Lockfile;
use lubber_core::validate::validate;
use lubber_resolver::graph;
use lubber_resolver::install;
use lubber_resolver::reconcile::{self, is_up_to_date, locked_entries, project_hash};
use lubber_resolver::registry::ResolverRegistry;
use lubber_util::progress::{spinner, status, status_error};

use crate::load_project;

/// Result of a restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The manifest is unchanged since the last restore; nothing was done.
    UpToDate,
    /// Dependencies were reconciled. Entries are `name@version`.
    Restored {
        installed: Vec<String>,
        removed: Vec<String>,
    },
    /// The manifest failed validation; nothing was resolved.
    Invalid { errors: usize },
}

impl RestoreOutcome {
    /// Whether the project can be built after this restore.
    pub fn is_buildable(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }
}

/// Restore with the built-in resolvers and the user's global config.
pub fn restore(project_dir: &Path) -> miette::Result<RestoreOutcome> {
    let config = GlobalConfig::load()?;
    let registry = ResolverRegistry::with_defaults(&config.remote)?;
    restore_with(project_dir, &registry)
}

/// Restore using the given resolver registry.
pub fn restore_with(project_dir: &Path, registry: &ResolverRegistry) -> miette::Result<RestoreOutcome> {
    let project = load_project(project_dir)?;
    let layout = &project.layout;

    let issues = validate(&project.manifest);
    if !issues.is_empty() {
        for issue in &issues {
            status_error("error", &issue.to_string());
        }
        return Ok(RestoreOutcome::Invalid {
            errors: issues.len(),
        });
    }

    let lock_path = layout.lockfile_path();
    let mut lock = Lockfile::load_or_default(&lock_path)?;
    let hash = project_hash(&project.manifest_bytes);
    if is_up_to_date(&lock, &hash) {
        tracing::info!("manifest unchanged, skipping resolve");
        return Ok(RestoreOutcome::UpToDate);
    }

    let sp = spinner("Resolving dependencies...");
    let resolved = graph::resolve(
        &project.manifest.mod_info.name,
        &project.manifest.dependencies,
        registry,
    );
    sp.finish_and_clear();
    let resolved = resolved?;

    let plan = reconcile::reconcile(&resolved, &lock);

    let mut removed = Vec::with_capacity(plan.to_remove.len());
    for stale in &plan.to_remove {
        status("Removing", &format!("{} v{}", stale.name, stale.locked.version));
        install::remove(&layout.dependency_dir(&stale.name))?;
        removed.push(format!("{}@{}", stale.name, stale.locked.version));
    }

    let mut installed = Vec::with_capacity(plan.to_install.len());
    for dep in &plan.to_install {
        let dest = layout.dependency_dir(&dep.name);
        if !lock.dependencies.contains_key(&dep.name) && dest.exists() {
            // Left behind by an install that failed before the lock was written.
            tracing::debug!("clearing leftover {}", dest.display());
            install::remove(&dest)?;
        }
        let version = dep.selected().map(|v| v.to_string()).unwrap_or_default();
        status("Installing", &format!("{} v{version}", dep.name));
        install::install(registry, dep, &dest)?;
        installed.push(format!("{}@{version}", dep.name));
    }

    lock.project_hash = hash;
    lock.dependencies = locked_entries(&resolved);
    lock.write_to(&lock_path)?;

    status(
        "Restored",
        &format!("{} installed, {} removed", installed.len(), removed.len()),
    );
    Ok(RestoreOutcome::Restored { installed, removed })
}
