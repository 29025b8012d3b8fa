//! Executes an install/remove plan against the filesystem.

use std::path::Path;

use lubber_util::fs::{ensure_dir, is_empty_dir, remove_dir_if_exists};

use crate::dependency::Dependency;
use crate::error::InstallError;
use crate::registry::ResolverRegistry;

/// Install the selected version of `dependency` into `destination` through
/// the resolver that provided it.
///
/// `destination` is created when missing. An existing non-empty directory is
/// rejected rather than merged into.
pub fn install(
    registry: &ResolverRegistry,
    dependency: &Dependency,
    destination: &Path,
) -> Result<(), InstallError> {
    let resolver = registry
        .get(&dependency.provided_by)
        .ok_or_else(|| InstallError::UnknownProvider {
            provider: dependency.provided_by.clone(),
            name: dependency.name.clone(),
        })?;
    let version = dependency.selected().ok_or_else(|| InstallError::NoVersion {
        name: dependency.name.clone(),
    })?;

    if destination.exists() {
        let empty = is_empty_dir(destination).map_err(|source| InstallError::Io {
            path: destination.to_path_buf(),
            source,
        })?;
        if !empty {
            return Err(InstallError::DestinationNotEmpty {
                name: dependency.name.clone(),
                path: destination.to_path_buf(),
            });
        }
    } else {
        ensure_dir(destination).map_err(|source| InstallError::Io {
            path: destination.to_path_buf(),
            source,
        })?;
    }

    tracing::info!("installing {dependency} into {}", destination.display());
    resolver
        .install(dependency, destination)
        .map_err(|e| InstallError::Failed {
            name: dependency.name.clone(),
            version: version.to_string(),
            message: e.to_string(),
        })
}

/// Delete an installed dependency directory. A missing path is not an error.
pub fn remove(path: &Path) -> Result<(), InstallError> {
    tracing::info!("removing {}", path.display());
    remove_dir_if_exists(path).map_err(|source| InstallError::Io {
        path: path.to_path_buf(),
        source,
    })
}
