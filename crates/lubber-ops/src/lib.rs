pub mod ops_build;
pub mod ops_clean;
pub mod ops_restore;
pub mod ops_setup;

use std::path::Path;

use lubber_core::layout::ProjectLayout;
use lubber_core::manifest::Manifest;
use lubber_util::errors::LubberError;

/// A loaded project: its layout, parsed manifest and the raw manifest bytes
/// (hashed for the lockfile).
pub struct Project {
    pub layout: ProjectLayout,
    pub manifest: Manifest,
    pub manifest_bytes: Vec<u8>,
}

/// Load the project rooted at `project_dir`.
pub fn load_project(project_dir: &Path) -> miette::Result<Project> {
    let layout = ProjectLayout::new(project_dir);
    let manifest_path = layout.manifest_path();
    if !manifest_path.is_file() {
        return Err(LubberError::Manifest {
            message: format!("No mod exists in path {}", project_dir.display()),
        }
        .into());
    }
    let manifest_bytes = std::fs::read(&manifest_path).map_err(LubberError::Io)?;
    let manifest = Manifest::parse_bytes(&manifest_bytes)?;
    Ok(Project {
        layout,
        manifest,
        manifest_bytes,
    })
}
