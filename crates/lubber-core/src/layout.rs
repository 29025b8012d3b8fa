use std::path::{Path, PathBuf};

use crate::manifest::Manifest;
use crate::MANIFEST_FILE;

/// Name of the per-project cache directory.
pub const CACHE_DIR: &str = ".lubber";

/// On-disk locations of a project and its cache.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.cache_dir().join("lubber.lock")
    }

    /// Intermediate compiled modules.
    pub fn obj_dir(&self) -> PathBuf {
        self.cache_dir().join("obj")
    }

    pub fn dependencies_dir(&self) -> PathBuf {
        self.cache_dir().join("dependencies")
    }

    /// Install location of a single dependency.
    pub fn dependency_dir(&self, name: &str) -> PathBuf {
        self.dependencies_dir().join(name)
    }

    pub fn source_dir(&self, manifest: &Manifest) -> PathBuf {
        self.resolve(&manifest.directories.source)
    }

    pub fn assets_dir(&self, manifest: &Manifest) -> PathBuf {
        self.resolve(&manifest.directories.assets)
    }

    pub fn output_dir(&self, manifest: &Manifest) -> PathBuf {
        self.resolve(&manifest.directories.output)
    }

    fn resolve(&self, dir: &str) -> PathBuf {
        let p = Path::new(dir);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}
