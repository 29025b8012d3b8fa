//! Asset staging for development and release builds.
//!
//! Development builds copy each asset category directory as-is. Release
//! builds copy only the file types the game loads for that category, and
//! flatten them into `<output>/<category>/`.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use lubber_util::errors::LubberError;

/// Asset categories and the patterns shipped in a release build. Patterns
/// are matched against the path relative to the category directory; `*`
/// does not cross directory separators.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("actors", &["*.bin", "*.col"]),
    ("data", &["*.bhv"]),
    ("textures", &["*.png", "**/*.tex"]),
    ("levels", &["*.lvl"]),
    ("sound", &["*.m64", "*.mp3", "*.aiff", "*.ogg"]),
];

/// Build the release allow-list for one category.
pub fn release_filter(patterns: &[&str]) -> miette::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| LubberError::Generic {
                message: format!("Invalid asset pattern '{pattern}': {e}"),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        LubberError::Generic {
            message: format!("Failed to build asset filter: {e}"),
        }
        .into()
    })
}

/// Copy assets from `assets_dir` into `output_dir`. Returns the staged files,
/// sorted. Missing category directories are skipped.
pub fn stage_assets(assets_dir: &Path, output_dir: &Path, release: bool) -> miette::Result<Vec<PathBuf>> {
    let mut staged = Vec::new();
    for (category, patterns) in CATEGORIES {
        let src = assets_dir.join(category);
        if !src.is_dir() {
            continue;
        }
        let dst = output_dir.join(category);
        if release {
            let filter = release_filter(patterns)?;
            staged.extend(stage_filtered(&src, &dst, &filter)?);
        } else {
            lubber_util::fs::copy_dir_recursive(&src, &dst).map_err(LubberError::Io)?;
            staged.extend(lubber_util::fs::collect_files(&dst).map_err(LubberError::Io)?);
        }
        tracing::debug!("staged {category} assets into {}", dst.display());
    }
    staged.sort();
    Ok(staged)
}

fn stage_filtered(src: &Path, dst: &Path, filter: &GlobSet) -> miette::Result<Vec<PathBuf>> {
    lubber_util::fs::ensure_dir(dst).map_err(LubberError::Io)?;
    let mut staged = Vec::new();
    for file in lubber_util::fs::collect_files(src).map_err(LubberError::Io)? {
        let Ok(rel) = file.strip_prefix(src) else {
            continue;
        };
        if !filter.is_match(rel) {
            continue;
        }
        let Some(name) = file.file_name() else {
            continue;
        };
        let target = dst.join(name);
        std::fs::copy(&file, &target).map_err(LubberError::Io)?;
        staged.push(target);
    }
    Ok(staged)
}
