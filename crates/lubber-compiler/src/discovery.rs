//! Find the Lua modules of a project.

use std::path::{Path, PathBuf};

use crate::unit::SourceModule;

/// File name of the entry module, whose leading comments become the mod header.
pub const MAIN_MODULE: &str = "main.lua";

/// Collect every `.lua` file (extension matched case-insensitively) under
/// `source_dir`, sorted by relative path.
pub fn discover_sources(source_dir: &Path) -> std::io::Result<Vec<SourceModule>> {
    let mut modules: Vec<SourceModule> = lubber_util::fs::collect_files(source_dir)?
        .into_iter()
        .filter(|p| is_lua(p))
        .filter_map(|path| {
            relative_key(source_dir, &path).map(|relative| SourceModule { relative, path })
        })
        .collect();
    sort_modules(&mut modules);
    tracing::debug!("found {} modules in {}", modules.len(), source_dir.display());
    Ok(modules)
}

/// Order modules by relative path string only.
pub fn sort_modules(modules: &mut [SourceModule]) {
    modules.sort_by(|a, b| a.relative.cmp(&b.relative));
}

/// The `main.lua` at the source root, if present.
pub fn find_main(modules: &[SourceModule]) -> Option<&SourceModule> {
    modules.iter().find(|m| m.relative == MAIN_MODULE)
}

/// Leading `--` comment lines of a file, up to the first line that is not a
/// comment. Each kept line ends with `\n`.
pub fn main_header(content: &str) -> String {
    content
        .lines()
        .take_while(|line| line.starts_with("--"))
        .map(|line| format!("{line}\n"))
        .collect()
}

fn is_lua(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("lua"))
}

fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel: PathBuf = path.strip_prefix(root).ok()?.to_path_buf();
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
