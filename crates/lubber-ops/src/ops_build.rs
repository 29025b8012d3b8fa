//! Operation: restore, then compile and package the mod.

use std::path::Path;

use lubber_compiler::backend::BytecodeCompiler;
use lubber_compiler::luac::LuacCompiler;
use lubber_compiler::pipeline::{self, BuildPlan};
use lubber_core::config::GlobalConfig;
use lubber_resolver::registry::ResolverRegistry;
use lubber_util::errors::LubberError;
use lubber_util::progress::{status, status_warn};

pub use lubber_compiler::pipeline::BuildReport;

use crate::load_project;
use crate::ops_restore::restore_with;
use crate::ops_setup::preflight;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Strip debug info and ship only allow-listed asset files.
    pub release: bool,
}

/// Build with `luac` from the global config and the built-in resolvers.
pub fn build(project_dir: &Path, opts: BuildOptions) -> miette::Result<BuildReport> {
    let config = GlobalConfig::load()?;
    let tools = preflight(&config)?;
    let registry = ResolverRegistry::with_defaults(&config.remote)?;
    let compiler = LuacCompiler::new(tools.luac.to_string_lossy());
    build_with(project_dir, opts, &registry, &compiler)
}

/// Build using the given resolvers and compiler backend.
pub fn build_with(
    project_dir: &Path,
    opts: BuildOptions,
    registry: &ResolverRegistry,
    compiler: &dyn BytecodeCompiler,
) -> miette::Result<BuildReport> {
    let outcome = restore_with(project_dir, registry)?;
    if !outcome.is_buildable() {
        return Err(LubberError::Validation {
            message: "restore did not succeed; fix the errors above and try again".to_string(),
        }
        .into());
    }

    let project = load_project(project_dir)?;
    let info = &project.manifest.mod_info;
    let profile = if opts.release { "release" } else { "dev" };
    status("Building", &format!("{} v{} ({profile})", info.name, info.version));

    let plan = BuildPlan::new(&project.layout, &project.manifest, opts.release);
    let report = pipeline::run(&plan, compiler)?;

    if !report.warnings.is_empty() {
        status_warn(
            "Warning",
            &format!("{} of {} modules failed to compile", report.warnings.len(), report.module_count()),
        );
    }
    status(
        "Finished",
        &format!(
            "{profile} build of {} module(s) into {}",
            report.module_count(),
            plan.output_dir.display()
        ),
    );
    Ok(report)
}
