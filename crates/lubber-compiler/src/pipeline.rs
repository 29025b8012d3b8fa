//! The build pipeline: clean output, compile modules, package, stage assets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lubber_core::layout::ProjectLayout;
use lubber_core::manifest::Manifest;
use lubber_util::errors::LubberError;
use lubber_util::progress;

use crate::assets::stage_assets;
use crate::backend::BytecodeCompiler;
use crate::discovery::{discover_sources, find_main, main_header, MAIN_MODULE};
use crate::naming::short_name;
use crate::unit::{CompileWarning, SourceModule};

/// Bundle name in single-file mode.
pub const BUNDLE_NAME: &str = "main64.luac";
/// Bundle name in single-file mode with shortened names.
pub const SHORT_BUNDLE_NAME: &str = "64.luac";

/// Everything one build needs to know about the project.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub source_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub obj_dir: PathBuf,
    pub release: bool,
    pub single_file: bool,
    pub shorten_names: bool,
}

impl BuildPlan {
    pub fn new(layout: &ProjectLayout, manifest: &Manifest, release: bool) -> Self {
        Self {
            source_dir: layout.source_dir(manifest),
            assets_dir: layout.assets_dir(manifest),
            output_dir: layout.output_dir(manifest),
            obj_dir: layout.obj_dir(),
            release,
            single_file: manifest.build.output_single_file,
            shorten_names: manifest.build.shorten_names,
        }
    }

    pub fn bundle_name(&self) -> &'static str {
        if self.shorten_names {
            SHORT_BUNDLE_NAME
        } else {
            BUNDLE_NAME
        }
    }
}

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Relative paths of modules that compiled, in build order.
    pub compiled: Vec<String>,
    pub warnings: Vec<CompileWarning>,
    /// Bytecode files written to the output directory.
    pub outputs: Vec<PathBuf>,
    /// Mod header written from `main.lua`, if the project has one.
    pub header: Option<PathBuf>,
    pub assets: Vec<PathBuf>,
}

impl BuildReport {
    pub fn module_count(&self) -> usize {
        self.compiled.len() + self.warnings.len()
    }
}

/// Run the full pipeline. Dependencies must already be installed.
pub fn run(plan: &BuildPlan, compiler: &dyn BytecodeCompiler) -> miette::Result<BuildReport> {
    let mut report = BuildReport::default();

    reset_dir(&plan.output_dir)?;
    reset_dir(&plan.obj_dir)?;
    lubber_util::fs::ensure_dir(&plan.source_dir).map_err(LubberError::Io)?;

    let modules = discover_sources(&plan.source_dir).map_err(LubberError::Io)?;
    if let Some(main) = find_main(&modules) {
        report.header = Some(write_header(main, &plan.output_dir)?);
    }

    let objects = compile_modules(plan, compiler, &modules, &mut report)?;

    if plan.single_file {
        if let Some(bundle) = bundle_objects(plan, compiler, &objects)? {
            report.outputs.push(bundle);
        }
    } else {
        report.outputs = copy_objects(plan, &objects)?;
    }

    report.assets = stage_assets(&plan.assets_dir, &plan.output_dir, plan.release)?;
    Ok(report)
}

fn reset_dir(dir: &Path) -> miette::Result<()> {
    if dir.is_dir() {
        lubber_util::fs::clear_dir(dir).map_err(LubberError::Io)?;
    }
    lubber_util::fs::ensure_dir(dir).map_err(LubberError::Io)?;
    Ok(())
}

fn write_header(main: &SourceModule, output_dir: &Path) -> miette::Result<PathBuf> {
    let bytes = std::fs::read(&main.path).map_err(LubberError::Io)?;
    let target = output_dir.join(MAIN_MODULE);
    std::fs::write(&target, main_header(&String::from_utf8_lossy(&bytes))).map_err(LubberError::Io)?;
    Ok(target)
}

/// A successfully compiled module and its position in the full build order.
struct CompiledObject {
    index: usize,
    path: PathBuf,
}

fn compile_modules(
    plan: &BuildPlan,
    compiler: &dyn BytecodeCompiler,
    modules: &[SourceModule],
    report: &mut BuildReport,
) -> miette::Result<Vec<CompiledObject>> {
    let mut objects = Vec::with_capacity(modules.len());
    // Object name -> module that claimed it. `a/b.lua` and `a.b.lua` flatten alike.
    let mut claimed: HashMap<String, &str> = HashMap::new();
    for (index, module) in modules.iter().enumerate() {
        let object_name = module.object_name();
        if let Some(first) = claimed.get(&object_name) {
            let message = format!("object name '{object_name}' already used by '{first}'");
            tracing::warn!("skipping {}: {message}", module.relative);
            progress::status_warn(
                "Warning",
                &format!("Skipping '{}': {message}", module.relative),
            );
            report.warnings.push(CompileWarning {
                module: module.relative.clone(),
                message,
            });
            continue;
        }
        claimed.insert(object_name.clone(), &module.relative);

        progress::status("Compiling", &module.relative);
        let output = plan.obj_dir.join(object_name);
        let status = compiler.compile(
            Path::new(&module.relative),
            &output,
            &plan.source_dir,
            plan.release,
        )?;
        if status.success {
            report.compiled.push(module.relative.clone());
            objects.push(CompiledObject { index, path: output });
        } else {
            tracing::warn!("failed to compile {}: {}", module.relative, status.message);
            progress::status_warn(
                "Warning",
                &format!("An error occurred compiling '{}'. Trying to finish anyway...", module.relative),
            );
            report.warnings.push(CompileWarning {
                module: module.relative.clone(),
                message: status.message,
            });
        }
    }
    Ok(objects)
}

fn bundle_objects(
    plan: &BuildPlan,
    compiler: &dyn BytecodeCompiler,
    objects: &[CompiledObject],
) -> miette::Result<Option<PathBuf>> {
    if objects.is_empty() {
        tracing::warn!("nothing compiled, skipping bundle");
        return Ok(None);
    }
    let inputs: Vec<PathBuf> = objects.iter().map(|o| o.path.clone()).collect();
    let output = plan.output_dir.join(plan.bundle_name());
    progress::status("Bundling", &format!("{} modules into {}", inputs.len(), plan.bundle_name()));
    let status = compiler.bundle(&inputs, &output, &plan.source_dir, plan.release)?;
    if !status.success {
        return Err(LubberError::Compilation {
            message: format!("bundling into {} failed: {}", plan.bundle_name(), status.message),
        }
        .into());
    }
    Ok(Some(output))
}

fn copy_objects(plan: &BuildPlan, objects: &[CompiledObject]) -> miette::Result<Vec<PathBuf>> {
    let mut outputs = Vec::with_capacity(objects.len());
    for object in objects {
        let name = if plan.shorten_names {
            format!("{}.luac", short_name(object.index))
        } else {
            object
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let target = plan.output_dir.join(name);
        std::fs::copy(&object.path, &target).map_err(LubberError::Io)?;
        outputs.push(target);
    }
    Ok(outputs)
}
