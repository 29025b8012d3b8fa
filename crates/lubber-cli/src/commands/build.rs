use std::path::Path;

use lubber_ops::ops_build::{build, BuildOptions};
use miette::Result;

pub fn exec(project_dir: &Path, release: bool) -> Result<()> {
    let report = build(project_dir, BuildOptions { release })?;
    for warning in &report.warnings {
        tracing::debug!("{}: {}", warning.module, warning.message);
    }
    println!(
        "Built {} module(s), {} output file(s), {} asset(s)",
        report.compiled.len(),
        report.outputs.len(),
        report.assets.len()
    );
    Ok(())
}
