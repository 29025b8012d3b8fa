//! The bytecode compiler interface.
//!
//! The pipeline only talks to [`BytecodeCompiler`], so the `luac` backend can
//! be swapped for another implementation (or a test double) without touching
//! the build steps.

use std::path::{Path, PathBuf};

use crate::unit::CompileStatus;

pub trait BytecodeCompiler {
    /// Compile one source file to `output`. `input` is relative to `cwd`.
    /// A non-success status is a per-module failure, not an error.
    fn compile(&self, input: &Path, output: &Path, cwd: &Path, strip: bool)
        -> miette::Result<CompileStatus>;

    /// Combine already compiled chunks, in order, into one file.
    fn bundle(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        cwd: &Path,
        strip: bool,
    ) -> miette::Result<CompileStatus>;
}
