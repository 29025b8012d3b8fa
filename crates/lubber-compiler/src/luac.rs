//! `luac` invocation: `luac [-s] -o <output> <inputs...>`.

use std::path::{Path, PathBuf};

use lubber_util::errors::LubberError;
use lubber_util::process::CommandBuilder;

use crate::backend::BytecodeCompiler;
use crate::unit::CompileStatus;

/// Compiler backend that shells out to a `luac` executable.
pub struct LuacCompiler {
    exe: String,
}

impl LuacCompiler {
    /// `exe` is a bare name looked up on `PATH` or a path to the binary.
    pub fn new(exe: impl Into<String>) -> Self {
        Self { exe: exe.into() }
    }

    fn run(&self, inputs: &[String], output: &Path, cwd: &Path, strip: bool) -> miette::Result<CompileStatus> {
        let cmd = CommandBuilder::new(self.exe.clone())
            .args(luac_args(inputs, output, strip))
            .cwd(cwd);
        let out = cmd.exec().map_err(|e| LubberError::Toolchain {
            message: format!("Failed to execute {}: {e}", self.exe),
        })?;

        if out.status.success() {
            return Ok(CompileStatus::ok());
        }
        let stdout = String::from_utf8_lossy(&out.stdout);
        let stderr = String::from_utf8_lossy(&out.stderr);
        let mut message = format!("{stdout}\n{stderr}").trim().to_string();
        if message.is_empty() {
            message = format!("{} exited with {}", self.exe, out.status);
        }
        Ok(CompileStatus::failed(message))
    }
}

impl BytecodeCompiler for LuacCompiler {
    fn compile(&self, input: &Path, output: &Path, cwd: &Path, strip: bool) -> miette::Result<CompileStatus> {
        self.run(&[path_arg(input)], output, cwd, strip)
    }

    fn bundle(&self, inputs: &[PathBuf], output: &Path, cwd: &Path, strip: bool) -> miette::Result<CompileStatus> {
        let inputs: Vec<String> = inputs.iter().map(|p| path_arg(p)).collect();
        self.run(&inputs, output, cwd, strip)
    }
}

/// Argument list for one invocation.
pub fn luac_args(inputs: &[String], output: &Path, strip: bool) -> Vec<String> {
    let mut args = Vec::with_capacity(inputs.len() + 3);
    if strip {
        args.push("-s".to_string());
    }
    args.push("-o".to_string());
    args.push(path_arg(output));
    args.extend(inputs.iter().cloned());
    args
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
