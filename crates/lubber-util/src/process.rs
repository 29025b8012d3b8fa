use std::path::PathBuf;
use std::process::{Command, Output};

use crate::errors::LubberError;

/// Builder for running an external tool such as `luac` and capturing its output.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append arguments in order.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child process from `dir`.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The command line as it would be executed, for logging.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command, wait for it, and return its output.
    pub fn exec(&self) -> Result<Output, LubberError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!("exec: {}", self.display());
        cmd.output().map_err(LubberError::from)
    }
}
