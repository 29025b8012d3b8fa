use std::path::Path;

use lubber_ops::ops_restore::{restore, RestoreOutcome};
use lubber_util::errors::LubberError;
use miette::Result;

pub fn exec(project_dir: &Path) -> Result<()> {
    match restore(project_dir)? {
        RestoreOutcome::UpToDate => {
            println!("Dependencies are up to date");
            Ok(())
        }
        RestoreOutcome::Restored { installed, removed } => {
            for name in &removed {
                println!("  - {name}");
            }
            for name in &installed {
                println!("  + {name}");
            }
            println!("Project restored");
            Ok(())
        }
        RestoreOutcome::Invalid { errors } => Err(LubberError::Validation {
            message: format!("{errors} problem(s) in {}", lubber_core::MANIFEST_FILE),
        }
        .into()),
    }
}
