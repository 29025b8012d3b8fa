use std::path::Path;

use lubber_ops::ops_clean::{clean, CleanResult};
use miette::Result;

pub fn exec(project_dir: &Path) -> Result<()> {
    match clean(project_dir)? {
        CleanResult::Cleaned => println!("Cleaned build output"),
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }
    Ok(())
}
