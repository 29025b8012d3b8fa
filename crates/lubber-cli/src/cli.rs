//! CLI argument definitions for Lubber.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "lubber",
    version,
    about = "Dependency manager and build tool for sm64coopdx Lua mods"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify the path of the project
    #[arg(long, global = true, env = "LUBBER_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Restore the project, making sure all dependencies are met
    Restore,

    /// Build the mod
    Build {
        /// Strip debug info and ship only release assets
        #[arg(long)]
        release: bool,
    },

    /// Remove build output and compiled intermediates
    Clean,
}

pub fn parse() -> Cli {
    Cli::parse()
}
