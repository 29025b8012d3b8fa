//! Lua mod build pipeline.
//!
//! Turns a project source tree into a distributable output directory:
//! discovers `.lua` modules, compiles each with an external bytecode
//! compiler, packages the results as one bundle or many files, and stages
//! assets for the selected profile.

pub mod assets;
pub mod backend;
pub mod discovery;
pub mod luac;
pub mod naming;
pub mod pipeline;
pub mod unit;
