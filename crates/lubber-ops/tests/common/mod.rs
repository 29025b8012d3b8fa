#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use lubber_compiler::backend::BytecodeCompiler;
use lubber_compiler::unit::CompileStatus;
use lubber_resolver::dependency::Dependency;
use lubber_resolver::provider::Resolver;
use lubber_resolver::registry::ResolverRegistry;
use lubber_resolver::version::VersionRange;
use semver::Version;
use tempfile::TempDir;

/// Stands in for the engine resolver: offers `sm64coopdx` at fixed versions
/// and writes a marker file on install.
pub struct EngineResolver {
    versions: RefCell<Vec<Version>>,
    pub resolve_calls: Cell<usize>,
    pub fail_install: Cell<bool>,
}

impl EngineResolver {
    pub fn new(versions: &[&str]) -> Self {
        Self {
            versions: RefCell::new(versions.iter().map(|v| Version::parse(v).unwrap()).collect()),
            resolve_calls: Cell::new(0),
            fail_install: Cell::new(false),
        }
    }
}

impl Resolver for &'static EngineResolver {
    fn resolve(&self, name: &str, range: &VersionRange) -> miette::Result<Option<Dependency>> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        if name != "sm64coopdx" {
            return Ok(None);
        }
        let matching = self
            .versions
            .borrow()
            .iter()
            .filter(|v| range.matches(v))
            .cloned()
            .collect();
        Ok(Some(Dependency::new(name, matching)))
    }

    fn install(&self, dependency: &Dependency, destination: &Path) -> miette::Result<()> {
        if self.fail_install.get() {
            miette::bail!("HTTP 404 Not Found");
        }
        let version = dependency.selected().unwrap().to_string();
        std::fs::write(destination.join("installed.txt"), version).unwrap();
        Ok(())
    }
}

/// Leak a resolver so tests can keep inspecting it after registering it.
pub fn engine(versions: &[&str]) -> &'static EngineResolver {
    Box::leak(Box::new(EngineResolver::new(versions)))
}

pub fn registry(resolver: &'static EngineResolver) -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    registry.register("coop", resolver);
    registry
}

/// Compiles by copying sources; bundles by concatenation.
#[derive(Default)]
pub struct CopyCompiler {
    pub compiled: RefCell<Vec<String>>,
}

impl BytecodeCompiler for CopyCompiler {
    fn compile(&self, input: &Path, output: &Path, cwd: &Path, _strip: bool) -> miette::Result<CompileStatus> {
        self.compiled
            .borrow_mut()
            .push(input.to_string_lossy().into_owned());
        std::fs::copy(cwd.join(input), output).unwrap();
        Ok(CompileStatus::ok())
    }

    fn bundle(&self, inputs: &[PathBuf], output: &Path, _cwd: &Path, _strip: bool) -> miette::Result<CompileStatus> {
        let mut all = Vec::new();
        for input in inputs {
            all.extend(std::fs::read(input).unwrap());
        }
        std::fs::write(output, all).unwrap();
        Ok(CompileStatus::ok())
    }
}

pub const VALID_MANIFEST: &str = r#"
[mod]
name = "star-road"
version = "0.1.0"
authors = ["Skelux"]

[dependencies]
sm64coopdx = ">=1.0.0"
"#;

pub fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("lubber.toml"), manifest).unwrap();
    tmp
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
