#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lubber_resolver::dependency::{Dependency, Requirement};
use lubber_resolver::provider::Resolver;
use lubber_resolver::version::VersionRange;
use semver::Version;

/// In-memory resolver: name -> (available versions, requirements).
#[derive(Default)]
pub struct MemoryResolver {
    packages: BTreeMap<String, (Vec<Version>, Vec<Requirement>)>,
    pub installed: RefCell<Vec<(String, String, PathBuf)>>,
    pub fail_install: bool,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, name: &str, versions: &[&str], relies_on: &[(&str, &str)]) -> Self {
        let versions = versions.iter().map(|v| Version::parse(v).unwrap()).collect();
        let relies_on = relies_on
            .iter()
            .map(|(n, r)| Requirement::new(*n, *r))
            .collect();
        self.packages.insert(name.to_string(), (versions, relies_on));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_install = true;
        self
    }
}

impl Resolver for MemoryResolver {
    fn resolve(&self, name: &str, range: &VersionRange) -> miette::Result<Option<Dependency>> {
        Ok(self.packages.get(name).map(|(versions, relies_on)| {
            let matching = versions.iter().filter(|v| range.matches(v)).cloned().collect();
            Dependency::new(name, matching).with_relies_on(relies_on.clone())
        }))
    }

    fn install(&self, dependency: &Dependency, destination: &Path) -> miette::Result<()> {
        if self.fail_install {
            miette::bail!("simulated download failure");
        }
        let version = dependency.selected().unwrap().to_string();
        std::fs::write(destination.join("VERSION"), &version).unwrap();
        self.installed.borrow_mut().push((
            dependency.name.clone(),
            version,
            destination.to_path_buf(),
        ));
        Ok(())
    }
}

pub fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

pub fn deps(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(n, r)| (n.to_string(), r.to_string()))
        .collect()
}
