//! Diff a freshly resolved set against the persisted lock.

use std::collections::BTreeMap;

use lubber_core::lockfile::{LockedDependency, Lockfile};
use lubber_util::hash::sha256_bytes;

use crate::dependency::Dependency;
use crate::graph::ResolvedSet;

/// Content hash stored in the lock for the given raw manifest bytes.
pub fn project_hash(manifest_bytes: &[u8]) -> String {
    sha256_bytes(manifest_bytes)
}

/// True when the lock was produced from exactly these manifest bytes.
pub fn is_up_to_date(lock: &Lockfile, hash: &str) -> bool {
    !lock.project_hash.is_empty() && lock.project_hash == hash
}

/// A lock entry whose artifacts must be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleDependency {
    pub name: String,
    pub locked: LockedDependency,
}

/// Minimal set of changes to go from the lock to the resolved set.
#[derive(Debug, Default)]
pub struct ReconcilePlan<'a> {
    pub to_install: Vec<&'a Dependency>,
    pub to_remove: Vec<StaleDependency>,
}

impl ReconcilePlan<'_> {
    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute what to install and what to remove.
///
/// A dependency whose selected version or provider changed appears in both
/// lists: the old artifacts go, the new ones come in.
pub fn reconcile<'a>(resolved: &'a ResolvedSet, lock: &Lockfile) -> ReconcilePlan<'a> {
    let mut plan = ReconcilePlan::default();

    for (name, dep) in resolved {
        match lock.dependencies.get(name) {
            None => plan.to_install.push(dep),
            Some(locked) if drifted(dep, locked) => {
                plan.to_install.push(dep);
                plan.to_remove.push(StaleDependency {
                    name: name.clone(),
                    locked: locked.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for (name, locked) in &lock.dependencies {
        if !resolved.contains_key(name) {
            plan.to_remove.push(StaleDependency {
                name: name.clone(),
                locked: locked.clone(),
            });
        }
    }
    plan.to_remove.sort_by(|a, b| a.name.cmp(&b.name));

    plan
}

fn drifted(dep: &Dependency, locked: &LockedDependency) -> bool {
    let version = dep.selected().map(|v| v.to_string()).unwrap_or_default();
    version != locked.version || dep.provided_by != locked.provided_by
}

/// Lock entries describing the selected version of every resolved dependency.
pub fn locked_entries(resolved: &ResolvedSet) -> BTreeMap<String, LockedDependency> {
    resolved
        .iter()
        .filter_map(|(name, dep)| {
            dep.selected().map(|v| {
                (
                    name.clone(),
                    LockedDependency {
                        version: v.to_string(),
                        provided_by: dep.provided_by.clone(),
                    },
                )
            })
        })
        .collect()
}
