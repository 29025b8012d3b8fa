//! The resolver plugin interface.
//!
//! A resolver knows how to list the versions it can supply for a name and how
//! to put a chosen version on disk. Adding a new source of dependencies means
//! implementing [`Resolver`] and registering it in a
//! [`ResolverRegistry`](crate::registry::ResolverRegistry); the graph
//! algorithm does not change.

use std::path::Path;

use crate::dependency::Dependency;
use crate::version::VersionRange;

pub trait Resolver {
    /// Return the candidates this resolver offers for `name` within `range`,
    /// or `None` when the name is not one it provides.
    fn resolve(&self, name: &str, range: &VersionRange) -> miette::Result<Option<Dependency>>;

    /// Write the selected version of `dependency` into `destination`, which
    /// already exists and is empty.
    fn install(&self, dependency: &Dependency, destination: &Path) -> miette::Result<()>;
}
