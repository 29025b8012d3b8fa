//! Ordered mapping from resolver identifier to resolver.

use lubber_core::config::RemoteConfig;

use crate::coop::{CoopResolver, COOP_ID};
use crate::provider::Resolver;

/// Resolvers in query order. Built once per operation and passed by reference.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: Vec<(String, Box<dyn Resolver>)>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in resolvers: `coop` for the game engine interface files.
    pub fn with_defaults(remote: &RemoteConfig) -> miette::Result<Self> {
        let mut registry = Self::new();
        registry.register(COOP_ID, CoopResolver::new(remote)?);
        Ok(registry)
    }

    /// Append a resolver, or replace the one already registered under `id`
    /// while keeping its position.
    pub fn register(&mut self, id: impl Into<String>, resolver: impl Resolver + 'static) -> &mut Self {
        let id = id.into();
        let boxed: Box<dyn Resolver> = Box::new(resolver);
        match self.resolvers.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = boxed,
            None => self.resolvers.push((id, boxed)),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&dyn Resolver> {
        self.resolvers
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, r)| r.as_ref())
    }

    /// Resolvers in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Resolver)> {
        self.resolvers.iter().map(|(id, r)| (id.as_str(), r.as_ref()))
    }
}
