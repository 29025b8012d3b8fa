//! Single-pass transitive resolution with version-set intersection.
//!
//! Each dependency name is resolved once by the first resolver that offers
//! it; every later reference to the same name only narrows the candidate set.
//! There is no backtracking: if a later range empties the set, resolution
//! fails and reports the two ranges that disagree.

use std::collections::BTreeMap;

use lubber_core::dependency::DependencyRef;

use crate::dependency::{Dependency, Requirement};
use crate::error::ResolutionError;
use crate::registry::ResolverRegistry;
use crate::version::{normalize_range, VersionRange};

/// Final flat mapping from dependency name to its resolved record.
pub type ResolvedSet = BTreeMap<String, Dependency>;

/// State threaded through one resolve call.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    /// Consumers currently being expanded, root first. No name appears twice.
    pub stack: Vec<String>,
    pub resolved: ResolvedSet,
}

impl ResolutionContext {
    pub fn new(root: &str) -> Self {
        Self {
            stack: vec![root.to_string()],
            resolved: ResolvedSet::new(),
        }
    }

    fn consumer(&self) -> String {
        self.stack.last().cloned().unwrap_or_default()
    }
}

/// Resolve the root project's declared dependencies and everything they rely
/// on into a flat set.
pub fn resolve(
    root: &str,
    dependencies: &BTreeMap<String, String>,
    registry: &ResolverRegistry,
) -> Result<ResolvedSet, ResolutionError> {
    let mut ctx = ResolutionContext::new(root);
    for (name, range) in dependencies {
        ctx = resolve_requirement(ctx, &Requirement::new(name, range), registry)?;
    }
    tracing::debug!("resolved {} dependencies for {root}", ctx.resolved.len());
    Ok(ctx.resolved)
}

/// Resolve one reference made by the consumer on top of the stack, returning
/// the updated context.
pub fn resolve_requirement(
    mut ctx: ResolutionContext,
    requirement: &Requirement,
    registry: &ResolverRegistry,
) -> Result<ResolutionContext, ResolutionError> {
    let reference = DependencyRef::parse(&requirement.name);
    let consumer = ctx.consumer();
    let raw_range = normalize_range(&requirement.version_range);
    let range = VersionRange::parse(&raw_range).map_err(|message| ResolutionError::InvalidRange {
        name: reference.name.clone(),
        range: requirement.version_range.clone(),
        message,
        consumer: consumer.clone(),
        chain: ctx.stack.clone(),
    })?;

    let mut dependency = match ctx.resolved.remove(&reference.name) {
        Some(mut existing) => {
            if let Some(provider) = &reference.provider {
                if *provider != existing.provided_by {
                    return Err(ResolutionError::ProviderConflict {
                        name: reference.name,
                        existing_provider: existing.provided_by.clone(),
                        existing_consumer: existing.needed_by.first().cloned().unwrap_or_default(),
                        requested_provider: provider.clone(),
                        consumer,
                        chain: ctx.stack,
                    });
                }
            }
            existing.retain_matching(&range);
            existing.version_ranges.push(raw_range.clone());
            if existing.versions.is_empty() {
                let n = existing.version_ranges.len();
                let previous = existing.version_ranges[..n - 1]
                    .last()
                    .cloned()
                    .unwrap_or_default();
                return Err(ResolutionError::IncompatibleRange {
                    name: reference.name,
                    range: raw_range,
                    previous,
                    consumer,
                    chain: ctx.stack,
                });
            }
            existing
        }
        None => {
            let mut found = lookup(registry, &reference, &range, &consumer, &ctx.stack)?;
            found.sort_versions();
            found.retain_matching(&range);
            found.version_ranges.push(raw_range.clone());
            if found.versions.is_empty() {
                return Err(ResolutionError::NoMatchingVersion {
                    name: reference.name,
                    range: raw_range,
                    consumer,
                    chain: ctx.stack,
                });
            }
            tracing::debug!("{found} provided by '{}'", found.provided_by);
            found
        }
    };

    if !dependency.needed_by.contains(&consumer) {
        dependency.needed_by.push(consumer);
    }

    let relies_on = dependency.relies_on.clone();
    let name = dependency.name.clone();
    ctx.resolved.insert(name.clone(), dependency);

    if !relies_on.is_empty() {
        if ctx.stack.contains(&name) {
            let mut chain = ctx.stack;
            chain.push(name);
            return Err(ResolutionError::Cycle { chain });
        }
        ctx.stack.push(name);
        for nested in &relies_on {
            ctx = resolve_requirement(ctx, nested, registry)?;
        }
        ctx.stack.pop();
    }

    Ok(ctx)
}

/// Find the resolver that supplies `reference`.
///
/// A pinned provider is the only one asked. Otherwise resolvers are asked in
/// registration order and the first non-empty answer wins.
fn lookup(
    registry: &ResolverRegistry,
    reference: &DependencyRef,
    range: &VersionRange,
    consumer: &str,
    stack: &[String],
) -> Result<Dependency, ResolutionError> {
    let provider_error = |provider: &str, err: miette::Report| ResolutionError::Provider {
        provider: provider.to_string(),
        name: reference.name.clone(),
        message: err.to_string(),
        chain: stack.to_vec(),
    };

    let candidates: Vec<(&str, &dyn crate::provider::Resolver)> = match &reference.provider {
        Some(id) => match registry.get(id) {
            Some(resolver) => vec![(id.as_str(), resolver)],
            None => {
                return Err(ResolutionError::UnknownProvider {
                    provider: id.clone(),
                    name: reference.name.clone(),
                    consumer: consumer.to_string(),
                    chain: stack.to_vec(),
                })
            }
        },
        None => registry.iter().collect(),
    };

    let mut answered = false;
    for (id, resolver) in candidates {
        let answer = resolver
            .resolve(&reference.name, range)
            .map_err(|e| provider_error(id, e))?;
        match answer {
            Some(mut dep) if !dep.versions.is_empty() => {
                dep.name = reference.name.clone();
                dep.provided_by = id.to_string();
                return Ok(dep);
            }
            Some(_) => answered = true,
            None => {}
        }
    }

    if answered {
        Err(ResolutionError::NoMatchingVersion {
            name: reference.name.clone(),
            range: range.to_string(),
            consumer: consumer.to_string(),
            chain: stack.to_vec(),
        })
    } else {
        Err(ResolutionError::NotFound {
            name: reference.name.clone(),
            consumer: consumer.to_string(),
            chain: stack.to_vec(),
        })
    }
}
