//! Static checks over the Cache-Tag Graph.
//!
//! Tags are resolved against concrete arguments at runtime, but the templates
//! alone are enough to tell whether a mutation can ever reach a cached query.

use serde::Serialize;

use crate::api::endpoints::{EndpointDef, Registry};
use crate::model::TagTemplate;

/// A mutation template that no query in the registry provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingInvalidation {
    pub endpoint: &'static str,
    pub tag: String,
}

impl std::fmt::Display for DanglingInvalidation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} invalidates {} but no query provides it", self.endpoint, self.tag)
    }
}

/// Every invalidation template that can never match a provided tag.
/// An empty result means each mutation refreshes at least one query.
pub fn dangling_invalidations(registry: &Registry) -> Vec<DanglingInvalidation> {
    let provided: Vec<&TagTemplate> = registry.queries().flat_map(|q| q.provides.iter()).collect();

    let mut dangling = Vec::new();
    for mutation in registry.mutations() {
        for template in mutation.invalidates {
            if !provided.iter().any(|p| template.may_invalidate(p)) {
                log::warn!("{} invalidates {} which no query provides", mutation.name, template);
                dangling.push(DanglingInvalidation {
                    endpoint: mutation.name,
                    tag: template.to_string(),
                });
            }
        }
    }
    dangling
}

/// Queries whose provided templates include one matching `template`
pub fn providers_of<'r>(
    registry: &'r Registry,
    template: &'r TagTemplate,
) -> impl Iterator<Item = &'static EndpointDef> + 'r {
    registry
        .queries()
        .filter(move |q| q.provides.iter().any(|p| template.may_invalidate(p)))
}

/// Names of the queries a mutation may refresh, sorted
pub fn affected_queries(registry: &Registry, mutation: &EndpointDef) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = mutation
        .invalidates
        .iter()
        .flat_map(|template| providers_of(registry, template).map(|q| q.name).collect::<Vec<_>>())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
