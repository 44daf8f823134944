use std::fmt;
use std::sync::Arc;

use turin_core::{PackageName, QualifiedName};

use crate::type_definition::TypeDefinition;

/// Uniform producer of type definitions from a backing source (spec.md
/// §4.1). Providers are pure lookups: they never mutate state visible to a
/// caller, though they may populate an internal cache on first access.
pub trait TypeProvider: fmt::Debug + Send + Sync {
    fn find_type_definition(&self, name: &QualifiedName) -> Option<TypeDefinition>;
    fn has_package(&self, name: &PackageName) -> bool;
}

/// An ordered stack of providers with first-hit-wins semantics (spec.md
/// §4.1, §4.2 composition protocol), used as the "universe" handed to
/// `TypeDefinition` operations that need to resolve an ancestor or peer
/// type by name.
#[derive(Debug, Clone)]
pub struct ComposedProvider {
    children: Vec<Arc<dyn TypeProvider>>,
}

impl ComposedProvider {
    pub fn new(children: Vec<Arc<dyn TypeProvider>>) -> Self {
        Self { children }
    }
}

impl TypeProvider for ComposedProvider {
    #[tracing::instrument(level = "trace", skip(self), fields(children = self.children.len()))]
    fn find_type_definition(&self, name: &QualifiedName) -> Option<TypeDefinition> {
        for child in &self.children {
            let hit = child.find_type_definition(name);
            tracing::trace!(provider = ?child, name = %name, hit = hit.is_some(), "consulted child provider");
            if hit.is_some() {
                return hit;
            }
        }
        None
    }

    fn has_package(&self, name: &PackageName) -> bool {
        self.children.iter().any(|child| child.has_package(name))
    }
}
