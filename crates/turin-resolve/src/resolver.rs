use std::fmt;
use std::sync::Arc;

use turin_ast::{Ast, NodeRef, PropertyDefinition, TypeUsage};
use turin_classfile::MethodDescriptor;
use turin_core::PackageName;
use turin_types::{CompilerOptions, Symbol, TypeDefinition, TypeProvider};

use crate::call_site::CallSite;
use crate::error::Result;

/// The composition layer (spec.md §4.2): given a name and a syntactic
/// context, resolves it to a property definition, a type definition, a type
/// usage, a symbol, or a callable signature. Resolvers compose by ordered
/// delegation with first-hit-wins semantics, exactly like `TypeProvider`
/// (`turin_types::ComposedProvider`) one layer down -- a `SymbolResolver`
/// is itself usually backed by one.
pub trait SymbolResolver: fmt::Debug + Send + Sync {
    /// Resolves a property reference against the peer declaration it names
    /// (spec.md §3 "materialized... by resolving the reference against a
    /// peer declaration").
    fn find_definition(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<PropertyDefinition>;

    /// Resolves a name to a type definition. Context matters for
    /// unqualified names: a leaf resolver may qualify `name` against its
    /// own namespace (the in-source resolver against the compilation
    /// unit's namespace, the platform resolver against `java.lang`) before
    /// trying a direct lookup.
    fn find_type_definition(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<TypeDefinition>;

    fn find_type_usage(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<TypeUsage> {
        self.find_type_definition(ast, name, context)
            .map(|def| TypeUsage::reference(def.qualified_name().clone()))
    }

    /// Descriptor-keyed method lookup for an already-overload-resolved call
    /// (spec.md §4.2, §4.3.5).
    fn find_jvm_definition(&self, ast: &Ast, call: &CallSite, context: NodeRef, options: &CompilerOptions) -> Result<Option<MethodDescriptor>>;

    fn find_symbol(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<Symbol>;

    fn has_package(&self, name: &PackageName) -> bool;
}

/// An ordered stack of child resolvers with first-hit-wins semantics
/// (spec.md §4.2 "Composition protocol"). Narrower scopes go first: placing
/// the in-source resolver ahead of the platform resolver realizes
/// "innermost first" shadowing without any extra machinery.
///
/// `parent` exists for protocol fidelity ("every child is informed of its
/// parent at composition time... used only to walk outward when a lookup
/// fails locally") but is unused by any resolver in this crate: this AST
/// model has exactly one declaration scope (the compilation unit), so there
/// is nothing below the top-level composed resolver to walk outward to.
#[derive(Debug, Clone)]
pub struct ComposedResolver {
    children: Vec<Arc<dyn SymbolResolver>>,
    parent: Option<Arc<dyn SymbolResolver>>,
}

impl ComposedResolver {
    pub fn new(children: Vec<Arc<dyn SymbolResolver>>) -> Self {
        Self { children, parent: None }
    }

    pub fn with_parent(children: Vec<Arc<dyn SymbolResolver>>, parent: Arc<dyn SymbolResolver>) -> Self {
        Self { children, parent: Some(parent) }
    }
}

impl SymbolResolver for ComposedResolver {
    #[tracing::instrument(level = "trace", skip(self, ast), fields(children = self.children.len()))]
    fn find_definition(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<PropertyDefinition> {
        for child in &self.children {
            if let Some(hit) = child.find_definition(ast, name, context) {
                return Some(hit);
            }
        }
        self.parent.as_ref().and_then(|p| p.find_definition(ast, name, context))
    }

    #[tracing::instrument(level = "trace", skip(self, ast), fields(children = self.children.len()))]
    fn find_type_definition(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<TypeDefinition> {
        for child in &self.children {
            let hit = child.find_type_definition(ast, name, context);
            tracing::trace!(resolver = ?child, name, hit = hit.is_some(), "consulted child resolver");
            if hit.is_some() {
                return hit;
            }
        }
        self.parent.as_ref().and_then(|p| p.find_type_definition(ast, name, context))
    }

    fn find_jvm_definition(&self, ast: &Ast, call: &CallSite, context: NodeRef, options: &CompilerOptions) -> Result<Option<MethodDescriptor>> {
        for child in &self.children {
            if let Some(hit) = child.find_jvm_definition(ast, call, context, options)? {
                return Ok(Some(hit));
            }
        }
        match &self.parent {
            Some(p) => p.find_jvm_definition(ast, call, context, options),
            None => Ok(None),
        }
    }

    fn find_symbol(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<Symbol> {
        for child in &self.children {
            if let Some(hit) = child.find_symbol(ast, name, context) {
                return Some(hit);
            }
        }
        self.parent.as_ref().and_then(|p| p.find_symbol(ast, name, context))
    }

    fn has_package(&self, name: &PackageName) -> bool {
        self.children.iter().any(|child| child.has_package(name)) || self.parent.as_ref().is_some_and(|p| p.has_package(name))
    }
}

/// Forwards `CallSite::owner` through whatever `SymbolResolver` already
/// composes over, then delegates to `TypeDefinition::find_method_by_descriptors`.
/// Shared by every resolver in this crate.
pub(crate) fn resolve_call_site(
    owner: Option<TypeDefinition>,
    call: &CallSite,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
) -> Result<Option<MethodDescriptor>> {
    let Some(owner) = owner else {
        return Err(crate::error::ResolveError::UnresolvedName {
            name: call.owner.to_dotted(),
        });
    };
    match owner.find_method_by_descriptors(call.name.as_str(), &call.jvm_param_types, call.static_context, universe, options) {
        Ok(descriptor) => Ok(Some(descriptor)),
        Err(turin_types::TypeDefinitionError::InternalError { .. }) => Ok(None),
        Err(other) => Err(other.into()),
    }
}
