use std::sync::Arc;

use turin_ast::{Ast, NodeRef, PropertyDefinition};
use turin_classfile::MethodDescriptor;
use turin_core::PackageName;
use turin_types::{ArchiveProvider, CompilerOptions, ReflectiveProvider, Symbol, TypeDefinition, TypeProvider};

use crate::call_site::CallSite;
use crate::error::Result;
use crate::resolver::{resolve_call_site, SymbolResolver};

/// The platform scope (spec.md §4.2, §4.3.1): `java.lang`/`java.util` types
/// resolved via runtime reflection, plus an optional stack of archive
/// classpath entries. Never has a `find_definition` to offer -- only source
/// declarations carry `PropertyReference` nodes -- and never introduces a
/// property symbol either, since external types only expose fields through
/// `TypeDefinition::find_symbol`'s direct property scan, which needs no
/// syntactic context.
#[derive(Debug)]
pub struct JdkResolver {
    reflective: Arc<ReflectiveProvider>,
    archives: Vec<Arc<ArchiveProvider>>,
    universe: Arc<dyn TypeProvider>,
}

impl JdkResolver {
    pub fn new(universe: Arc<dyn TypeProvider>) -> Self {
        Self {
            reflective: Arc::new(ReflectiveProvider::new()),
            archives: Vec::new(),
            universe,
        }
    }

    pub fn with_archives(universe: Arc<dyn TypeProvider>, archives: Vec<Arc<ArchiveProvider>>) -> Self {
        Self {
            reflective: Arc::new(ReflectiveProvider::new()),
            archives,
            universe,
        }
    }

    fn find(&self, name: &str) -> Option<TypeDefinition> {
        let qualified = turin_core::QualifiedName::from_dotted(name);
        if let Some(hit) = self.reflective.find_type_definition(&qualified) {
            return Some(hit);
        }
        self.archives.iter().find_map(|archive| archive.find_type_definition(&qualified))
    }
}

impl SymbolResolver for JdkResolver {
    fn find_definition(&self, _ast: &Ast, _name: &str, _context: NodeRef) -> Option<PropertyDefinition> {
        None
    }

    fn find_type_definition(&self, _ast: &Ast, name: &str, _context: NodeRef) -> Option<TypeDefinition> {
        self.find(name)
    }

    fn find_jvm_definition(&self, _ast: &Ast, call: &CallSite, _context: NodeRef, options: &CompilerOptions) -> Result<Option<MethodDescriptor>> {
        let owner = self.find(&call.owner.to_dotted());
        resolve_call_site(owner, call, self.universe.as_ref(), options)
    }

    fn find_symbol(&self, _ast: &Ast, _name: &str, _context: NodeRef) -> Option<Symbol> {
        None
    }

    fn has_package(&self, name: &PackageName) -> bool {
        self.reflective.has_package(name) || self.archives.iter().any(|archive| archive.has_package(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turin_types::ComposedProvider;

    #[test]
    fn resolves_well_known_platform_types_by_dotted_name() {
        let reflective: Arc<dyn TypeProvider> = Arc::new(ReflectiveProvider::new());
        let universe: Arc<dyn TypeProvider> = Arc::new(ComposedProvider::new(vec![reflective]));
        let resolver = JdkResolver::new(universe);
        let ast = turin_ast::Ast::new(turin_ast::CompilationUnit {
            file: turin_core::FileId::from_raw(0),
            namespace: turin_core::QualifiedName::from_dotted("demo"),
            top_level: Vec::new(),
        });

        assert!(resolver.find_type_definition(&ast, "java.lang.Object", NodeRef::CompilationUnit).is_some());
        assert!(resolver.find_type_definition(&ast, "demo.Nope", NodeRef::CompilationUnit).is_none());
        assert!(resolver.find_definition(&ast, "anything", NodeRef::CompilationUnit).is_none());
    }
}
