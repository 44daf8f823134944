use std::sync::Arc;

use turin_ast::{Ast, NodeRef, PropertyDefinition, PropertyNode};
use turin_classfile::MethodDescriptor;
use turin_core::{PackageName, QualifiedName};
use turin_types::{CompilerOptions, InSourceProvider, Symbol, TypeDefinition, TypeProvider};

use crate::call_site::CallSite;
use crate::error::Result;
use crate::resolver::{resolve_call_site, SymbolResolver};

/// The narrowest scope in the composition (spec.md §4.2): everything
/// declared in one set of compilation units. Holds its own
/// `turin_types::InSourceProvider` for direct lookups but is handed the
/// full composed universe for anything that needs to walk an ancestor
/// chain that might leave this scope (e.g. `Employee extends` a JDK type).
#[derive(Debug)]
pub struct InSourceResolver {
    provider: Arc<InSourceProvider>,
    universe: Arc<dyn TypeProvider>,
}

impl InSourceResolver {
    pub fn new(ast: &Ast, universe: Arc<dyn TypeProvider>) -> Result<Self> {
        Ok(Self {
            provider: Arc::new(InSourceProvider::from_ast(ast)?),
            universe,
        })
    }

    fn enclosing_type_def(ast: &Ast, context: NodeRef) -> Option<turin_ast::TypeDefId> {
        std::iter::once(context).chain(ast.ancestors(context)).find_map(|node| match node {
            NodeRef::TypeDef(id) => Some(id),
            _ => None,
        })
    }
}

impl SymbolResolver for InSourceResolver {
    /// Resolves `name` against whichever peer declaration in `ast` defines
    /// it, the same scan `SourceTypeDefinition::from_ast` itself runs over
    /// `PropertyReference` nodes (spec.md §3).
    fn find_definition(&self, ast: &Ast, name: &str, _context: NodeRef) -> Option<PropertyDefinition> {
        for (_, type_def) in ast.type_defs.iter() {
            for &prop_id in &type_def.properties {
                if let PropertyNode::Definition(def) = &ast.properties[prop_id] {
                    if def.name.as_str() == name {
                        return Some(def.clone());
                    }
                }
            }
        }
        None
    }

    /// Tries `name` as already-qualified first (so a fully-dotted name
    /// from another file still resolves through this provider's own
    /// cache), then qualifies it against this compilation unit's own
    /// namespace for the ordinary unqualified case.
    fn find_type_definition(&self, ast: &Ast, name: &str, _context: NodeRef) -> Option<TypeDefinition> {
        if let Some(hit) = self.provider.find_type_definition(&QualifiedName::from_dotted(name)) {
            return Some(hit);
        }
        let qualified = ast.compilation_unit.qualify(name);
        self.provider.find_type_definition(&qualified)
    }

    fn find_jvm_definition(&self, ast: &Ast, call: &CallSite, context: NodeRef, options: &CompilerOptions) -> Result<Option<MethodDescriptor>> {
        let owner = self.find_type_definition(ast, &call.owner.to_dotted(), context);
        resolve_call_site(owner, call, self.universe.as_ref(), options)
    }

    /// Walks `context`'s ancestor chain to find its enclosing type, then
    /// defers to `TypeDefinition::find_symbol` on that type (spec.md §4.2
    /// "Contextual search").
    fn find_symbol(&self, ast: &Ast, name: &str, context: NodeRef) -> Option<Symbol> {
        let type_def_id = Self::enclosing_type_def(ast, context)?;
        let type_def = &ast.type_defs[type_def_id];
        let qualified = ast.compilation_unit.qualify(type_def.simple_name.as_str());
        self.provider.find_type_definition(&qualified)?.find_symbol(name)
    }

    fn has_package(&self, name: &PackageName) -> bool {
        self.provider.has_package(name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use turin_ast::{CompilationUnit, PropertyDefinition, TopLevelDecl, TypeDef, TypeDefKind};
    use turin_core::{FileId, Name, TextRange, TextSize};
    use turin_types::ComposedProvider;

    use super::*;

    fn range() -> TextRange {
        TextRange::new(TextSize::from(0), TextSize::from(1))
    }

    fn point_ast() -> Ast {
        let mut ast = Ast::new(CompilationUnit {
            file: FileId::from_raw(0),
            namespace: QualifiedName::from_dotted("demo"),
            top_level: Vec::new(),
        });
        let x = ast.properties.alloc(PropertyNode::Definition(PropertyDefinition {
            name: Name::from("x"),
            declared_type: turin_ast::TypeUsage::Primitive(turin_ast::PrimitiveType::Int),
            initializer: None,
            default_value: None,
            range: range(),
        }));
        let type_def_id = ast.type_defs.alloc(TypeDef {
            kind: TypeDefKind::Class,
            simple_name: Name::from("Point"),
            type_variables: Vec::new(),
            base: None,
            implements: Vec::new(),
            annotations: Vec::new(),
            properties: vec![x],
            methods: Vec::new(),
            constructors: Vec::new(),
            range: range(),
        });
        ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_def_id));
        ast.rebuild_parent_links();
        ast
    }

    #[test]
    fn unqualified_name_resolves_against_own_namespace() {
        let ast = point_ast();
        let provider = Arc::new(InSourceProvider::from_ast(&ast).unwrap());
        let universe: Arc<dyn TypeProvider> = Arc::new(ComposedProvider::new(vec![provider.clone()]));
        let resolver = InSourceResolver::new(&ast, universe).unwrap();

        let context = NodeRef::CompilationUnit;
        assert!(resolver.find_type_definition(&ast, "Point", context).is_some());
        assert!(resolver.find_type_definition(&ast, "demo.Point", context).is_some());
        assert!(resolver.find_type_definition(&ast, "Nowhere", context).is_none());
    }

    #[test]
    fn find_symbol_walks_up_to_the_enclosing_type() {
        let ast = point_ast();
        let provider = Arc::new(InSourceProvider::from_ast(&ast).unwrap());
        let universe: Arc<dyn TypeProvider> = Arc::new(ComposedProvider::new(vec![provider.clone()]));
        let resolver = InSourceResolver::new(&ast, universe).unwrap();

        let (prop_id, _) = ast.properties.iter().next().unwrap();
        let context = NodeRef::Property(prop_id);
        assert!(resolver.find_symbol(&ast, "x", context).is_some());
        assert!(resolver.find_symbol(&ast, "y", context).is_none());
    }
}
