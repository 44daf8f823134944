//! The composable Symbol Resolver (spec.md §4.2): a thin name-resolution
//! layer over the Type Definition Model in `turin_types`, built the same
//! way that model's own providers compose -- ordered children, first-hit
//! wins, deterministic shadowing.

mod call_site;
mod error;
mod in_source;
mod jdk;
mod resolver;

use std::sync::Arc;

pub use call_site::CallSite;
pub use error::{ResolveError, Result};
pub use in_source::InSourceResolver;
pub use jdk::JdkResolver;
pub use resolver::{ComposedResolver, SymbolResolver};

use turin_ast::Ast;
use turin_types::{ComposedProvider, InSourceProvider, ReflectiveProvider, TypeProvider};

/// Builds the seed composition from spec.md §8: an in-source scope over
/// `ast` shadowing the platform (JDK reflection) scope, both backed by one
/// shared universe so ancestor walks that cross from source into the
/// platform (or vice versa) still see every registered type.
pub fn standard_resolver(ast: &Ast) -> Result<ComposedResolver> {
    let in_source_provider = Arc::new(InSourceProvider::from_ast(ast)?);
    let reflective_provider = Arc::new(ReflectiveProvider::new());
    let universe: Arc<dyn TypeProvider> = Arc::new(ComposedProvider::new(vec![in_source_provider, reflective_provider]));

    let in_source = Arc::new(InSourceResolver::new(ast, universe.clone())?);
    let jdk = Arc::new(JdkResolver::new(universe));

    Ok(ComposedResolver::new(vec![in_source, jdk]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use turin_ast::{CompilationUnit, PropertyDefinition, PropertyNode, TopLevelDecl, TypeDef, TypeDefKind, TypeUsage};
    use turin_core::{FileId, Name, QualifiedName, TextRange, TextSize};
    use turin_types::CompilerOptions;

    fn range() -> TextRange {
        TextRange::new(TextSize::from(0), TextSize::from(1))
    }

    /// `class Point extends Object { int x; }` wired against the standard
    /// seed composition (spec.md §8): the in-source scope shadows the JDK
    /// scope, but ancestor resolution still reaches `java.lang.Object`
    /// through the shared universe.
    fn point_ast() -> Ast {
        let mut ast = Ast::new(CompilationUnit {
            file: FileId::from_raw(0),
            namespace: QualifiedName::from_dotted("demo"),
            top_level: Vec::new(),
        });
        let x = ast.properties.alloc(PropertyNode::Definition(PropertyDefinition {
            name: Name::from("x"),
            declared_type: TypeUsage::Primitive(turin_ast::PrimitiveType::Int),
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
    fn in_source_scope_shadows_the_platform_scope() {
        let ast = point_ast();
        let resolver = standard_resolver(&ast).unwrap();

        let point = resolver
            .find_type_definition(&ast, "demo.Point", turin_ast::NodeRef::CompilationUnit)
            .expect("declared in-source");
        assert!(matches!(point, turin_types::TypeDefinition::Source(_)));

        let object = resolver
            .find_type_definition(&ast, "java.lang.Object", turin_ast::NodeRef::CompilationUnit)
            .expect("falls through to the platform scope");
        assert_eq!(object.qualified_name().to_dotted(), "java.lang.Object");

        let options = CompilerOptions::default();
        let ancestors = point.ancestors(
            &ComposedProvider::new(vec![
                Arc::new(InSourceProvider::from_ast(&ast).unwrap()),
                Arc::new(ReflectiveProvider::new()),
            ]),
            &options,
        );
        assert_eq!(ancestors.last().unwrap().as_reference_name().unwrap().to_dotted(), "java.lang.Object");
    }

    #[test]
    fn unresolved_name_is_absent_everywhere() {
        let ast = point_ast();
        let resolver = standard_resolver(&ast).unwrap();
        assert!(resolver
            .find_type_definition(&ast, "demo.Nonexistent", turin_ast::NodeRef::CompilationUnit)
            .is_none());
    }
}
