use std::collections::HashMap;
use std::sync::Arc;

use turin_ast::{Ast, TopLevelDecl};
use turin_core::{Name, PackageName, QualifiedName};

use crate::provider::TypeProvider;
use crate::source::SourceTypeDefinition;
use crate::type_definition::TypeDefinition;

/// Indexes the type declarations of one or more compilation units by their
/// qualified name (spec.md §4.1). Construction is the only place a
/// `TypeDefinitionError` from a malformed source type can surface; after
/// that, lookups are infallible cache hits or misses like every other
/// provider.
#[derive(Debug)]
pub struct InSourceProvider {
    by_name: HashMap<QualifiedName, TypeDefinition>,
    namespaces: Vec<QualifiedName>,
}

impl InSourceProvider {
    pub fn from_asts(asts: &[Ast]) -> crate::Result<Self> {
        let mut by_name = HashMap::new();
        let mut namespaces = Vec::new();

        for ast in asts {
            namespaces.push(ast.compilation_unit.namespace.clone());
            for decl in &ast.compilation_unit.top_level {
                let TopLevelDecl::TypeDef(type_def_id) = decl else {
                    continue;
                };
                let type_def = &ast.type_defs[*type_def_id];
                let qualified_name = ast.compilation_unit.qualify(type_def.simple_name.as_str());
                let source = SourceTypeDefinition::from_ast(type_def, qualified_name.clone(), ast)?;
                by_name.insert(qualified_name, TypeDefinition::Source(Arc::new(source)));
            }
        }

        Ok(Self { by_name, namespaces })
    }

    pub fn from_ast(ast: &Ast) -> crate::Result<Self> {
        Self::from_asts(std::slice::from_ref(ast))
    }
}

impl TypeProvider for InSourceProvider {
    #[tracing::instrument(level = "trace", skip(self))]
    fn find_type_definition(&self, name: &QualifiedName) -> Option<TypeDefinition> {
        self.by_name.get(name).cloned()
    }

    fn has_package(&self, name: &PackageName) -> bool {
        self.namespaces.iter().any(|ns| ns == &QualifiedName::from_dotted(name.to_dotted()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turin_ast::{CompilationUnit, PrimitiveType, PropertyDefinition, PropertyNode, TypeDef, TypeDefKind, TypeUsage};
    use turin_core::{FileId, TextRange, TextSize};

    fn range() -> TextRange {
        TextRange::new(TextSize::from(0), TextSize::from(1))
    }

    fn point_ast() -> Ast {
        let compilation_unit = CompilationUnit {
            file: FileId::from_raw(0),
            namespace: QualifiedName::from_dotted("demo"),
            top_level: Vec::new(),
        };
        let mut ast = Ast::new(compilation_unit);

        let x = ast.properties.alloc(PropertyNode::Definition(PropertyDefinition {
            name: Name::from("x"),
            declared_type: TypeUsage::Primitive(PrimitiveType::Int),
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
    fn indexes_top_level_type_defs_by_qualified_name() {
        let ast = point_ast();
        let provider = InSourceProvider::from_ast(&ast).unwrap();
        let found = provider.find_type_definition(&QualifiedName::from_dotted("demo.Point"));
        assert!(found.is_some());
        assert!(provider.find_type_definition(&QualifiedName::from_dotted("demo.Missing")).is_none());
    }

    #[test]
    fn has_package_matches_declared_namespaces() {
        let ast = point_ast();
        let provider = InSourceProvider::from_ast(&ast).unwrap();
        assert!(provider.has_package(&PackageName::from_dotted("demo")));
        assert!(!provider.has_package(&PackageName::from_dotted("other")));
    }
}
