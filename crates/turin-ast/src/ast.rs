use std::collections::HashMap;

use crate::arena::Arena;
use crate::compilation_unit::{CompilationUnit, TopLevelDecl};
use crate::ids::{ConstructorId, MethodId, NodeRef, ProgramEntryId, PropertyId, TypeDefId};
use crate::method::{ConstructorDef, MethodDef, ProgramEntry};
use crate::property::PropertyNode;
use crate::type_def::TypeDef;

/// Owns every declaration-level node of a single compilation unit.
///
/// Children never own their parent (spec.md §3 Ownership); the parent
/// relationship is reconstructed as a sidecar map rather than stored as a
/// back-pointer inside each node, per §9 REDESIGN FLAGS. [`Ast::new`] builds
/// an empty tree; [`Ast::rebuild_parent_links`] performs the one-pass walk
/// the AST input contract (§6) allows in place of parser-set back-references.
#[derive(Debug)]
pub struct Ast {
    pub compilation_unit: CompilationUnit,
    pub type_defs: Arena<TypeDefId, TypeDef>,
    pub methods: Arena<MethodId, MethodDef>,
    pub constructors: Arena<ConstructorId, ConstructorDef>,
    pub properties: Arena<PropertyId, PropertyNode>,
    pub program_entries: Arena<ProgramEntryId, ProgramEntry>,
    parents: HashMap<NodeRef, NodeRef>,
}

impl Ast {
    pub fn new(compilation_unit: CompilationUnit) -> Self {
        Self {
            compilation_unit,
            type_defs: Arena::new(),
            methods: Arena::new(),
            constructors: Arena::new(),
            properties: Arena::new(),
            program_entries: Arena::new(),
            parents: HashMap::new(),
        }
    }

    pub fn parent_of(&self, node: NodeRef) -> Option<NodeRef> {
        self.parents.get(&node).copied()
    }

    /// Walks every node exactly once and records its parent, so that a
    /// syntactic context node passed to the Symbol Resolver can always be
    /// walked outward regardless of whether the producer of this tree set
    /// back-references itself (spec.md §6).
    pub fn rebuild_parent_links(&mut self) {
        self.parents.clear();
        for decl in &self.compilation_unit.top_level {
            match *decl {
                TopLevelDecl::TypeDef(id) => self.link_type_def(id),
                TopLevelDecl::ProgramEntry(id) => {
                    self.parents.insert(NodeRef::ProgramEntry(id), NodeRef::CompilationUnit);
                }
            }
        }
    }

    fn link_type_def(&mut self, id: TypeDefId) {
        self.parents.insert(NodeRef::TypeDef(id), NodeRef::CompilationUnit);
        let type_def = &self.type_defs[id];
        for &prop_id in &type_def.properties {
            self.parents.insert(NodeRef::Property(prop_id), NodeRef::TypeDef(id));
        }
        for &method_id in &type_def.methods {
            self.parents.insert(NodeRef::Method(method_id), NodeRef::TypeDef(id));
        }
        for &ctor_id in &type_def.constructors {
            self.parents.insert(NodeRef::Constructor(ctor_id), NodeRef::TypeDef(id));
        }
    }

    /// Ancestor chain of `node`, innermost first, ending at (but not
    /// including) the compilation unit.
    pub fn ancestors(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            if parent == NodeRef::CompilationUnit {
                break;
            }
            out.push(parent);
            current = self.parent_of(parent);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::ids::NodeRef;
    use crate::method::FormalParameter;
    use crate::type_def::TypeDefKind;
    use crate::type_usage::{PrimitiveType, TypeUsage};
    use turin_core::{FileId, Name, TextRange, TextSize};

    fn range() -> TextRange {
        TextRange::new(TextSize::from(0), TextSize::from(1))
    }

    #[test]
    fn parent_links_cover_every_non_root_node() {
        let mut ast = Ast::new(CompilationUnit {
            file: FileId::from_raw(0),
            namespace: "com.example".into(),
            top_level: Vec::new(),
        });

        let prop_id = ast.properties.alloc(PropertyNode::Definition(
            crate::property::PropertyDefinition {
                name: Name::from("x"),
                declared_type: TypeUsage::Primitive(PrimitiveType::Int),
                initializer: None,
                default_value: None,
                range: range(),
            },
        ));

        let ctor_id = ast.constructors.alloc(ConstructorDef {
            type_variables: Vec::new(),
            params: vec![FormalParameter {
                name: Name::from("x"),
                declared_type: TypeUsage::Primitive(PrimitiveType::Int),
                default_value: None,
                range: range(),
            }],
            body: Body::new(),
            range: range(),
        });

        let type_id = ast.type_defs.alloc(TypeDef {
            kind: TypeDefKind::Class,
            simple_name: Name::from("Point"),
            type_variables: Vec::new(),
            base: None,
            implements: Vec::new(),
            annotations: Vec::new(),
            properties: vec![prop_id],
            methods: Vec::new(),
            constructors: vec![ctor_id],
            range: range(),
        });

        ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_id));
        ast.rebuild_parent_links();

        assert_eq!(ast.parent_of(NodeRef::TypeDef(type_id)), Some(NodeRef::CompilationUnit));
        assert_eq!(ast.parent_of(NodeRef::Property(prop_id)), Some(NodeRef::TypeDef(type_id)));
        assert_eq!(ast.parent_of(NodeRef::Constructor(ctor_id)), Some(NodeRef::TypeDef(type_id)));
        assert_eq!(
            ast.ancestors(NodeRef::Property(prop_id)),
            vec![NodeRef::TypeDef(type_id)]
        );
    }
}
