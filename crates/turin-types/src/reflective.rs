use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use turin_ast::{PrimitiveType, TypeDefKind, TypeUsage};
use turin_classfile::{BaseType, FieldType, MethodDescriptor, ReturnType};
use turin_core::{Name, PackageName, QualifiedName};

use crate::external::{ExternalFieldInfo, ExternalTypeDefinition};
use crate::member::{InternalConstructor, InternalMethod};
use crate::provider::TypeProvider;
use crate::type_definition::TypeDefinition;

/// Reifies a handful of host-platform classes on demand (spec.md §4.1). A
/// production front-end backs this with real reflection or a precomputed
/// JDK index (see the reference project's own JDK indexer); this core
/// carries the minimal table needed to exercise inheritance and method
/// overloading against the standard library without shelling out to a JVM.
#[derive(Debug)]
pub struct ReflectiveProvider {
    cache: Mutex<HashMap<QualifiedName, TypeDefinition>>,
}

impl ReflectiveProvider {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn build(name: &QualifiedName) -> Option<ExternalTypeDefinition> {
        match name.to_dotted().as_str() {
            "java.lang.Object" => Some(object_definition()),
            "java.lang.String" => Some(string_definition()),
            "java.lang.Integer" => Some(integer_definition()),
            "java.util.Map" => Some(map_definition()),
            _ => None,
        }
    }
}

impl Default for ReflectiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider for ReflectiveProvider {
    #[tracing::instrument(level = "trace", skip(self))]
    fn find_type_definition(&self, name: &QualifiedName) -> Option<TypeDefinition> {
        let mut cache = self.cache.lock().expect("reflective provider cache poisoned");
        if let Some(hit) = cache.get(name) {
            return Some(hit.clone());
        }
        let built = Self::build(name)?;
        let def = TypeDefinition::Reflective(Arc::new(built));
        cache.insert(name.clone(), def.clone());
        Some(def)
    }

    fn has_package(&self, name: &PackageName) -> bool {
        matches!(name.to_dotted().as_str(), "java.lang" | "java.util")
    }
}

fn field_type_to_usage(field: &FieldType) -> TypeUsage {
    match field {
        FieldType::Base(BaseType::Byte) => TypeUsage::Primitive(PrimitiveType::Byte),
        FieldType::Base(BaseType::Char) => TypeUsage::Primitive(PrimitiveType::Char),
        FieldType::Base(BaseType::Double) => TypeUsage::Primitive(PrimitiveType::Double),
        FieldType::Base(BaseType::Float) => TypeUsage::Primitive(PrimitiveType::Float),
        FieldType::Base(BaseType::Int) => TypeUsage::Primitive(PrimitiveType::Int),
        FieldType::Base(BaseType::Long) => TypeUsage::Primitive(PrimitiveType::Long),
        FieldType::Base(BaseType::Short) => TypeUsage::Primitive(PrimitiveType::Short),
        FieldType::Base(BaseType::Boolean) => TypeUsage::Primitive(PrimitiveType::Boolean),
        FieldType::Object(internal) => TypeUsage::reference(QualifiedName::from_internal(internal)),
        FieldType::Array(component) => TypeUsage::array_of(field_type_to_usage(component)),
    }
}

fn no_arg_ctor(owner: &QualifiedName) -> InternalConstructor {
    InternalConstructor {
        owner: owner.clone(),
        params: Vec::new(),
        descriptor: MethodDescriptor {
            params: Vec::new(),
            return_type: ReturnType::Void,
        },
    }
}

fn method(owner: &QualifiedName, name: &str, params: Vec<FieldType>, return_type: ReturnType, is_static: bool) -> InternalMethod {
    // Reflection does not recover source-level parameter names; synthesize
    // placeholders so positional binding (the only protocol external JVM
    // methods support) still sees the right arity.
    let formal_params = params
        .iter()
        .enumerate()
        .map(|(i, field)| crate::member::FormalParameterInfo {
            name: Name::from(format!("arg{i}")),
            declared_type: field_type_to_usage(field),
            has_default: false,
        })
        .collect();
    InternalMethod {
        owner: owner.clone(),
        name: Name::from(name),
        params: formal_params,
        return_type: match &return_type {
            ReturnType::Void => TypeUsage::Void,
            ReturnType::Type(FieldType::Object(internal)) => TypeUsage::reference(QualifiedName::from_internal(internal)),
            ReturnType::Type(_) => TypeUsage::Primitive(PrimitiveType::Int),
        },
        descriptor: MethodDescriptor { params, return_type },
        is_static,
        is_interface: false,
    }
}

fn object_definition() -> ExternalTypeDefinition {
    let owner = QualifiedName::from_dotted("java.lang.Object");
    let mut methods = HashMap::new();
    methods.insert(
        Name::from("toString"),
        vec![method(&owner, "toString", vec![], ReturnType::Type(FieldType::object("java/lang/String")), false)],
    );
    methods.insert(
        Name::from("hashCode"),
        vec![method(&owner, "hashCode", vec![], ReturnType::Type(FieldType::Base(BaseType::Int)), false)],
    );
    methods.insert(
        Name::from("equals"),
        vec![method(
            &owner,
            "equals",
            vec![FieldType::object("java/lang/Object")],
            ReturnType::Type(FieldType::Base(BaseType::Boolean)),
            false,
        )],
    );

    ExternalTypeDefinition {
        qualified_name: owner.clone(),
        kind: TypeDefKind::Class,
        base: None,
        interfaces: Vec::new(),
        constructors: vec![no_arg_ctor(&owner)],
        methods,
        fields: HashMap::new(),
    }
}

fn string_definition() -> ExternalTypeDefinition {
    let owner = QualifiedName::from_dotted("java.lang.String");
    let mut methods = HashMap::new();
    methods.insert(
        Name::from("length"),
        vec![method(&owner, "length", vec![], ReturnType::Type(FieldType::Base(BaseType::Int)), false)],
    );
    // Overloaded `valueOf` -- external types preserve overloading (spec.md §4.1).
    methods.insert(
        Name::from("valueOf"),
        vec![
            method(
                &owner,
                "valueOf",
                vec![FieldType::Base(BaseType::Int)],
                ReturnType::Type(FieldType::object("java/lang/String")),
                true,
            ),
            method(
                &owner,
                "valueOf",
                vec![FieldType::Base(BaseType::Boolean)],
                ReturnType::Type(FieldType::object("java/lang/String")),
                true,
            ),
        ],
    );

    ExternalTypeDefinition {
        qualified_name: owner.clone(),
        kind: TypeDefKind::Class,
        base: Some(TypeUsage::reference(QualifiedName::from_dotted("java.lang.Object"))),
        interfaces: Vec::new(),
        constructors: vec![no_arg_ctor(&owner)],
        methods,
        fields: HashMap::new(),
    }
}

fn integer_definition() -> ExternalTypeDefinition {
    let owner = QualifiedName::from_dotted("java.lang.Integer");
    let mut methods = HashMap::new();
    methods.insert(
        Name::from("intValue"),
        vec![method(&owner, "intValue", vec![], ReturnType::Type(FieldType::Base(BaseType::Int)), false)],
    );

    ExternalTypeDefinition {
        qualified_name: owner.clone(),
        kind: TypeDefKind::Class,
        base: Some(TypeUsage::reference(QualifiedName::from_dotted("java.lang.Object"))),
        interfaces: Vec::new(),
        constructors: vec![InternalConstructor {
            owner: owner.clone(),
            params: vec![crate::member::FormalParameterInfo {
                name: Name::from("value"),
                declared_type: TypeUsage::Primitive(PrimitiveType::Int),
                has_default: false,
            }],
            descriptor: MethodDescriptor {
                params: vec![FieldType::Base(BaseType::Int)],
                return_type: ReturnType::Void,
            },
        }],
        methods,
        fields: {
            let mut fields = HashMap::new();
            fields.insert(
                Name::from("value"),
                ExternalFieldInfo {
                    declared_type: TypeUsage::Primitive(PrimitiveType::Int),
                    assignable: false,
                },
            );
            fields
        },
    }
}

fn map_definition() -> ExternalTypeDefinition {
    let owner = QualifiedName::from_dotted("java.util.Map");
    let object_field = FieldType::object("java/lang/Object");
    let mut methods = HashMap::new();
    methods.insert(
        Name::from("get"),
        vec![method(&owner, "get", vec![object_field.clone()], ReturnType::Type(object_field.clone()), false)],
    );
    methods.insert(
        Name::from("put"),
        vec![method(
            &owner,
            "put",
            vec![object_field.clone(), object_field.clone()],
            ReturnType::Type(object_field),
            false,
        )],
    );

    ExternalTypeDefinition {
        qualified_name: owner,
        kind: TypeDefKind::Interface,
        base: None,
        interfaces: Vec::new(),
        constructors: Vec::new(),
        methods,
        fields: HashMap::new(),
    }
}
