//! Exercises the seed scenarios from spec.md §8 end to end: building a
//! `SourceTypeDefinition` out of a small hand-assembled AST, then driving
//! constructor/method resolution and inheritance through `TypeDefinition`
//! and the providers that back it.

use std::sync::Arc;

use turin_ast::{
    Ast, Body, CompilationUnit, ConstructorDef, FormalParameter, MethodDef, PrimitiveType,
    PropertyDefinition, PropertyNode, TopLevelDecl, TypeDef, TypeDefKind, TypeUsage,
};
use turin_core::{FileId, Name, QualifiedName, TextRange, TextSize};
use turin_types::{
    ActualArgument, ComposedProvider, CompilerOptions, InSourceProvider, ReflectiveProvider,
    TypeDefinitionError, TypeProvider,
};

fn range() -> TextRange {
    TextRange::new(TextSize::from(0), TextSize::from(1))
}

fn prop(ast: &mut Ast, name: &str, ty: TypeUsage, has_default: bool) -> turin_ast::PropertyId {
    ast.properties.alloc(PropertyNode::Definition(PropertyDefinition {
        name: Name::from(name),
        declared_type: ty,
        initializer: None,
        default_value: has_default.then(|| turin_core::ExprId::from_raw(0)),
        range: range(),
    }))
}

fn param(name: &str, ty: TypeUsage, has_default: bool) -> FormalParameter {
    FormalParameter {
        name: Name::from(name),
        declared_type: ty,
        default_value: has_default.then(|| turin_core::ExprId::from_raw(0)),
        range: range(),
    }
}

fn int() -> TypeUsage {
    TypeUsage::Primitive(PrimitiveType::Int)
}

fn namespace_ast(namespace: &str) -> Ast {
    Ast::new(CompilationUnit {
        file: FileId::from_raw(0),
        namespace: QualifiedName::from_dotted(namespace),
        top_level: Vec::new(),
    })
}

fn options() -> CompilerOptions {
    CompilerOptions::default()
}

fn universe(ast: &Ast) -> ComposedProvider {
    ComposedProvider::new(vec![
        Arc::new(InSourceProvider::from_ast(ast).unwrap()),
        Arc::new(ReflectiveProvider::new()),
    ])
}

/// `class Point { int x; int y; }` -- both properties lack initializers, so
/// the implicit constructor takes both positionally (spec.md §4.3.2).
fn point_ast() -> Ast {
    let mut ast = namespace_ast("demo");
    let x = prop(&mut ast, "x", int(), false);
    let y = prop(&mut ast, "y", int(), false);
    let type_def_id = ast.type_defs.alloc(TypeDef {
        kind: TypeDefKind::Class,
        simple_name: Name::from("Point"),
        type_variables: Vec::new(),
        base: None,
        implements: Vec::new(),
        annotations: Vec::new(),
        properties: vec![x, y],
        methods: Vec::new(),
        constructors: Vec::new(),
        range: range(),
    });
    ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_def_id));
    ast.rebuild_parent_links();
    ast
}

#[test]
fn point_gets_an_implicit_two_arg_constructor() {
    let ast = point_ast();
    let universe = universe(&ast);
    let options = options();

    let point = universe.find_type_definition(&QualifiedName::from_dotted("demo.Point")).unwrap();
    let ctor = point
        .find_constructor(&[ActualArgument::positional(), ActualArgument::positional()], &universe, &options)
        .unwrap();
    assert!(ctor.is_some());
    assert_eq!(ctor.unwrap().descriptor.render(), "(II)V");

    assert!(point.find_symbol("x").is_some());
    assert!(point.find_symbol("z").is_none());
}

#[test]
fn point_getters_and_setters_are_synthesized() {
    let ast = point_ast();
    let universe = universe(&ast);
    let options = options();
    let point = universe.find_type_definition(&QualifiedName::from_dotted("demo.Point")).unwrap();

    let getter = point.find_method("getX", &[], false, &universe, &options).unwrap();
    assert!(getter.is_some());
    assert_eq!(getter.unwrap().descriptor.render(), "()I");

    let setter = point
        .find_method("setX", &[ActualArgument::positional()], false, &universe, &options)
        .unwrap();
    assert!(setter.is_some());
    assert_eq!(setter.unwrap().descriptor.render(), "(I)V");
}

/// `class Person { int age = 0; String name; }` with `age` defaulted --
/// the synthesized constructor puts `name` first, `age` (defaulted) last,
/// and appends the defaults-map parameter (spec.md §4.3.2-§4.3.3).
fn person_ast() -> Ast {
    let mut ast = namespace_ast("demo");
    let age = prop(&mut ast, "age", int(), true);
    let name = prop(&mut ast, "name", TypeUsage::reference(QualifiedName::from_dotted("java.lang.String")), false);
    let type_def_id = ast.type_defs.alloc(TypeDef {
        kind: TypeDefKind::Class,
        simple_name: Name::from("Person"),
        type_variables: Vec::new(),
        base: None,
        implements: Vec::new(),
        annotations: Vec::new(),
        properties: vec![age, name],
        methods: Vec::new(),
        constructors: Vec::new(),
        range: range(),
    });
    ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_def_id));
    ast.rebuild_parent_links();
    ast
}

#[test]
fn person_constructor_orders_defaults_last_with_trailing_map() {
    let ast = person_ast();
    let universe = universe(&ast);
    let options = options();
    let person = universe.find_type_definition(&QualifiedName::from_dotted("demo.Person")).unwrap();

    let ctor = person
        .find_constructor(&[ActualArgument::positional()], &universe, &options)
        .unwrap()
        .expect("name alone should bind: age is defaulted");
    assert_eq!(ctor.descriptor.render(), "(Ljava/lang/String;Ljava/util/Map;)V");

    let named = person
        .find_constructor(
            &[ActualArgument::positional(), ActualArgument::named("age")],
            &universe,
            &options,
        )
        .unwrap();
    assert!(named.is_some());
}

/// `class Employee extends Person { int salary; }` -- the implicit
/// constructor prepends Person's inherited parameters (spec.md §4.3.2 step
/// 2).
fn employee_ast() -> Ast {
    let mut ast = person_ast();
    let salary = prop(&mut ast, "salary", int(), false);
    let type_def_id = ast.type_defs.alloc(TypeDef {
        kind: TypeDefKind::Class,
        simple_name: Name::from("Employee"),
        type_variables: Vec::new(),
        base: Some(TypeUsage::reference(QualifiedName::from_dotted("demo.Person"))),
        implements: Vec::new(),
        annotations: Vec::new(),
        properties: vec![salary],
        methods: Vec::new(),
        constructors: Vec::new(),
        range: range(),
    });
    ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_def_id));
    ast.rebuild_parent_links();
    ast
}

#[test]
fn employee_constructor_prepends_inherited_person_params() {
    let ast = employee_ast();
    let universe = universe(&ast);
    let options = options();
    let employee = universe.find_type_definition(&QualifiedName::from_dotted("demo.Employee")).unwrap();

    let ctors = employee.constructors(&universe, &options).unwrap();
    assert_eq!(ctors.len(), 1);
    // Person's (name, age-defaulted) params come first, then Employee's own
    // `salary`, then one trailing defaults map for the one default in the
    // whole combined list.
    assert_eq!(ctors[0].descriptor.render(), "(Ljava/lang/String;ILjava/util/Map;)V");

    let ancestors = employee.ancestors(&universe, &options);
    assert_eq!(ancestors[0].as_reference_name().unwrap().to_dotted(), "demo.Person");
    assert_eq!(ancestors.last().unwrap().as_reference_name().unwrap().to_dotted(), "java.lang.Object");
}

/// A declaration with more than one explicit constructor is rejected when
/// the type definition is built, before it can ever participate in
/// inheritance (spec.md §4.3.2/§7, `MultipleExplicitConstructors`). This is
/// what makes `UnsupportedInheritance` reachable: no base type can reach
/// `SourceTypeDefinition::ensure_constructors` with more than one candidate.
#[test]
fn multiple_explicit_constructors_on_one_declaration_are_rejected() {
    let mut ast = namespace_ast("demo");

    let ctor_a = ast.constructors.alloc(ConstructorDef {
        type_variables: Vec::new(),
        params: vec![param("a", int(), false)],
        body: Body::new(),
        range: range(),
    });
    let ctor_b = ast.constructors.alloc(ConstructorDef {
        type_variables: Vec::new(),
        params: vec![param("a", int(), false), param("b", int(), false)],
        body: Body::new(),
        range: range(),
    });
    let base_id = ast.type_defs.alloc(TypeDef {
        kind: TypeDefKind::Class,
        simple_name: Name::from("Base"),
        type_variables: Vec::new(),
        base: None,
        implements: Vec::new(),
        annotations: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
        constructors: vec![ctor_a, ctor_b],
        range: range(),
    });
    ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(base_id));
    ast.rebuild_parent_links();

    let result = InSourceProvider::from_ast(&ast);
    assert!(matches!(result, Err(TypeDefinitionError::MultipleExplicitConstructors { .. })));
}

/// `class Loud { ... toString() { ... } }` -- an explicit override is
/// visible through `defines_to_string` (spec.md §4.3.6); a type that never
/// redeclares it is not.
fn loud_ast() -> Ast {
    let mut ast = namespace_ast("demo");
    let to_string = ast.methods.alloc(MethodDef {
        name: Name::from("toString"),
        type_variables: Vec::new(),
        params: Vec::new(),
        return_type: TypeUsage::reference(QualifiedName::from_dotted("java.lang.String")),
        body: Body::new(),
        is_static: false,
        range: range(),
    });
    let type_def_id = ast.type_defs.alloc(TypeDef {
        kind: TypeDefKind::Class,
        simple_name: Name::from("Loud"),
        type_variables: Vec::new(),
        base: None,
        implements: Vec::new(),
        annotations: Vec::new(),
        properties: Vec::new(),
        methods: vec![to_string],
        constructors: Vec::new(),
        range: range(),
    });
    ast.compilation_unit.top_level.push(TopLevelDecl::TypeDef(type_def_id));
    ast.rebuild_parent_links();
    ast
}

#[test]
fn override_detection_distinguishes_declared_from_inherited() {
    let options = options();

    let loud = loud_ast();
    let loud_universe = universe(&loud);
    let loud_def = loud_universe.find_type_definition(&QualifiedName::from_dotted("demo.Loud")).unwrap();
    assert!(loud_def.defines_to_string(&loud_universe, &options).unwrap());
    assert!(!loud_def.defines_hash_code(&loud_universe, &options).unwrap());

    let point = point_ast();
    let point_universe = universe(&point);
    let point_def = point_universe.find_type_definition(&QualifiedName::from_dotted("demo.Point")).unwrap();
    assert!(!point_def.defines_to_string(&point_universe, &options).unwrap());
}
