use std::collections::HashSet;

use turin_ast::{Ast, Body, Expr, NodeRef, Stmt, TopLevelDecl, TypeDefId};
use turin_core::{Diagnostic, ExprId, Location, Name, StmtId, TextRange};
use turin_resolve::SymbolResolver;
use turin_types::{ActualArgument, CompilerOptions, TypeDefinition, TypeDefinitionError, TypeProvider};

use crate::diagnostics::DiagnosticSink;

/// Walks every declaration and method/constructor body in `ast`, resolving
/// each usage against `resolver`/`universe` and reporting the error
/// taxonomy of spec.md §7 through `sink`. Continues past a failing
/// declaration to surface as many diagnostics as possible, per §7's
/// propagation policy.
#[tracing::instrument(level = "debug", skip_all, fields(namespace = %ast.compilation_unit.namespace))]
pub fn validate_compilation_unit(
    ast: &Ast,
    resolver: &dyn SymbolResolver,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
    sink: &mut dyn DiagnosticSink,
) {
    for decl in &ast.compilation_unit.top_level {
        if let TopLevelDecl::TypeDef(type_def_id) = *decl {
            validate_type_def(ast, type_def_id, resolver, universe, options, sink);
        }
    }
}

/// The one check that does not need a universe at all: `InSourceProvider`
/// itself aborts construction for the *whole* compilation unit the moment
/// it meets a type with more than one explicit constructor, so a caller
/// whose `standard_resolver`/universe failed to build still has a way to
/// recover spec.md §8 scenario 4's "two constructors, two diagnostics"
/// behavior instead of reporting nothing.
pub fn validate_compilation_unit_structural_only(ast: &Ast, sink: &mut dyn DiagnosticSink) {
    for decl in &ast.compilation_unit.top_level {
        let TopLevelDecl::TypeDef(type_def_id) = *decl else { continue };
        let type_def = &ast.type_defs[type_def_id];
        if type_def.constructors.len() <= 1 {
            continue;
        }
        let qualified = ast.compilation_unit.qualify(type_def.simple_name.as_str());
        for &ctor_id in &type_def.constructors {
            let ctor = &ast.constructors[ctor_id];
            sink.report(Diagnostic::error(
                loc(ast, ctor.range),
                "MultipleExplicitConstructors",
                format!("`{qualified}` declares more than one explicit constructor"),
            ));
        }
    }
}

fn loc(ast: &Ast, range: TextRange) -> Location {
    Location {
        file: ast.compilation_unit.file,
        range,
    }
}

fn validate_type_def(
    ast: &Ast,
    type_def_id: TypeDefId,
    resolver: &dyn SymbolResolver,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
    sink: &mut dyn DiagnosticSink,
) {
    let type_def = &ast.type_defs[type_def_id];
    let qualified = ast.compilation_unit.qualify(type_def.simple_name.as_str());
    let context = NodeRef::TypeDef(type_def_id);

    // MultipleExplicitConstructors is handled by
    // `validate_compilation_unit_structural_only` before this function ever
    // runs: `universe` could not have been built at all if any type in this
    // compilation unit had more than one explicit constructor, so reaching
    // here means `type_def.constructors.len() <= 1` already holds.

    if let Some(base) = &type_def.base {
        match base.as_reference_name() {
            Some(name) => match resolver.find_type_definition(ast, &name.to_dotted(), context) {
                None => sink.report(Diagnostic::error(
                    loc(ast, type_def.range),
                    "UnresolvedName",
                    format!("base type `{name}` of `{qualified}` does not resolve in any composed resolver"),
                )),
                Some(def) if !def.is_class() => sink.report(Diagnostic::error(
                    loc(ast, type_def.range),
                    "InvalidExtension",
                    format!("`{}` cannot be used as a base type of `{qualified}`: not a class", def.qualified_name()),
                )),
                Some(_) => {}
            },
            None => sink.report(Diagnostic::error(
                loc(ast, type_def.range),
                "InvalidExtension",
                format!("`{qualified}` extends a type usage that does not name a concrete type"),
            )),
        }
    }

    for implemented in &type_def.implements {
        match implemented.as_reference_name() {
            Some(name) => match resolver.find_type_definition(ast, &name.to_dotted(), context) {
                None => sink.report(Diagnostic::error(
                    loc(ast, type_def.range),
                    "UnresolvedName",
                    format!("implemented type `{name}` of `{qualified}` does not resolve in any composed resolver"),
                )),
                Some(def) if !def.is_interface() => sink.report(Diagnostic::error(
                    loc(ast, type_def.range),
                    "InvalidExtension",
                    format!("`{}` cannot be implemented by `{qualified}`: not an interface", def.qualified_name()),
                )),
                Some(_) => {}
            },
            None => sink.report(Diagnostic::error(
                loc(ast, type_def.range),
                "InvalidExtension",
                format!("`{qualified}` implements a type usage that does not name a concrete type"),
            )),
        }
    }

    // Drive the §4.3.7 state machine so constructor/method synthesis errors
    // (UnsupportedInheritance, InternalError) surface as diagnostics rather
    // than as a panic somewhere downstream.
    let Some(definition) = universe.find_type_definition(&qualified) else {
        return;
    };
    if let Err(err) = definition.ensure_initialized(universe, options) {
        report_type_definition_error(ast, type_def.range, &err, sink);
        return;
    }

    for &method_id in &type_def.methods {
        let method = &ast.methods[method_id];
        validate_body(ast, &method.body, NodeRef::Method(method_id), &definition, resolver, universe, options, sink);
    }
    for &ctor_id in &type_def.constructors {
        let ctor = &ast.constructors[ctor_id];
        validate_body(ast, &ctor.body, NodeRef::Constructor(ctor_id), &definition, resolver, universe, options, sink);
    }
}

fn report_type_definition_error(ast: &Ast, range: TextRange, err: &TypeDefinitionError, sink: &mut dyn DiagnosticSink) {
    let code = match err {
        TypeDefinitionError::UnresolvedConstructor { .. } => "UnresolvedConstructor",
        TypeDefinitionError::UnresolvedMethod { .. } => "UnresolvedMethod",
        TypeDefinitionError::IllOrderedParameters { .. } => "IllOrderedParameters",
        TypeDefinitionError::InvalidExtension { .. } => "InvalidExtension",
        TypeDefinitionError::MultipleExplicitConstructors { .. } => "MultipleExplicitConstructors",
        TypeDefinitionError::UnsupportedInheritance { .. } => "UnsupportedInheritance",
        TypeDefinitionError::MalformedArchive { .. } => "MalformedArchive",
        TypeDefinitionError::InternalError { .. } => "InternalError",
    };
    tracing::debug!(code, message = %err, "recording semantic diagnostic");
    sink.report(Diagnostic::error(loc(ast, range), code, err.to_string()));
}

/// Collects every name bound by a `let` anywhere in `body`, ignoring block
/// structure: good enough to tell a local apart from an unresolved name
/// without modeling nested lexical scopes (out of scope, spec.md §1).
fn collect_locals(body: &Body) -> HashSet<Name> {
    let mut locals = HashSet::new();
    for (_, stmt) in body.stmts.iter() {
        if let Stmt::Let { name, .. } = stmt {
            locals.insert(name.clone());
        }
    }
    locals
}

fn validate_body(
    ast: &Ast,
    body: &Body,
    context: NodeRef,
    owner: &TypeDefinition,
    resolver: &dyn SymbolResolver,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(root) = body.root else { return };
    let locals = collect_locals(body);
    walk_stmt(ast, body, root, context, owner, &locals, resolver, universe, options, sink);
}

fn walk_stmt(
    ast: &Ast,
    body: &Body,
    stmt_id: StmtId,
    context: NodeRef,
    owner: &TypeDefinition,
    locals: &HashSet<Name>,
    resolver: &dyn SymbolResolver,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
    sink: &mut dyn DiagnosticSink,
) {
    match &body.stmts[stmt_id] {
        Stmt::Block { statements, .. } => {
            for &inner in statements {
                walk_stmt(ast, body, inner, context, owner, locals, resolver, universe, options, sink);
            }
        }
        Stmt::Let { init, .. } => {
            if let Some(expr) = init {
                walk_expr(ast, body, *expr, context, owner, locals, resolver, universe, options, sink);
            }
        }
        Stmt::Expr { expr, .. } => walk_expr(ast, body, *expr, context, owner, locals, resolver, universe, options, sink),
        Stmt::Return { value, .. } => {
            if let Some(expr) = value {
                walk_expr(ast, body, *expr, context, owner, locals, resolver, universe, options, sink);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_expr(
    ast: &Ast,
    body: &Body,
    expr_id: ExprId,
    context: NodeRef,
    owner: &TypeDefinition,
    locals: &HashSet<Name>,
    resolver: &dyn SymbolResolver,
    universe: &dyn TypeProvider,
    options: &CompilerOptions,
    sink: &mut dyn DiagnosticSink,
) {
    match &body.exprs[expr_id] {
        Expr::Literal { .. } => {}
        Expr::Name { name, range } => {
            if !locals.contains(name) && resolver.find_symbol(ast, name.as_str(), context).is_none() {
                sink.report(Diagnostic::error(
                    loc(ast, *range),
                    "UnresolvedName",
                    format!("`{name}` is neither a local nor a symbol of `{}`", owner.qualified_name()),
                ));
            }
        }
        Expr::FieldAccess { receiver, .. } => {
            // The receiver's static type is not inferred here (spec.md §1
            // Non-goals); only the receiver subexpression is walked.
            walk_expr(ast, body, *receiver, context, owner, locals, resolver, universe, options, sink);
        }
        Expr::Call { receiver, name, args, range } => {
            for arg in args {
                walk_expr(ast, body, arg.value, context, owner, locals, resolver, universe, options, sink);
            }
            if let Some(receiver_id) = receiver {
                // A call through an explicit receiver needs that receiver's
                // static type to resolve the owner, which this core does
                // not infer; only the receiver subexpression is walked.
                walk_expr(ast, body, *receiver_id, context, owner, locals, resolver, universe, options, sink);
                return;
            }
            let actual_args: Vec<ActualArgument> = args
                .iter()
                .map(|a| match &a.name {
                    Some(n) => ActualArgument::named(n.clone()),
                    None => ActualArgument::positional(),
                })
                .collect();
            match owner.find_method(name.as_str(), &actual_args, false, universe, options) {
                Ok(Some(_)) => {}
                Ok(None) => sink.report(Diagnostic::error(
                    loc(ast, *range),
                    "UnresolvedMethod",
                    format!("no method `{name}` of `{}` matches the given arguments", owner.qualified_name()),
                )),
                Err(err) => report_type_definition_error(ast, *range, &err, sink),
            }
        }
        Expr::New { type_usage, args, range } => {
            for arg in args {
                walk_expr(ast, body, arg.value, context, owner, locals, resolver, universe, options, sink);
            }
            let Some(name) = type_usage.as_reference_name() else {
                return;
            };
            let Some(target) = resolver.find_type_definition(ast, &name.to_dotted(), context) else {
                sink.report(Diagnostic::error(loc(ast, *range), "UnresolvedName", format!("`{name}` does not resolve in any composed resolver")));
                return;
            };
            let actual_args: Vec<ActualArgument> = args
                .iter()
                .map(|a| match &a.name {
                    Some(n) => ActualArgument::named(n.clone()),
                    None => ActualArgument::positional(),
                })
                .collect();
            match target.find_constructor(&actual_args, universe, options) {
                Ok(Some(_)) => {}
                Ok(None) => sink.report(Diagnostic::error(
                    loc(ast, *range),
                    "UnresolvedConstructor",
                    format!("no constructor of `{name}` matches the given arguments"),
                )),
                Err(err) => report_type_definition_error(ast, *range, &err, sink),
            }
        }
    }
}
