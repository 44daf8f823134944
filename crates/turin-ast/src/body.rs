use turin_core::{ExprId, Name, StmtId, TextRange};

use crate::arena::Arena;
use crate::type_usage::TypeUsage;

/// A single actual argument at a call site. Resolvers validate ordering
/// (positional arguments must precede named ones, spec.md §3 invariant) --
/// the AST itself only records what was written.
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Option<Name>,
    pub value: ExprId,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind {
    Int(i64),
    Double(f64),
    Boolean(bool),
    String,
    Null,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal {
        kind: LiteralKind,
        range: TextRange,
    },
    /// A bare name: a local, a property, or an unqualified type/static
    /// reference, disambiguated by the Symbol Resolver.
    Name {
        name: Name,
        range: TextRange,
    },
    FieldAccess {
        receiver: ExprId,
        name: Name,
        range: TextRange,
    },
    /// A method call. `receiver: None` means an implicit receiver (`this`
    /// or a static import) that the resolver must disambiguate.
    Call {
        receiver: Option<ExprId>,
        name: Name,
        args: Vec<Argument>,
        range: TextRange,
    },
    New {
        type_usage: TypeUsage,
        args: Vec<Argument>,
        range: TextRange,
    },
}

impl Expr {
    pub fn range(&self) -> TextRange {
        match self {
            Expr::Literal { range, .. }
            | Expr::Name { range, .. }
            | Expr::FieldAccess { range, .. }
            | Expr::Call { range, .. }
            | Expr::New { range, .. } => *range,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block {
        statements: Vec<StmtId>,
        range: TextRange,
    },
    Let {
        name: Name,
        declared_type: Option<TypeUsage>,
        init: Option<ExprId>,
        range: TextRange,
    },
    Expr {
        expr: ExprId,
        range: TextRange,
    },
    Return {
        value: Option<ExprId>,
        range: TextRange,
    },
}

impl Stmt {
    pub fn range(&self) -> TextRange {
        match self {
            Stmt::Block { range, .. }
            | Stmt::Let { range, .. }
            | Stmt::Expr { range, .. }
            | Stmt::Return { range, .. } => *range,
        }
    }
}

/// The statement/expression body of a method, constructor, or property
/// initializer. Mirrors the reference front-end's per-owner body arena:
/// each body owns its own `exprs`/`stmts` arenas, indexed by id, with a
/// `root` statement.
#[derive(Debug, Default, Clone)]
pub struct Body {
    pub exprs: Arena<ExprId, Expr>,
    pub stmts: Arena<StmtId, Stmt>,
    pub root: Option<StmtId>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.alloc(expr)
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.stmts.alloc(stmt)
    }
}
