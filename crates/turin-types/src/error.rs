use turin_core::QualifiedName;

/// The semantic-violation half of the error taxonomy (spec.md §7).
///
/// Ordinary absence (`find_*` queries) is represented with `Option`, never
/// with this type -- see `turin-sema`'s `Diagnostics` for how these are
/// collected rather than propagated during validation.
#[derive(Debug, thiserror::Error)]
pub enum TypeDefinitionError {
    #[error("no constructor of `{type_name}` matches the given arguments")]
    UnresolvedConstructor {
        type_name: QualifiedName,
        arguments: String,
    },

    #[error("no method `{method_name}` of `{type_name}` matches the given arguments")]
    UnresolvedMethod {
        type_name: QualifiedName,
        method_name: String,
        arguments: String,
    },

    #[error("positional arguments must precede named arguments in call to {call_description}")]
    IllOrderedParameters { call_description: String },

    #[error("`{base_name}` cannot be used as a base type of `{type_name}`")]
    InvalidExtension {
        type_name: QualifiedName,
        base_name: QualifiedName,
    },

    #[error("`{type_name}` declares more than one explicit constructor")]
    MultipleExplicitConstructors { type_name: QualifiedName },

    #[error("cannot synthesize a constructor for `{type_name}`: base type `{base_name}` has {constructor_count} constructors")]
    UnsupportedInheritance {
        type_name: QualifiedName,
        base_name: QualifiedName,
        constructor_count: usize,
    },

    #[error("cannot read archive at `{path}`")]
    MalformedArchive {
        path: String,
        #[source]
        source: turin_classfile::Error,
    },

    #[error("internal error: {message}")]
    InternalError { message: String },
}

pub type Result<T> = std::result::Result<T, TypeDefinitionError>;
