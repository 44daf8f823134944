/// The Symbol Resolver's own slice of the error taxonomy (spec.md §7): a
/// name that no composed child resolves. Everything a `TypeDefinition`
/// operation can fail with is wrapped rather than re-declared.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no type named `{name}` is visible in this scope")]
    UnresolvedName { name: String },

    #[error(transparent)]
    TypeDefinition(#[from] turin_types::TypeDefinitionError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
