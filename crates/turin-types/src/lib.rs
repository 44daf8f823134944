//! The Type Definition Model and its providers (spec.md §4.1, §4.3): the
//! polymorphic view over a type regardless of whether it came from source,
//! reflection, or a compiled archive, plus the lazily-materialized
//! constructor/method index each source-defined type carries.

mod archive;
mod argument;
mod error;
mod external;
mod in_source;
mod member;
mod options;
mod provider;
mod reflective;
mod source;
mod synth;
mod type_definition;

pub use archive::ArchiveProvider;
pub use argument::{describe_arguments, validate_argument_order, ActualArgument};
pub use error::{Result, TypeDefinitionError};
pub use external::{ExternalFieldInfo, ExternalTypeDefinition};
pub use in_source::InSourceProvider;
pub use member::{FormalParameterInfo, InternalConstructor, InternalMethod, Symbol};
pub use options::CompilerOptions;
pub use provider::{ComposedProvider, TypeProvider};
pub use reflective::ReflectiveProvider;
pub use source::SourceTypeDefinition;
pub use synth::{
    assemble_constructor_descriptor, assemble_method_descriptor, binds_cleanly, field_type_of,
    return_type_of, stable_sort_by_has_default,
};
pub use type_definition::TypeDefinition;
