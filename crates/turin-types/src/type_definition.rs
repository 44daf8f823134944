use std::collections::HashMap;
use std::sync::Arc;

use turin_ast::{TypeDefKind, TypeUsage};
use turin_classfile::FieldType;
use turin_core::{Name, QualifiedName};

use crate::argument::{describe_arguments, validate_argument_order, ActualArgument};
use crate::error::{Result, TypeDefinitionError};
use crate::external::ExternalTypeDefinition;
use crate::member::{InternalConstructor, InternalMethod, Symbol};
use crate::options::CompilerOptions;
use crate::provider::TypeProvider;
use crate::source::SourceTypeDefinition;
use crate::synth::binds_cleanly;

/// The polymorphic view over a type regardless of origin (spec.md §4.3),
/// re-architected as a closed tagged variant per the REDESIGN FLAGS rather
/// than a deep inheritance hierarchy. `Reflective` and `Archive` share a
/// representation -- both are built eagerly -- but stay distinct variants
/// since call sites (and `tracing` spans) care which provider produced a
/// given definition.
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Source(Arc<SourceTypeDefinition>),
    Reflective(Arc<ExternalTypeDefinition>),
    Archive(Arc<ExternalTypeDefinition>),
}

impl TypeDefinition {
    pub fn qualified_name(&self) -> &QualifiedName {
        match self {
            TypeDefinition::Source(s) => s.qualified_name(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => &e.qualified_name,
        }
    }

    fn kind(&self) -> TypeDefKind {
        match self {
            TypeDefinition::Source(s) => s.kind(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => e.kind,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind(), TypeDefKind::Class)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind(), TypeDefKind::Interface)
    }

    fn declared_base(&self) -> Option<&TypeUsage> {
        match self {
            TypeDefinition::Source(s) => s.base(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => e.base.as_ref(),
        }
    }

    pub fn implemented_interfaces(&self) -> &[TypeUsage] {
        match self {
            TypeDefinition::Source(s) => s.implements(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => &e.interfaces,
        }
    }

    /// Defaults to the platform root object type when no explicit base is
    /// declared (spec.md §4.3.1).
    pub fn superclass(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> TypeDefinition {
        if let Some(usage) = self.declared_base() {
            if let Some(name) = usage.as_reference_name() {
                if let Some(def) = universe.find_type_definition(name) {
                    return def;
                }
            }
        }
        universe
            .find_type_definition(&options.target_object_fqn)
            .unwrap_or_else(|| TypeDefinition::Reflective(Arc::new(ExternalTypeDefinition::bare(options.target_object_fqn.clone()))))
    }

    /// Transitive ancestor chain, root type last (spec.md §4.3.1). The root
    /// object type's own ancestor chain is empty.
    pub fn ancestors(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Vec<TypeUsage> {
        let mut out = Vec::new();
        if self.qualified_name() == &options.target_object_fqn {
            return out;
        }
        let mut current = self.clone();
        loop {
            let super_def = current.superclass(universe, options);
            out.push(TypeUsage::reference(super_def.qualified_name().clone()));
            if super_def.qualified_name() == &options.target_object_fqn {
                break;
            }
            current = super_def;
        }
        out
    }

    pub(crate) fn constructors(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<Vec<InternalConstructor>> {
        match self {
            TypeDefinition::Source(s) => s.ensure_constructors(universe, options).cloned(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => Ok(e.constructors.clone()),
        }
    }

    fn methods_table(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<HashMap<Name, Vec<InternalMethod>>> {
        match self {
            TypeDefinition::Source(s) => s.ensure_methods(universe, options).cloned(),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => Ok(e.methods.clone()),
        }
    }

    /// Drives the §4.3.7 state machine eagerly; a no-op for external
    /// origins, which have nothing left to lazily compute.
    #[tracing::instrument(level = "debug", skip(self, universe, options), fields(type_name = %self.qualified_name()))]
    pub fn ensure_initialized(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<()> {
        if let TypeDefinition::Source(s) = self {
            s.ensure_methods(universe, options)?;
        }
        Ok(())
    }

    /// Constructor resolution (spec.md §4.3.5).
    pub fn resolve_constructor_call(
        &self,
        actual_params: &[ActualArgument],
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<InternalConstructor> {
        let call_description = format!("{}(..)", self.qualified_name());
        validate_argument_order(actual_params, &call_description)?;
        let candidates = self.constructors(universe, options)?;
        candidates
            .into_iter()
            .find(|candidate| binds_cleanly(&candidate.params, actual_params))
            .ok_or_else(|| TypeDefinitionError::UnresolvedConstructor {
                type_name: self.qualified_name().clone(),
                arguments: describe_arguments(actual_params),
            })
    }

    pub fn find_constructor(
        &self,
        actual_params: &[ActualArgument],
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<Option<InternalConstructor>> {
        match self.resolve_constructor_call(actual_params, universe, options) {
            Ok(ctor) => Ok(Some(ctor)),
            Err(TypeDefinitionError::UnresolvedConstructor { .. }) => Ok(None),
            Err(other) => Err(other),
        }
    }

    /// Method resolution (spec.md §4.3.5): source-defined types admit at
    /// most one candidate per name; external types may overload and are
    /// searched in registration order.
    pub fn find_method(
        &self,
        name: &str,
        actual_params: &[ActualArgument],
        static_context: bool,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<Option<InternalMethod>> {
        let call_description = format!("{}.{}(..)", self.qualified_name(), name);
        validate_argument_order(actual_params, &call_description)?;

        let table = self.methods_table(universe, options)?;
        let Some(candidates) = table.get(&Name::from(name)) else {
            return Ok(None);
        };

        if matches!(self, TypeDefinition::Source(_)) && candidates.len() > 1 {
            return Err(TypeDefinitionError::InternalError {
                message: format!("source type `{}` registered overloaded candidates for `{name}`, which is not permitted", self.qualified_name()),
            });
        }

        Ok(candidates
            .iter()
            .find(|c| (!static_context || c.is_static) && binds_cleanly(&c.params, actual_params))
            .cloned())
    }

    /// Descriptor-keyed lookup for the emitter, after type checking has
    /// already selected an overload (spec.md §4.3.1). Fails fast with
    /// `InternalError` on any mismatch, per the postcondition in §4.3.5.
    pub fn find_method_by_descriptors(
        &self,
        name: &str,
        jvm_types: &[FieldType],
        static_context: bool,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<turin_classfile::MethodDescriptor> {
        let table = self.methods_table(universe, options)?;
        let candidates = table.get(&Name::from(name)).ok_or_else(|| TypeDefinitionError::InternalError {
            message: format!("no method named `{name}` on `{}`", self.qualified_name()),
        })?;

        candidates
            .iter()
            .find(|c| (!static_context || c.is_static) && c.descriptor.params == jvm_types)
            .map(|c| c.descriptor.clone())
            .ok_or_else(|| TypeDefinitionError::InternalError {
                message: format!("no descriptor-matching overload of `{name}` on `{}`", self.qualified_name()),
            })
    }

    pub fn field_type(&self, name: &str, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<Option<TypeUsage>> {
        match self {
            TypeDefinition::Source(s) => {
                s.ensure_methods(universe, options)?;
                Ok(s.property_type(name).cloned())
            }
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => Ok(e.fields.get(&Name::from(name)).map(|f| f.declared_type.clone())),
        }
    }

    pub fn can_field_be_assigned(&self, name: &str) -> bool {
        match self {
            TypeDefinition::Source(s) => s.has_property(name),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => e.fields.get(&Name::from(name)).map(|f| f.assignable).unwrap_or(false),
        }
    }

    /// Default symbol lookup: scans direct properties (spec.md §4.3.1).
    pub fn find_symbol(&self, name: &str) -> Option<Symbol> {
        match self {
            TypeDefinition::Source(s) => s.has_property(name).then(|| Symbol::Property(Name::from(name))),
            TypeDefinition::Reflective(e) | TypeDefinition::Archive(e) => {
                e.fields.contains_key(&Name::from(name)).then(|| Symbol::Property(Name::from(name)))
            }
        }
    }

    /// Overridden-method interrogation (spec.md §4.3.6): only source types
    /// "redeclare" anything by this operation's definition.
    pub fn defines_to_string(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<bool> {
        self.declares_exact(universe, options, "toString", &[])
    }

    pub fn defines_hash_code(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<bool> {
        self.declares_exact(universe, options, "hashCode", &[])
    }

    pub fn defines_equals(&self, universe: &dyn TypeProvider, options: &CompilerOptions) -> Result<bool> {
        self.declares_exact(universe, options, "equals", &[FieldType::object(options.target_object_fqn.to_internal())])
    }

    fn declares_exact(&self, universe: &dyn TypeProvider, options: &CompilerOptions, name: &str, param_types: &[FieldType]) -> Result<bool> {
        let TypeDefinition::Source(s) = self else {
            return Ok(false);
        };
        let table = s.ensure_methods(universe, options)?;
        Ok(table
            .get(&Name::from(name))
            .map(|candidates| candidates.iter().any(|c| c.descriptor.params == param_types))
            .unwrap_or(false))
    }
}
