use std::collections::HashMap;

use once_cell::sync::OnceCell;
use turin_ast::{getter_name, setter_name, Ast, PropertyNode, TypeDef, TypeDefKind, TypeUsage};
use turin_core::{Name, QualifiedName};

use crate::error::{Result, TypeDefinitionError};
use crate::member::{FormalParameterInfo, InternalConstructor, InternalMethod};
use crate::options::CompilerOptions;
use crate::provider::TypeProvider;
use crate::synth::{assemble_constructor_descriptor, assemble_method_descriptor, stable_sort_by_has_default};

#[derive(Debug, Clone)]
struct PropertyInfo {
    name: Name,
    declared_type: TypeUsage,
    has_initializer: bool,
    has_default: bool,
}

#[derive(Debug, Clone)]
struct ExplicitMethodInfo {
    name: Name,
    params: Vec<FormalParameterInfo>,
    return_type: TypeUsage,
    is_static: bool,
}

#[derive(Debug, Clone)]
struct ExplicitConstructorInfo {
    params: Vec<FormalParameterInfo>,
}

/// A source-defined type (spec.md §4.3). The most intricate variant:
/// constructors and the method index are computed once, on first demand,
/// and memoized -- the three-state machine of §4.3.7.
#[derive(Debug)]
pub struct SourceTypeDefinition {
    pub(crate) qualified_name: QualifiedName,
    pub(crate) kind: TypeDefKind,
    pub(crate) base: Option<TypeUsage>,
    pub(crate) implements: Vec<TypeUsage>,
    properties: Vec<PropertyInfo>,
    explicit_methods: Vec<ExplicitMethodInfo>,
    explicit_constructor: Option<ExplicitConstructorInfo>,
    constructors: OnceCell<Vec<InternalConstructor>>,
    methods: OnceCell<HashMap<Name, Vec<InternalMethod>>>,
}

impl SourceTypeDefinition {
    /// Extracts a type's data-model view out of the AST. `ast` is consulted
    /// only to resolve `PropertyReference` nodes against a peer declaration
    /// (spec.md §3); the result owns everything it needs afterwards.
    pub fn from_ast(type_def: &TypeDef, qualified_name: QualifiedName, ast: &Ast) -> Result<Self> {
        if type_def.constructors.len() > 1 {
            return Err(TypeDefinitionError::MultipleExplicitConstructors {
                type_name: qualified_name,
            });
        }

        let mut properties = Vec::with_capacity(type_def.properties.len());
        for &prop_id in &type_def.properties {
            let node = &ast.properties[prop_id];
            properties.push(resolve_property(node, ast)?);
        }

        let mut seen_method_names = std::collections::HashSet::new();
        let mut explicit_methods = Vec::with_capacity(type_def.methods.len());
        for &method_id in &type_def.methods {
            let method = &ast.methods[method_id];
            if !seen_method_names.insert(method.name.as_str().to_string()) {
                return Err(TypeDefinitionError::InternalError {
                    message: format!(
                        "type `{qualified_name}` declares method `{}` more than once; \
                         duplicate direct method names must be rejected during validation \
                         before a type definition is built",
                        method.name
                    ),
                });
            }
            explicit_methods.push(ExplicitMethodInfo {
                name: method.name.clone(),
                params: method
                    .params
                    .iter()
                    .map(|p| FormalParameterInfo {
                        name: p.name.clone(),
                        declared_type: p.declared_type.clone(),
                        has_default: p.has_default(),
                    })
                    .collect(),
                return_type: method.return_type.clone(),
                is_static: method.is_static,
            });
        }

        let explicit_constructor = type_def.constructors.first().map(|&ctor_id| {
            let ctor = &ast.constructors[ctor_id];
            ExplicitConstructorInfo {
                params: ctor
                    .params
                    .iter()
                    .map(|p| FormalParameterInfo {
                        name: p.name.clone(),
                        declared_type: p.declared_type.clone(),
                        has_default: p.has_default(),
                    })
                    .collect(),
            }
        });

        Ok(Self {
            qualified_name,
            kind: type_def.kind,
            base: type_def.base.clone(),
            implements: type_def.implements.clone(),
            properties,
            explicit_methods,
            explicit_constructor,
            constructors: OnceCell::new(),
            methods: OnceCell::new(),
        })
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    pub fn kind(&self) -> TypeDefKind {
        self.kind
    }

    pub fn base(&self) -> Option<&TypeUsage> {
        self.base.as_ref()
    }

    pub fn implements(&self) -> &[TypeUsage] {
        &self.implements
    }

    pub fn property_type(&self, name: &str) -> Option<&TypeUsage> {
        self.properties.iter().find(|p| p.name.as_str() == name).map(|p| &p.declared_type)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name.as_str() == name)
    }

    /// Declared → ConstructorsInitialized: the first transition of the
    /// state machine (spec.md §4.3.7). `OnceCell::get_or_try_init` makes
    /// this idempotent and memoized for free.
    #[tracing::instrument(level = "debug", skip(self, universe, options), fields(type_name = %self.qualified_name))]
    pub fn ensure_constructors(
        &self,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<&Vec<InternalConstructor>> {
        self.constructors.get_or_try_init(|| {
            tracing::debug!(type_name = %self.qualified_name, "Declared -> ConstructorsInitialized");
            self.build_constructors(universe, options)
        })
    }

    /// ConstructorsInitialized → FullyInitialized. Reachable directly from
    /// Declared if this is the first query: `ensure_constructors` is called
    /// first regardless, since method materialization never needs the
    /// inherited-constructor lookup that gates the first transition.
    #[tracing::instrument(level = "debug", skip(self, universe, options), fields(type_name = %self.qualified_name))]
    pub fn ensure_methods(
        &self,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<&HashMap<Name, Vec<InternalMethod>>> {
        self.ensure_constructors(universe, options)?;
        self.methods.get_or_try_init(|| {
            tracing::debug!(type_name = %self.qualified_name, "ConstructorsInitialized -> FullyInitialized");
            self.build_methods(options)
        })
    }

    fn build_constructors(
        &self,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<Vec<InternalConstructor>> {
        let params = if let Some(explicit) = &self.explicit_constructor {
            explicit.params.clone()
        } else {
            self.synthesize_implicit_params(universe, options)?
        };
        let descriptor = assemble_constructor_descriptor(&params, options)?;
        Ok(vec![InternalConstructor {
            owner: self.qualified_name.clone(),
            params,
            descriptor,
        }])
    }

    /// Implicit constructor synthesis (spec.md §4.3.2).
    fn synthesize_implicit_params(
        &self,
        universe: &dyn TypeProvider,
        options: &CompilerOptions,
    ) -> Result<Vec<FormalParameterInfo>> {
        let inherited = match &self.base {
            None => Vec::new(),
            Some(base_usage) => {
                let base_name = base_usage.as_reference_name().ok_or_else(|| TypeDefinitionError::InvalidExtension {
                    type_name: self.qualified_name.clone(),
                    base_name: QualifiedName::from_dotted(format!("{base_usage:?}")),
                })?;
                let base_def = universe.find_type_definition(base_name).ok_or_else(|| TypeDefinitionError::InternalError {
                    message: format!("base type `{base_name}` of `{}` not found in the resolved universe", self.qualified_name),
                })?;
                let base_constructors = base_def.constructors(universe, options)?;
                if base_constructors.len() != 1 {
                    return Err(TypeDefinitionError::UnsupportedInheritance {
                        type_name: self.qualified_name.clone(),
                        base_name: base_name.clone(),
                        constructor_count: base_constructors.len(),
                    });
                }
                base_constructors[0].params.clone()
            }
        };

        let assignable: Vec<FormalParameterInfo> = self
            .properties
            .iter()
            .filter(|p| !p.has_initializer)
            .map(|p| FormalParameterInfo {
                name: p.name.clone(),
                declared_type: p.declared_type.clone(),
                has_default: p.has_default,
            })
            .collect();

        let mut combined = inherited;
        combined.extend(assignable);
        stable_sort_by_has_default(&mut combined);
        Ok(combined)
    }

    fn build_methods(&self, options: &CompilerOptions) -> Result<HashMap<Name, Vec<InternalMethod>>> {
        let mut table: HashMap<Name, Vec<InternalMethod>> = HashMap::new();

        for property in &self.properties {
            let getter = InternalMethod {
                owner: self.qualified_name.clone(),
                name: Name::from(getter_name(property.name.as_str())),
                params: Vec::new(),
                return_type: property.declared_type.clone(),
                descriptor: assemble_method_descriptor(&[], &property.declared_type, options)?,
                is_static: false,
                is_interface: self.kind == TypeDefKind::Interface,
            };
            let setter_param = FormalParameterInfo {
                name: property.name.clone(),
                declared_type: property.declared_type.clone(),
                has_default: false,
            };
            let setter = InternalMethod {
                owner: self.qualified_name.clone(),
                name: Name::from(setter_name(property.name.as_str())),
                params: vec![setter_param.clone()],
                return_type: TypeUsage::Void,
                descriptor: assemble_method_descriptor(std::slice::from_ref(&setter_param), &TypeUsage::Void, options)?,
                is_static: false,
                is_interface: self.kind == TypeDefKind::Interface,
            };
            table.entry(getter.name.clone()).or_default().push(getter);
            table.entry(setter.name.clone()).or_default().push(setter);
        }

        for method in &self.explicit_methods {
            let internal = InternalMethod {
                owner: self.qualified_name.clone(),
                name: method.name.clone(),
                params: method.params.clone(),
                return_type: method.return_type.clone(),
                descriptor: assemble_method_descriptor(&method.params, &method.return_type, options)?,
                is_static: method.is_static,
                is_interface: self.kind == TypeDefKind::Interface,
            };
            table.entry(internal.name.clone()).or_default().push(internal);
        }

        Ok(table)
    }
}

fn resolve_property(node: &PropertyNode, ast: &Ast) -> Result<PropertyInfo> {
    match node {
        PropertyNode::Definition(def) => Ok(PropertyInfo {
            name: def.name.clone(),
            declared_type: def.declared_type.clone(),
            has_initializer: def.initializer.is_some(),
            has_default: def.default_value.is_some(),
        }),
        PropertyNode::Reference(reference) => {
            for (_, peer) in ast.type_defs.iter() {
                for &prop_id in &peer.properties {
                    if let PropertyNode::Definition(def) = &ast.properties[prop_id] {
                        if def.name.as_str() == reference.name.as_str() {
                            return Ok(PropertyInfo {
                                name: def.name.clone(),
                                declared_type: def.declared_type.clone(),
                                has_initializer: def.initializer.is_some(),
                                has_default: def.default_value.is_some(),
                            });
                        }
                    }
                }
            }
            Err(TypeDefinitionError::InternalError {
                message: format!("property reference `{}` did not resolve against any peer declaration", reference.name),
            })
        }
    }
}
