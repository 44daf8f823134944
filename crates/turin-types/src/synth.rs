//! Descriptor assembly and call-site binding, shared by every origin that
//! builds internal constructor/method signatures (spec.md §4.3.2-§4.3.5).

use std::collections::HashSet;

use turin_ast::{PrimitiveType, TypeUsage};
use turin_classfile::{BaseType, FieldType, MethodDescriptor, ReturnType};

use crate::argument::ActualArgument;
use crate::error::{Result, TypeDefinitionError};
use crate::member::FormalParameterInfo;
use crate::options::CompilerOptions;

const DEFAULTS_MAP_INTERNAL_NAME: &str = "java/util/Map";

fn primitive_base_type(primitive: PrimitiveType) -> BaseType {
    match primitive {
        PrimitiveType::Byte => BaseType::Byte,
        PrimitiveType::Char => BaseType::Char,
        PrimitiveType::Double => BaseType::Double,
        PrimitiveType::Float => BaseType::Float,
        PrimitiveType::Int => BaseType::Int,
        PrimitiveType::Long => BaseType::Long,
        PrimitiveType::Short => BaseType::Short,
        PrimitiveType::Boolean => BaseType::Boolean,
    }
}

/// Erases a type usage to its JVM field descriptor. Type variables are kept
/// opaque in this core (spec.md §9 open questions) and erase to the
/// configured root object type, matching the JVM's own generics erasure.
pub fn field_type_of(ty: &TypeUsage, options: &CompilerOptions) -> Result<FieldType> {
    match ty {
        TypeUsage::Primitive(p) => Ok(FieldType::Base(primitive_base_type(*p))),
        TypeUsage::Reference { name, .. } => Ok(FieldType::object(name.to_internal())),
        TypeUsage::ArrayOf(element) => Ok(FieldType::Array(Box::new(field_type_of(element, options)?))),
        TypeUsage::TypeVariable(_) => Ok(FieldType::object(options.target_object_fqn.to_internal())),
        TypeUsage::Void => Err(TypeDefinitionError::InternalError {
            message: "void type usage in a non-return position".to_string(),
        }),
    }
}

pub fn return_type_of(ty: &TypeUsage, options: &CompilerOptions) -> Result<ReturnType> {
    match ty {
        TypeUsage::Void => Ok(ReturnType::Void),
        other => Ok(ReturnType::Type(field_type_of(other, options)?)),
    }
}

/// Stable-sorts by "has default value", non-default parameters first
/// (spec.md §4.3.2 step 4). `Vec::sort_by_key` is documented stable, so
/// equally-classified parameters keep their relative order.
pub fn stable_sort_by_has_default(params: &mut [FormalParameterInfo]) {
    params.sort_by_key(|p| p.has_default);
}

/// Builds the descriptor for a constructor (spec.md §4.3.2 step 5, §4.3.3):
/// non-default parameters in order, then a trailing defaults-map parameter
/// iff at least one parameter has a default.
pub fn assemble_constructor_descriptor(
    params: &[FormalParameterInfo],
    options: &CompilerOptions,
) -> Result<MethodDescriptor> {
    let mut field_params = Vec::new();
    for param in params.iter().filter(|p| !p.has_default) {
        field_params.push(field_type_of(&param.declared_type, options)?);
    }
    if params.iter().any(|p| p.has_default) {
        field_params.push(FieldType::object(DEFAULTS_MAP_INTERNAL_NAME));
    }
    Ok(MethodDescriptor {
        params: field_params,
        return_type: ReturnType::Void,
    })
}

/// Builds a plain method descriptor from declared parameters verbatim, with
/// no default-map protocol -- spec.md only describes the named-defaults
/// wire contract for constructors (§4.3.2-§4.3.3).
pub fn assemble_method_descriptor(
    params: &[FormalParameterInfo],
    return_type: &TypeUsage,
    options: &CompilerOptions,
) -> Result<MethodDescriptor> {
    let field_params = params
        .iter()
        .map(|p| field_type_of(&p.declared_type, options))
        .collect::<Result<Vec<_>>>()?;
    Ok(MethodDescriptor {
        params: field_params,
        return_type: return_type_of(return_type, options)?,
    })
}

/// Whether `args` bind cleanly against `params` under the rule of spec.md
/// §4.3.5: every non-default parameter bound exactly once (positionally or
/// by name), every defaulted parameter optionally bound by name, with
/// positional excess, unknown names, and duplicate names all rejecting the
/// candidate. Assumes argument order was already validated (positional
/// arguments precede named ones).
pub fn binds_cleanly(params: &[FormalParameterInfo], args: &[ActualArgument]) -> bool {
    let mut bound = vec![false; params.len()];
    let mut used_names: HashSet<&str> = HashSet::new();
    let mut positional_idx = 0usize;

    for arg in args {
        match &arg.name {
            None => {
                if positional_idx >= params.len() || bound[positional_idx] {
                    return false;
                }
                bound[positional_idx] = true;
                positional_idx += 1;
            }
            Some(name) => {
                if !used_names.insert(name.as_str()) {
                    return false;
                }
                match params.iter().position(|p| p.name.as_str() == name.as_str()) {
                    Some(idx) if !bound[idx] => bound[idx] = true,
                    _ => return false,
                }
            }
        }
    }

    params.iter().zip(bound.iter()).all(|(p, &is_bound)| p.has_default || is_bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use turin_core::Name;

    fn param(name: &str, has_default: bool) -> FormalParameterInfo {
        FormalParameterInfo {
            name: Name::from(name),
            declared_type: TypeUsage::Primitive(PrimitiveType::Int),
            has_default,
        }
    }

    #[test]
    fn stable_sort_preserves_relative_order_within_group() {
        let mut params = vec![
            param("a", true),
            param("b", false),
            param("c", true),
            param("d", false),
        ];
        stable_sort_by_has_default(&mut params);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn constructor_descriptor_has_trailing_map_iff_any_default() {
        let options = CompilerOptions::default();
        let params = vec![param("x", false), param("y", true)];
        let descriptor = assemble_constructor_descriptor(&params, &options).unwrap();
        assert_eq!(descriptor.render(), "(ILjava/util/Map;)V");

        let no_defaults = vec![param("x", false)];
        let descriptor = assemble_constructor_descriptor(&no_defaults, &options).unwrap();
        assert_eq!(descriptor.render(), "(I)V");
    }

    #[test]
    fn binding_rejects_unknown_and_duplicate_names() {
        let params = vec![param("x", false), param("y", true)];
        assert!(binds_cleanly(&params, &[ActualArgument::positional()]));
        assert!(!binds_cleanly(&params, &[ActualArgument::named("y")]));
        assert!(!binds_cleanly(
            &params,
            &[ActualArgument::positional(), ActualArgument::named("z")]
        ));
        assert!(!binds_cleanly(
            &params,
            &[ActualArgument::named("x"), ActualArgument::named("x")]
        ));
    }
}
