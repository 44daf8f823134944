use turin_core::Name;

/// A call-site argument, abstracted to exactly what constructor/method
/// resolution needs: whether it was written positionally or by name (spec.md
/// §4.3.5). No value or static type is carried here -- binding shape is all
/// this core's resolution rule inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualArgument {
    pub name: Option<Name>,
}

impl ActualArgument {
    pub fn positional() -> Self {
        Self { name: None }
    }

    pub fn named(name: impl Into<Name>) -> Self {
        Self { name: Some(name.into()) }
    }

    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }
}

/// Fails with [`crate::TypeDefinitionError::IllOrderedParameters`] if any
/// positional argument follows a named one.
pub fn validate_argument_order(args: &[ActualArgument], call_description: &str) -> crate::Result<()> {
    let mut seen_named = false;
    for arg in args {
        if arg.is_positional() {
            if seen_named {
                return Err(crate::TypeDefinitionError::IllOrderedParameters {
                    call_description: call_description.to_string(),
                });
            }
        } else {
            seen_named = true;
        }
    }
    Ok(())
}

pub fn describe_arguments(args: &[ActualArgument]) -> String {
    let rendered: Vec<String> = args
        .iter()
        .map(|arg| match &arg.name {
            Some(name) => format!("{name}=?"),
            None => "?".to_string(),
        })
        .collect();
    format!("({})", rendered.join(", "))
}
