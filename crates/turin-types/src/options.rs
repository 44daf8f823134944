use serde::{Deserialize, Serialize};
use turin_core::QualifiedName;

/// The one configuration knob this layer needs that `spec.md` leaves
/// implicit: which fully qualified name the reflective provider's default
/// ancestor resolves to (§4.3.1 `superclass()`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target_object_fqn: QualifiedName,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target_object_fqn: QualifiedName::from_dotted("java.lang.Object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_java_lang_object() {
        assert_eq!(CompilerOptions::default().target_object_fqn.to_dotted(), "java.lang.Object");
    }
}
