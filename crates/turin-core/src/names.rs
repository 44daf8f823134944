//! Qualified, package, and type names.
//!
//! A qualified name is stored canonically (dot-separated, e.g.
//! `java.util.Map`) and converts to the JVM internal form (slash-separated,
//! e.g. `java/util/Map`) on demand. Round-tripping canonical -> internal ->
//! canonical must reproduce the original (spec.md §8).

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(SmolStr);

impl QualifiedName {
    /// Builds from canonical dotted form, e.g. `"java.util.Map"`.
    pub fn from_dotted(dotted: impl Into<SmolStr>) -> Self {
        Self(dotted.into())
    }

    /// Builds from JVM internal form, e.g. `"java/util/Map"`.
    pub fn from_internal(internal: &str) -> Self {
        Self(SmolStr::new(internal.replace('/', ".")))
    }

    pub fn to_dotted(&self) -> String {
        self.0.to_string()
    }

    pub fn to_internal(&self) -> String {
        self.0.replace('.', "/")
    }

    /// The namespace (all segments but the last), empty if unqualified.
    pub fn namespace(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The simple (unqualified) name, i.e. the final segment.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    pub fn join(namespace: &str, simple_name: &str) -> Self {
        if namespace.is_empty() {
            Self::from_dotted(simple_name)
        } else {
            Self::from_dotted(format!("{namespace}.{simple_name}"))
        }
    }
}

impl std::fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("QualifiedName").field(&self.0.as_str()).finish()
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::from_dotted(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self::from_dotted(value)
    }
}

/// The identity of a package, used by [`TypeIndex::package_exists`]-style
/// queries (`has_package` in spec.md §4.1/§4.2).
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct PackageName(QualifiedName);

impl PackageName {
    pub fn from_dotted(dotted: impl Into<SmolStr>) -> Self {
        Self(QualifiedName::from_dotted(dotted))
    }

    pub fn to_dotted(&self) -> String {
        self.0.to_dotted()
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_internal_round_trip() {
        let original = "com.example.Point";
        let qn = QualifiedName::from_dotted(original);
        assert_eq!(qn.to_internal(), "com/example/Point");
        let back = QualifiedName::from_internal(&qn.to_internal());
        assert_eq!(back.to_dotted(), original);
    }

    #[test]
    fn namespace_and_simple_name() {
        let qn = QualifiedName::from_dotted("com.example.Point");
        assert_eq!(qn.namespace(), "com.example");
        assert_eq!(qn.simple_name(), "Point");

        let unqualified = QualifiedName::from_dotted("Point");
        assert_eq!(unqualified.namespace(), "");
        assert_eq!(unqualified.simple_name(), "Point");
    }
}
