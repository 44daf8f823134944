use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use turin_ast::{PrimitiveType, TypeDefKind, TypeUsage};
use turin_classfile::{BaseType, ClassFile, ClassStub, FieldType};
use turin_core::{Name, PackageName, QualifiedName};
use zip::ZipArchive;

use crate::error::{Result, TypeDefinitionError};
use crate::external::{ExternalFieldInfo, ExternalTypeDefinition};
use crate::member::{FormalParameterInfo, InternalConstructor, InternalMethod};
use crate::provider::TypeProvider;
use crate::type_definition::TypeDefinition;

/// Reads compiled class resources out of a zip-format archive (a `.jar`)
/// and builds type definitions from their class-file metadata (spec.md
/// §4.1). Lookups are memoized per qualified name once read; opening the
/// archive itself happens once, eagerly, at construction.
#[derive(Debug)]
pub struct ArchiveProvider {
    path: PathBuf,
    entries: HashMap<String, Vec<u8>>,
    cache: Mutex<HashMap<QualifiedName, TypeDefinition>>,
}

impl ArchiveProvider {
    #[tracing::instrument(level = "debug")]
    pub fn open(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "failed to open archive");
            TypeDefinitionError::MalformedArchive {
                path: path.display().to_string(),
                source: turin_classfile::Error::Other("could not open archive file"),
            }
        })?;
        let mut zip = ZipArchive::new(file).map_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "failed to read archive");
            TypeDefinitionError::MalformedArchive {
                path: path.display().to_string(),
                source: turin_classfile::Error::Other("not a valid zip archive"),
            }
        })?;

        let mut entries = HashMap::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).map_err(|err| {
                tracing::warn!(path = %path.display(), error = %err, "failed to read archive entry");
                TypeDefinitionError::MalformedArchive {
                    path: path.display().to_string(),
                    source: turin_classfile::Error::Other("corrupt zip entry"),
                }
            })?;
            if !entry.name().ends_with(".class") {
                continue;
            }
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            std::io::Read::read_to_end(&mut entry, &mut bytes).map_err(|_| TypeDefinitionError::MalformedArchive {
                path: path.display().to_string(),
                source: turin_classfile::Error::Other("failed reading class entry"),
            })?;
            let internal_name = entry.name().trim_end_matches(".class").to_string();
            entries.insert(internal_name, bytes);
        }

        Ok(Self {
            path,
            entries,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn parse(&self, name: &QualifiedName) -> Result<Option<ExternalTypeDefinition>> {
        let internal = name.to_internal();
        let Some(bytes) = self.entries.get(&internal) else {
            return Ok(None);
        };
        let class = ClassFile::parse(bytes).map_err(|err| TypeDefinitionError::MalformedArchive {
            path: self.path.display().to_string(),
            source: err,
        })?;
        let stub = class.stub().map_err(|err| TypeDefinitionError::MalformedArchive {
            path: self.path.display().to_string(),
            source: err,
        })?;
        Ok(Some(external_definition_from_stub(stub)))
    }
}

impl TypeProvider for ArchiveProvider {
    #[tracing::instrument(level = "trace", skip(self))]
    fn find_type_definition(&self, name: &QualifiedName) -> Option<TypeDefinition> {
        {
            let cache = self.cache.lock().expect("archive provider cache poisoned");
            if let Some(hit) = cache.get(name) {
                return Some(hit.clone());
            }
        }
        let built = match self.parse(name) {
            Ok(Some(def)) => def,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(name = %name, error = %err, "archive entry failed to parse");
                return None;
            }
        };
        let def = TypeDefinition::Archive(Arc::new(built));
        self.cache.lock().expect("archive provider cache poisoned").insert(name.clone(), def.clone());
        Some(def)
    }

    fn has_package(&self, name: &PackageName) -> bool {
        let prefix = format!("{}/", name.to_dotted().replace('.', "/"));
        self.entries.keys().any(|entry| entry.starts_with(&prefix))
    }
}

fn base_type_to_usage(base: BaseType) -> TypeUsage {
    TypeUsage::Primitive(match base {
        BaseType::Byte => PrimitiveType::Byte,
        BaseType::Char => PrimitiveType::Char,
        BaseType::Double => PrimitiveType::Double,
        BaseType::Float => PrimitiveType::Float,
        BaseType::Int => PrimitiveType::Int,
        BaseType::Long => PrimitiveType::Long,
        BaseType::Short => PrimitiveType::Short,
        BaseType::Boolean => PrimitiveType::Boolean,
    })
}

fn field_type_to_usage(field: &FieldType) -> TypeUsage {
    match field {
        FieldType::Base(base) => base_type_to_usage(*base),
        FieldType::Object(internal) => TypeUsage::reference(QualifiedName::from_internal(internal)),
        FieldType::Array(component) => TypeUsage::array_of(field_type_to_usage(component)),
    }
}

const ACC_INTERFACE: u16 = 0x0200;
const ACC_FINAL: u16 = 0x0010;

fn external_definition_from_stub(stub: ClassStub) -> ExternalTypeDefinition {
    let qualified_name = QualifiedName::from_internal(&stub.internal_name);
    let kind = if stub.access_flags & ACC_INTERFACE != 0 {
        TypeDefKind::Interface
    } else {
        TypeDefKind::Class
    };
    let base = stub.super_class.map(|name| TypeUsage::reference(QualifiedName::from_internal(&name)));
    let interfaces = stub
        .interfaces
        .iter()
        .map(|name| TypeUsage::reference(QualifiedName::from_internal(name)))
        .collect();

    let mut constructors = Vec::new();
    let mut methods: HashMap<Name, Vec<InternalMethod>> = HashMap::new();
    for method_stub in &stub.methods {
        let params: Vec<FormalParameterInfo> = method_stub
            .parsed_descriptor
            .params
            .iter()
            .enumerate()
            .map(|(i, field)| FormalParameterInfo {
                name: Name::from(format!("arg{i}")),
                declared_type: field_type_to_usage(field),
                has_default: false,
            })
            .collect();

        if method_stub.name == "<init>" {
            constructors.push(InternalConstructor {
                owner: qualified_name.clone(),
                params,
                descriptor: method_stub.parsed_descriptor.clone(),
            });
            continue;
        }

        let return_type = match &method_stub.parsed_descriptor.return_type {
            turin_classfile::ReturnType::Void => TypeUsage::Void,
            turin_classfile::ReturnType::Type(field) => field_type_to_usage(field),
        };
        let internal_method = InternalMethod {
            owner: qualified_name.clone(),
            name: Name::from(method_stub.name.clone()),
            params,
            return_type,
            descriptor: method_stub.parsed_descriptor.clone(),
            is_static: method_stub.is_static(),
            is_interface: kind == TypeDefKind::Interface,
        };
        methods.entry(internal_method.name.clone()).or_default().push(internal_method);
    }

    let mut fields = HashMap::new();
    for field_stub in &stub.fields {
        fields.insert(
            Name::from(field_stub.name.clone()),
            ExternalFieldInfo {
                declared_type: field_type_to_usage(&field_stub.parsed_descriptor),
                assignable: field_stub.access_flags & ACC_FINAL == 0,
            },
        );
    }

    ExternalTypeDefinition {
        qualified_name,
        kind,
        base,
        interfaces,
        constructors,
        methods,
        fields,
    }
}
