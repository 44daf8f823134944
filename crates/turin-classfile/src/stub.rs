use crate::classfile::ClassFile;
use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, FieldType, MethodDescriptor};
use crate::error::Result;
use crate::Annotation;

/// The metadata the archive type provider needs out of a parsed class file:
/// enough to build a [`crate::ClassFile`]-backed type definition without
/// keeping the raw bytes around.
#[derive(Debug, Clone)]
pub struct ClassStub {
    pub internal_name: String,
    pub access_flags: u16,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub fields: Vec<FieldStub>,
    pub methods: Vec<MethodStub>,
}

#[derive(Debug, Clone)]
pub struct FieldStub {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub parsed_descriptor: FieldType,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone)]
pub struct MethodStub {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub parsed_descriptor: MethodDescriptor,
    pub annotations: Vec<Annotation>,
}

const ACC_STATIC: u16 = 0x0008;

impl MethodStub {
    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }
}

impl ClassStub {
    pub fn from_classfile(class: &ClassFile) -> Result<Self> {
        let mut class_annotations = class.runtime_visible_annotations.clone();
        class_annotations.extend(class.runtime_invisible_annotations.clone());

        let fields = class
            .fields
            .iter()
            .map(|f| {
                let parsed_descriptor = parse_field_descriptor(&f.descriptor)?;
                Ok(FieldStub {
                    access_flags: f.access_flags,
                    name: f.name.clone(),
                    descriptor: f.descriptor.clone(),
                    parsed_descriptor,
                    annotations: {
                        let mut annotations = f.runtime_visible_annotations.clone();
                        annotations.extend(f.runtime_invisible_annotations.clone());
                        annotations
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let methods = class
            .methods
            .iter()
            .map(|m| {
                let parsed_descriptor = parse_method_descriptor(&m.descriptor)?;
                Ok(MethodStub {
                    access_flags: m.access_flags,
                    name: m.name.clone(),
                    descriptor: m.descriptor.clone(),
                    parsed_descriptor,
                    annotations: {
                        let mut annotations = m.runtime_visible_annotations.clone();
                        annotations.extend(m.runtime_invisible_annotations.clone());
                        annotations
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassStub {
            internal_name: class.this_class.clone(),
            access_flags: class.access_flags,
            super_class: class.super_class.clone(),
            interfaces: class.interfaces.clone(),
            annotations: class_annotations,
            fields,
            methods,
        })
    }
}

impl ClassFile {
    pub fn stub(&self) -> Result<ClassStub> {
        ClassStub::from_classfile(self)
    }
}
