use turin_classfile::{BaseType, ClassFile, FieldType, ReturnType};

/// Hand-assembles a minimal class file byte stream for:
///
/// ```java
/// class Simple extends Object { int f; void m() {} }
/// ```
///
/// with no bytecode bodies (the archive provider only needs metadata, per
/// spec.md §4.1 - the bytecode emitter is out of scope).
fn simple_classfile_bytes() -> Vec<u8> {
    let mut cp: Vec<Vec<u8>> = Vec::new();
    let mut push_utf8 = |s: &str| -> u16 {
        let mut entry = vec![1u8];
        entry.extend_from_slice(&(s.len() as u16).to_be_bytes());
        entry.extend_from_slice(s.as_bytes());
        cp.push(entry);
        cp.len() as u16
    };

    let this_name_utf8 = push_utf8("com/example/Simple");
    let super_name_utf8 = push_utf8("java/lang/Object");
    let field_name_utf8 = push_utf8("f");
    let field_desc_utf8 = push_utf8("I");
    let method_name_utf8 = push_utf8("m");
    let method_desc_utf8 = push_utf8("()V");

    let mut push_class = |name_index: u16| -> u16 {
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_index.to_be_bytes());
        cp.push(entry);
        cp.len() as u16
    };
    let this_class_idx = push_class(this_name_utf8);
    let super_class_idx = push_class(super_name_utf8);

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // minor
    bytes.extend_from_slice(&61u16.to_be_bytes()); // major (Java 17)

    bytes.extend_from_slice(&((cp.len() + 1) as u16).to_be_bytes());
    for entry in &cp {
        bytes.extend_from_slice(entry);
    }

    bytes.extend_from_slice(&0x0021u16.to_be_bytes()); // access_flags: ACC_PUBLIC | ACC_SUPER
    bytes.extend_from_slice(&this_class_idx.to_be_bytes());
    bytes.extend_from_slice(&super_class_idx.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces_count

    // fields_count = 1
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // access_flags
    bytes.extend_from_slice(&field_name_utf8.to_be_bytes());
    bytes.extend_from_slice(&field_desc_utf8.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes_count

    // methods_count = 1
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&0x0001u16.to_be_bytes()); // ACC_PUBLIC
    bytes.extend_from_slice(&method_name_utf8.to_be_bytes());
    bytes.extend_from_slice(&method_desc_utf8.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes_count

    bytes.extend_from_slice(&0u16.to_be_bytes()); // class attributes_count
    bytes
}

#[test]
fn parse_simple_classfile_and_stub() {
    let bytes = simple_classfile_bytes();
    let class = ClassFile::parse(&bytes).unwrap();
    assert_eq!(class.this_class, "com/example/Simple");
    assert_eq!(class.super_class.as_deref(), Some("java/lang/Object"));
    assert_eq!(class.fields.len(), 1);
    assert_eq!(class.fields[0].name, "f");
    assert_eq!(class.fields[0].descriptor, "I");

    let stub = class.stub().unwrap();
    assert_eq!(stub.internal_name, "com/example/Simple");
    assert_eq!(stub.fields[0].parsed_descriptor, FieldType::Base(BaseType::Int));

    let m = stub.methods.iter().find(|m| m.name == "m").unwrap();
    assert_eq!(m.parsed_descriptor.params.len(), 0);
    assert_eq!(m.parsed_descriptor.return_type, ReturnType::Void);
    assert!(!m.is_static());
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = simple_classfile_bytes();
    bytes[0] = 0;
    let err = ClassFile::parse(&bytes).unwrap_err();
    assert!(matches!(err, turin_classfile::Error::InvalidMagic(_)));
}
