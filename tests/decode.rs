//! Whole-file decode tests over synthetic class images.

use classfile_reader::error::ErrorKind;
use classfile_reader::{
    parse_class_bytes, AccessFlag, Attribute, Constant, MemberKind, Signature,
};

fn utf8_const(text: &str) -> Vec<u8> {
    let mut entry = vec![1];
    entry.extend((text.len() as u16).to_be_bytes());
    entry.extend(text.as_bytes());
    entry
}

fn class_const(name_index: u16) -> Vec<u8> {
    let mut entry = vec![7];
    entry.extend(name_index.to_be_bytes());
    entry
}

fn long_const(value: i64) -> Vec<u8> {
    let mut entry = vec![5];
    entry.extend(value.to_be_bytes());
    entry
}

fn int_const(value: i32) -> Vec<u8> {
    let mut entry = vec![3];
    entry.extend(value.to_be_bytes());
    entry
}

/// Assembles a class file image: header, a pool with the given declared
/// slot count, then the caller-provided remainder of the file.
fn class_file(count: u16, pool: &[Vec<u8>], body: &[u8]) -> Vec<u8> {
    let mut file = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
    file.extend(count.to_be_bytes());
    for entry in pool {
        file.extend(entry);
    }
    file.extend(body);
    file
}

#[test]
fn decodes_a_minimal_class() {
    let pool = [
        class_const(2),                        // 1: this
        utf8_const("com/example/Square"),      // 2
        class_const(4),                        // 3: super
        utf8_const("com/example/Rectangle"),   // 4
        utf8_const("width"),                   // 5
        utf8_const("I"),                       // 6
        utf8_const("area"),                    // 7
        utf8_const("()I"),                     // 8
        utf8_const("Code"),                    // 9
    ];
    let mut body = Vec::new();
    body.extend(0x0021u16.to_be_bytes()); // public super
    body.extend(1u16.to_be_bytes()); // this
    body.extend(3u16.to_be_bytes()); // super
    body.extend(0u16.to_be_bytes()); // no interfaces
    // one field: private int width
    body.extend(1u16.to_be_bytes());
    body.extend(0x0002u16.to_be_bytes());
    body.extend(5u16.to_be_bytes());
    body.extend(6u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    // one method: public int area() with an opaque Code attribute
    body.extend(1u16.to_be_bytes());
    body.extend(0x0001u16.to_be_bytes());
    body.extend(7u16.to_be_bytes());
    body.extend(8u16.to_be_bytes());
    body.extend(1u16.to_be_bytes());
    body.extend(9u16.to_be_bytes()); // attribute name: Code
    body.extend(4u32.to_be_bytes()); // attribute length
    body.extend([0xB1, 0, 0, 0]); // opaque bytecode
    // no class attributes
    body.extend(0u16.to_be_bytes());

    let class = parse_class_bytes(&class_file(10, &pool, &body)).expect("should decode");

    assert_eq!(class.version, (52, 0));
    assert_eq!(class.path.to_string(), "com/example/Square");
    assert_eq!(
        class.super_class.to_string(),
        "Lcom/example/Rectangle;"
    );
    assert!(class.flags.contains(&AccessFlag::Public));

    assert_eq!(class.fields.len(), 1);
    let width = &class.fields[0];
    assert_eq!(width.kind, MemberKind::Field);
    assert_eq!(width.name, "width");
    assert_eq!(width.vm_signature, Signature::Int);
    assert_eq!(width.signature, Signature::Int);
    assert!(width.flags.contains(&AccessFlag::Private));

    assert_eq!(class.methods.len(), 1);
    let area = &class.methods[0];
    assert_eq!(area.kind, MemberKind::Method);
    assert_eq!(area.name, "area");
    assert_eq!(area.signature.to_string(), "()I");
    assert_eq!(
        area.code,
        Some(Attribute::Unknown {
            name: "Code".to_string(),
            info: vec![0xB1, 0, 0, 0].into_boxed_slice(),
        })
    );
}

#[test]
fn wide_constants_leave_an_unusable_slot() {
    // declared count 6: long (slots 1-2), int (3), class (4), utf8 (5)
    let pool = [
        long_const(7),
        int_const(9),
        class_const(5),
        utf8_const("Foo"),
    ];
    let mut body = Vec::new();
    body.extend(0x0021u16.to_be_bytes());
    body.extend(4u16.to_be_bytes()); // this
    body.extend(0u16.to_be_bytes()); // no super
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());

    let class = parse_class_bytes(&class_file(6, &pool, &body)).expect("should decode");

    assert_eq!(class.constants.len(), 6);
    assert_eq!(class.constants[0], Constant::Unusable);
    assert_eq!(class.constants[1], Constant::Long(7));
    assert_eq!(class.constants[2], Constant::Unusable);
    assert_eq!(class.constants[3], Constant::Integer(9));
    // a missing super class defaults to java/lang/Object
    assert_eq!(class.super_class, Signature::java_lang_object());
}

#[test]
fn bad_magic_is_rejected() {
    let err = parse_class_bytes(&[0x00, 0x01, 0x02, 0x03, 0, 0, 0, 52]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::BadMagic(0x00010203)));
}

#[test]
fn trailing_bytes_are_rejected() {
    let pool = [class_const(2), utf8_const("Foo")];
    let mut body = Vec::new();
    body.extend(0x0021u16.to_be_bytes());
    body.extend(1u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());
    body.extend(0u16.to_be_bytes());

    let mut file = class_file(3, &pool, &body);
    assert!(parse_class_bytes(&file).is_ok());

    file.push(0xFF);
    let err = parse_class_bytes(&file).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TrailingBytes(1)));
}

#[test]
fn truncated_file_is_rejected() {
    let pool = [class_const(2), utf8_const("Foo")];
    let file = class_file(3, &pool, &[0x00, 0x21]);
    let err = parse_class_bytes(&file).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Truncated));
}
