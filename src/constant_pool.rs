//! The constant pool: raw entries as they sit in the file, and the
//! expansion into self-contained resolved constants.
//!
//! Decoding happens in two phases. [`parser`] reads the tag-switched raw
//! entries, leaving every cross-reference as a bare index. [`resolved`]
//! then walks the raw pool once and chases each index into an owned
//! [`Constant`](resolved::Constant) that no longer refers back into the
//! pool.

use crate::error::ErrorKind;

pub(crate) mod parser;
pub(crate) mod resolved;

/// Constant pool entry tags, as assigned by the class file format.
pub(crate) mod tags {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELD_REF: u8 = 9;
    pub const METHOD_REF: u8 = 10;
    pub const INTERFACE_METHOD_REF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const INVOKE_DYNAMIC: u8 = 18;
}

/// The kind of member reference a method handle constant points at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl ReferenceKind {
    /// Maps a raw reference kind tag to its variant.
    pub(crate) fn from_tag(tag: u8) -> Result<Self, ErrorKind> {
        match tag {
            1 => Ok(ReferenceKind::GetField),
            2 => Ok(ReferenceKind::GetStatic),
            3 => Ok(ReferenceKind::PutField),
            4 => Ok(ReferenceKind::PutStatic),
            5 => Ok(ReferenceKind::InvokeVirtual),
            6 => Ok(ReferenceKind::InvokeStatic),
            7 => Ok(ReferenceKind::InvokeSpecial),
            8 => Ok(ReferenceKind::NewInvokeSpecial),
            9 => Ok(ReferenceKind::InvokeInterface),
            other => Err(ErrorKind::BadReferenceKind(other)),
        }
    }
}

/// The `cp_info` structure before any cross-reference has been resolved.
///
/// Index fields are 1-based pool indices, already range-checked against the
/// declared pool size by the parser.
#[derive(Debug, Clone)]
pub(crate) enum ConstantPoolInfo {
    /// Slot 0, and the phantom slot after every `Long`/`Double` entry.
    Unusable,
    Utf8(Box<[u8]>),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class {
        name_index: u16,
    },
    String {
        string_index: u16,
    },
    FieldRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    MethodRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    MethodHandle {
        reference_kind: ReferenceKind,
        reference_index: u16,
    },
    MethodType {
        descriptor_index: u16,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
}

/// The raw constant pool. Slot 0 is always [`ConstantPoolInfo::Unusable`].
#[derive(Debug, Clone)]
pub(crate) struct ConstantPool {
    pool: Vec<ConstantPoolInfo>,
}

impl ConstantPool {
    pub(crate) fn new(pool: Vec<ConstantPoolInfo>) -> Self {
        Self { pool }
    }

    /// Constant pools are accessed with 1-based `u16` indices.
    pub(crate) fn get(&self, index: u16) -> Option<&ConstantPoolInfo> {
        self.pool.get(index as usize)
    }

    /// Number of slots, counting slot 0.
    pub(crate) fn len(&self) -> u16 {
        self.pool.len() as u16
    }
}
