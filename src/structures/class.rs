//! The fully decoded class.

use crate::constant_pool::resolved::{Constant, PoolResolver};
use crate::error::ErrorKind;
use crate::parsing::{fail, ByteResult};
use crate::raw_java_class::RawJavaClass;
use crate::structures::access_flags::{self, AccessFlag, CLASS_FLAGS, INNER_CLASS_FLAGS};
use crate::structures::attributes::{
    finish_body, pool_index, Attribute, AttributeReader, HookOutcome,
};
use crate::structures::class_path::ClassPath;
use crate::structures::members::{Member, MemberKind};
use crate::structures::signatures::{ClassSignature, FormalTypeParameter, Signature};
use log::debug;
use nom::number::complete::be_u16;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One record of the `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerClassRecord {
    pub inner: ClassPath,
    pub outer: Option<ClassPath>,
    /// The simple name; absent for anonymous classes.
    pub inner_name: Option<String>,
    pub flags: BTreeSet<AccessFlag>,
}

/// A java class, fully decoded: every constant resolved, every member's
/// descriptor parsed, and context-specific attributes folded into their
/// slots.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaClass {
    /// `(major, minor)` class file version.
    pub version: (u16, u16),
    /// The resolved constant pool, slot for slot.
    pub constants: Vec<Constant>,
    pub path: ClassPath,
    /// The super class; `java/lang/Object` when the file declares none.
    /// A class `Signature` attribute may refine this to a generic type.
    pub super_class: Signature,
    pub flags: BTreeSet<AccessFlag>,
    pub interfaces: Vec<Signature>,
    pub fields: Vec<Member>,
    pub methods: Vec<Member>,
    /// Class-level attributes not folded into dedicated slots.
    pub attributes: Vec<Attribute>,
    pub inner_classes: Vec<InnerClassRecord>,
    pub type_params: Vec<FormalTypeParameter>,
}

fn inner_classes_list<'i>(
    bytes: &'i [u8],
    resolver: &PoolResolver<'_>,
) -> ByteResult<'i, Vec<InnerClassRecord>> {
    let (mut bytes, num) = be_u16(bytes)?;
    let mut records = Vec::with_capacity(num as usize);
    for _ in 0..num {
        let (rest, inner_index) = be_u16(bytes)?;
        let (rest, outer_index) = be_u16(rest)?;
        let (rest, name_index) = be_u16(rest)?;
        let (rest, raw_flags) = be_u16(rest)?;
        let inner = match resolver.class_path(inner_index) {
            Ok(path) => path,
            Err(e) => return fail(rest, e),
        };
        let outer = match outer_index {
            0 => None,
            index => match resolver.class_path(index) {
                Ok(path) => Some(path),
                Err(e) => return fail(rest, e),
            },
        };
        let inner_name = match name_index {
            0 => None,
            index => match resolver.utf8_str(index) {
                Ok(name) => Some(name.to_string()),
                Err(e) => return fail(rest, e),
            },
        };
        let flags = match access_flags::flags_from_bits(raw_flags, INNER_CLASS_FLAGS) {
            Ok(flags) => flags,
            Err(e) => return fail(rest, e),
        };
        records.push(InnerClassRecord {
            inner,
            outer,
            inner_name,
            flags,
        });
        bytes = rest;
    }
    Ok((bytes, records))
}

impl JavaClass {
    pub(crate) fn from_raw(raw: &RawJavaClass) -> Result<Self, ErrorKind> {
        let resolver = PoolResolver::new(&raw.constant_pool);
        let constants = resolver.resolve_all()?;
        let reader = AttributeReader::new(&resolver, &constants);

        let flags = access_flags::flags_from_bits(raw.access_flags, CLASS_FLAGS)?;
        let path = resolver.class_path(raw.this_class)?;
        let mut super_class = if raw.super_class == 0 {
            Signature::java_lang_object()
        } else {
            Signature::class_reference(resolver.class_path(raw.super_class)?)
        };
        let mut interfaces = raw
            .interfaces
            .iter()
            .map(|&index| Ok(Signature::class_reference(resolver.class_path(index)?)))
            .collect::<Result<Vec<_>, ErrorKind>>()?;

        let fields = raw
            .fields
            .iter()
            .map(|member| Member::parse(member, MemberKind::Field, &reader))
            .collect::<Result<Vec<_>, _>>()?;
        let methods = raw
            .methods
            .iter()
            .map(|member| Member::parse(member, MemberKind::Method, &reader))
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner_classes = Vec::new();
        let mut type_params = Vec::new();
        let attributes = reader.read_all(&raw.attributes, |attr_name, body| match attr_name {
            "InnerClasses" => {
                inner_classes = finish_body(attr_name, inner_classes_list(body, &resolver))?;
                Ok(HookOutcome::Consumed)
            }
            "Signature" => {
                let index = pool_index(attr_name, body)?;
                let refined = ClassSignature::parse(resolver.utf8_str(index)?)?;
                type_params = refined.type_params;
                super_class = refined.super_class;
                interfaces = refined.interfaces;
                Ok(HookOutcome::Consumed)
            }
            _ => Ok(HookOutcome::Delegate),
        })?;

        debug!("decoded class {}", path);
        Ok(JavaClass {
            version: (raw.major, raw.minor),
            constants,
            path,
            super_class,
            flags,
            interfaces,
            fields,
            methods,
            attributes,
            inner_classes,
            type_params,
        })
    }
}

impl Display for JavaClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaClass")
            .field("this", &self.path.to_string())
            .field("super", &self.super_class.to_string())
            .field(
                "interfaces",
                &self
                    .interfaces
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
