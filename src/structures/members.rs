//! Fields and methods of a class.

use crate::constant_pool::resolved::{Constant, PoolResolver};
use crate::error::ErrorKind;
use crate::parsing::{fail, ByteResult};
use crate::raw_java_class::RawMemberInfo;
use crate::structures::access_flags::{self, AccessFlag, FIELD_FLAGS, METHOD_FLAGS};
use crate::structures::attributes::{
    finish_body, pool_index, Attribute, AttributeReader, HookOutcome,
};
use crate::structures::signatures::{FormalTypeParameter, MethodSignature, Signature};
use nom::number::complete::be_u16;
use std::collections::BTreeSet;

/// Whether a member is a field or a method.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method, with its context-specific attributes already folded
/// into dedicated slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// The erased type from the descriptor.
    pub vm_signature: Signature,
    /// The generic view of the type. Identical to [`vm_signature`][Self::vm_signature]
    /// unless a `Signature` attribute refined it.
    pub signature: Signature,
    /// Declared thrown types (methods only).
    pub throws: Vec<Signature>,
    /// Declared formal type parameters (methods only).
    pub type_params: Vec<FormalTypeParameter>,
    pub flags: BTreeSet<AccessFlag>,
    /// Attributes not folded into one of the slots above.
    pub attributes: Vec<Attribute>,
    /// A field's `ConstantValue`, already resolved.
    pub constant: Option<Constant>,
    /// A method's `Code` attribute, preserved as an opaque byte block.
    pub code: Option<Attribute>,
}

fn exceptions_list<'i>(
    bytes: &'i [u8],
    resolver: &PoolResolver<'_>,
) -> ByteResult<'i, Vec<Signature>> {
    let (mut bytes, num) = be_u16(bytes)?;
    let mut throws = Vec::with_capacity(num as usize);
    for _ in 0..num {
        let (rest, class_index) = be_u16(bytes)?;
        let path = match resolver.class_path(class_index) {
            Ok(path) => path,
            Err(e) => return fail(rest, e),
        };
        throws.push(Signature::class_reference(path));
        bytes = rest;
    }
    Ok((bytes, throws))
}

impl Member {
    pub(crate) fn parse(
        raw: &RawMemberInfo,
        kind: MemberKind,
        reader: &AttributeReader<'_>,
    ) -> Result<Member, ErrorKind> {
        let table = match kind {
            MemberKind::Field => FIELD_FLAGS,
            MemberKind::Method => METHOD_FLAGS,
        };
        let mut flags = access_flags::flags_from_bits(raw.access_flags, table)?;

        let resolver = reader.resolver();
        let name = resolver.utf8_str(raw.name_index)?.to_string();
        let descriptor = resolver.utf8_str(raw.descriptor_index)?;
        let vm_signature = match kind {
            MemberKind::Field => {
                let parsed = Signature::parse(descriptor)?;
                if matches!(parsed, Signature::Method { .. }) {
                    return Err(ErrorKind::InvalidSignature(descriptor.to_string()));
                }
                parsed
            }
            MemberKind::Method => Signature::parse_method(descriptor)?,
        };

        let mut signature = vm_signature.clone();
        let mut throws = Vec::new();
        let mut type_params = Vec::new();
        let mut constant = None;
        let mut code = None;

        let attributes = reader.read_all(&raw.attributes, |attr_name, body| {
            match (kind, attr_name) {
                (MemberKind::Field, "ConstantValue") => {
                    let index = pool_index(attr_name, body)?;
                    constant = Some(reader.constant(index)?);
                    Ok(HookOutcome::Consumed)
                }
                (MemberKind::Field, "Synthetic") => {
                    if !body.is_empty() {
                        return Err(ErrorKind::MalformedAttribute(attr_name.to_string()));
                    }
                    flags.insert(AccessFlag::Synthetic);
                    Ok(HookOutcome::Consumed)
                }
                (MemberKind::Field, "Signature") => {
                    let index = pool_index(attr_name, body)?;
                    let refined = Signature::parse(resolver.utf8_str(index)?)?;
                    // the refinement must still describe a field
                    if matches!(refined, Signature::Method { .. }) {
                        return Err(ErrorKind::MalformedAttribute(attr_name.to_string()));
                    }
                    signature = refined;
                    Ok(HookOutcome::Consumed)
                }
                (MemberKind::Method, "Signature") => {
                    let index = pool_index(attr_name, body)?;
                    let refined = MethodSignature::parse(resolver.utf8_str(index)?)?;
                    signature = refined.signature;
                    type_params = refined.type_params;
                    if !refined.throws.is_empty() {
                        throws = refined.throws;
                    }
                    Ok(HookOutcome::Consumed)
                }
                (MemberKind::Method, "Code") => {
                    let attribute = Attribute::Unknown {
                        name: attr_name.to_string(),
                        info: body.to_vec().into_boxed_slice(),
                    };
                    code = Some(attribute.clone());
                    Ok(HookOutcome::Keep(attribute))
                }
                (MemberKind::Method, "Exceptions") => {
                    throws = finish_body(attr_name, exceptions_list(body, resolver))?;
                    Ok(HookOutcome::Consumed)
                }
                _ => Ok(HookOutcome::Delegate),
            }
        })?;

        Ok(Member {
            name,
            kind,
            vm_signature,
            signature,
            throws,
            type_params,
            flags,
            attributes,
            constant,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant_pool::{ConstantPool, ConstantPoolInfo};

    fn utf8(text: &str) -> ConstantPoolInfo {
        ConstantPoolInfo::Utf8(text.as_bytes().to_vec().into_boxed_slice())
    }

    fn fixture_pool() -> ConstantPool {
        ConstantPool::new(vec![
            ConstantPoolInfo::Unusable,
            utf8("value"),                         // 1
            utf8("I"),                             // 2
            utf8("ConstantValue"),                 // 3
            ConstantPoolInfo::Integer(17),         // 4
            utf8("run"),                           // 5
            utf8("(Ljava/lang/Object;)V"),         // 6
            utf8("Signature"),                     // 7
            utf8("<T:Ljava/lang/Object;>(TT;)V"),  // 8
            utf8("Code"),                          // 9
            utf8("Exceptions"),                    // 10
            ConstantPoolInfo::Class { name_index: 12 }, // 11
            utf8("java/io/IOException"),           // 12
            utf8("Synthetic"),                     // 13
        ])
    }

    fn raw_member(
        access_flags: u16,
        name_index: u16,
        descriptor_index: u16,
        attributes: Vec<(u16, Vec<u8>)>,
    ) -> RawMemberInfo {
        RawMemberInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes: attributes
                .into_iter()
                .map(|(name_index, info)| crate::raw_java_class::RawAttributeInfo {
                    name_index,
                    info: info.into_boxed_slice(),
                })
                .collect(),
        }
    }

    fn with_reader<T>(run: impl FnOnce(&AttributeReader<'_>) -> T) -> T {
        let pool = fixture_pool();
        let resolver = PoolResolver::new(&pool);
        let constants = resolver.resolve_all().unwrap();
        let reader = AttributeReader::new(&resolver, &constants);
        run(&reader)
    }

    #[test]
    fn field_constant_value_is_folded() {
        let member = with_reader(|reader| {
            let raw = raw_member(0x0019, 1, 2, vec![(3, vec![0, 4])]);
            Member::parse(&raw, MemberKind::Field, reader).unwrap()
        });
        assert_eq!(member.name, "value");
        assert_eq!(member.vm_signature, Signature::Int);
        assert_eq!(member.constant, Some(Constant::Integer(17)));
        assert!(member.attributes.is_empty());
        assert_eq!(
            member.flags,
            BTreeSet::from([AccessFlag::Public, AccessFlag::Static, AccessFlag::Final])
        );
    }

    #[test]
    fn field_synthetic_attribute_becomes_a_flag() {
        let member = with_reader(|reader| {
            let raw = raw_member(0x0002, 1, 2, vec![(13, vec![])]);
            Member::parse(&raw, MemberKind::Field, reader).unwrap()
        });
        assert!(member.flags.contains(&AccessFlag::Synthetic));
        assert!(member.attributes.is_empty());
    }

    #[test]
    fn method_signature_attribute_overrides_descriptor() {
        let member = with_reader(|reader| {
            let raw = raw_member(0x0001, 5, 6, vec![(7, vec![0, 8])]);
            Member::parse(&raw, MemberKind::Method, reader).unwrap()
        });
        assert_eq!(
            member.vm_signature.to_string(),
            "(Ljava/lang/Object;)V"
        );
        assert_eq!(member.signature.to_string(), "(TT;)V");
        assert_eq!(member.type_params.len(), 1);
        assert_eq!(member.type_params[0].name, "T");
        assert_eq!(
            member.type_params[0].class_bound.as_ref().map(|b| b.to_string()),
            Some("Ljava/lang/Object;".to_string())
        );
        assert!(member.type_params[0].interface_bounds.is_empty());
    }

    #[test]
    fn method_code_is_kept_twice() {
        let member = with_reader(|reader| {
            let raw = raw_member(0x0001, 5, 6, vec![(9, vec![1, 2, 3, 4])]);
            Member::parse(&raw, MemberKind::Method, reader).unwrap()
        });
        let expected = Attribute::Unknown {
            name: "Code".to_string(),
            info: vec![1, 2, 3, 4].into_boxed_slice(),
        };
        assert_eq!(member.code, Some(expected.clone()));
        assert_eq!(member.attributes, vec![expected]);
    }

    #[test]
    fn method_exceptions_fill_throws() {
        let member = with_reader(|reader| {
            let raw = raw_member(0x0001, 5, 6, vec![(10, vec![0, 1, 0, 11])]);
            Member::parse(&raw, MemberKind::Method, reader).unwrap()
        });
        assert_eq!(member.throws.len(), 1);
        assert_eq!(member.throws[0].to_string(), "Ljava/io/IOException;");
        assert!(member.attributes.is_empty());
    }

    #[test]
    fn field_descriptor_must_not_be_a_method_type() {
        let err = with_reader(|reader| {
            let raw = raw_member(0x0001, 1, 6, vec![]);
            Member::parse(&raw, MemberKind::Field, reader).unwrap_err()
        });
        assert!(matches!(err, ErrorKind::InvalidSignature(_)));
    }
}
