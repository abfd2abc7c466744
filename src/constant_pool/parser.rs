//! Phase one: reading the tag-switched raw pool entries.

use crate::constant_pool::{tags, ConstantPool, ConstantPoolInfo, ReferenceKind};
use crate::error::ErrorKind;
use crate::parsing::{fail, ByteResult};

use nom::bytes::complete::take;
use nom::number::complete::{be_f32, be_f64, be_i32, be_i64, be_u16, be_u8};

/// Reads a pool index and range-checks it against the declared pool size.
/// Index 0 and indices past the pool are never valid as references.
fn checked_index(count: u16) -> impl Fn(&[u8]) -> ByteResult<'_, u16> {
    move |input: &[u8]| {
        let (rest, index) = be_u16(input)?;
        if index == 0 || index >= count {
            return fail(input, ErrorKind::InvalidConstantIndex(index));
        }
        Ok((rest, index))
    }
}

fn parse_constant_pool_info(count: u16) -> impl Fn(&[u8]) -> ByteResult<'_, ConstantPoolInfo> {
    move |input: &[u8]| {
        let index = checked_index(count);
        let (rest, tag) = be_u8(input)?;
        match tag {
            tags::UTF8 => {
                let (rest, length) = be_u16(rest)?;
                let (rest, bytes) = take(length)(rest)?;
                Ok((rest, ConstantPoolInfo::Utf8(Vec::from(bytes).into_boxed_slice())))
            }
            tags::INTEGER => {
                let (rest, value) = be_i32(rest)?;
                Ok((rest, ConstantPoolInfo::Integer(value)))
            }
            tags::FLOAT => {
                let (rest, value) = be_f32(rest)?;
                Ok((rest, ConstantPoolInfo::Float(value)))
            }
            tags::LONG => {
                let (rest, value) = be_i64(rest)?;
                Ok((rest, ConstantPoolInfo::Long(value)))
            }
            tags::DOUBLE => {
                let (rest, value) = be_f64(rest)?;
                Ok((rest, ConstantPoolInfo::Double(value)))
            }
            tags::CLASS => {
                let (rest, name_index) = index(rest)?;
                Ok((rest, ConstantPoolInfo::Class { name_index }))
            }
            tags::STRING => {
                let (rest, string_index) = index(rest)?;
                Ok((rest, ConstantPoolInfo::String { string_index }))
            }
            tags::FIELD_REF => {
                let (rest, class_index) = index(rest)?;
                let (rest, name_and_type_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::FieldRef {
                        class_index,
                        name_and_type_index,
                    },
                ))
            }
            tags::METHOD_REF => {
                let (rest, class_index) = index(rest)?;
                let (rest, name_and_type_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::MethodRef {
                        class_index,
                        name_and_type_index,
                    },
                ))
            }
            tags::INTERFACE_METHOD_REF => {
                let (rest, class_index) = index(rest)?;
                let (rest, name_and_type_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::InterfaceMethodRef {
                        class_index,
                        name_and_type_index,
                    },
                ))
            }
            tags::NAME_AND_TYPE => {
                let (rest, name_index) = index(rest)?;
                let (rest, descriptor_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::NameAndType {
                        name_index,
                        descriptor_index,
                    },
                ))
            }
            tags::METHOD_HANDLE => {
                let (rest, kind_tag) = be_u8(rest)?;
                let reference_kind = match ReferenceKind::from_tag(kind_tag) {
                    Ok(kind) => kind,
                    Err(e) => return fail(input, e),
                };
                let (rest, reference_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::MethodHandle {
                        reference_kind,
                        reference_index,
                    },
                ))
            }
            tags::METHOD_TYPE => {
                let (rest, descriptor_index) = index(rest)?;
                Ok((rest, ConstantPoolInfo::MethodType { descriptor_index }))
            }
            tags::INVOKE_DYNAMIC => {
                // the bootstrap index points into the BootstrapMethods
                // attribute, not the pool, so it is not range-checked here
                let (rest, bootstrap_method_attr_index) = be_u16(rest)?;
                let (rest, name_and_type_index) = index(rest)?;
                Ok((
                    rest,
                    ConstantPoolInfo::InvokeDynamic {
                        bootstrap_method_attr_index,
                        name_and_type_index,
                    },
                ))
            }
            unknown => fail(input, ErrorKind::BadConstantTag(unknown)),
        }
    }
}

/// Parses an entire constant pool of a declared slot count.
///
/// Slot 0 is reserved, and each `Long`/`Double` entry claims the slot after
/// it without consuming any bytes for it, so the number of encoded entries
/// varies with the pool's contents.
pub(crate) fn parse_constant_pool(count: u16) -> impl Fn(&[u8]) -> ByteResult<'_, ConstantPool> {
    move |mut input: &[u8]| {
        let entry = parse_constant_pool_info(count);
        let mut pool = vec![ConstantPoolInfo::Unusable];
        while (pool.len() as u16) < count {
            let (rest, info) = entry(input)?;
            input = rest;
            let double_width = matches!(
                info,
                ConstantPoolInfo::Long(_) | ConstantPoolInfo::Double(_)
            );
            pool.push(info);
            if double_width {
                if pool.len() as u16 == count {
                    // a wide constant in the final slot would claim a slot
                    // past the declared count
                    return fail(input, ErrorKind::InvalidConstantIndex(count));
                }
                pool.push(ConstantPoolInfo::Unusable);
            }
        }
        Ok((input, ConstantPool::new(pool)))
    }
}
