//! The raw java class, a direct translation of the java [ClassFile structure][class_file].
//!
//! Nothing at this layer chases constant pool indices or interprets
//! attribute bodies; it only slices the file into its declared records.
//!
//! [class_file]: https://docs.oracle.com/javase/specs/jvms/se7/html/jvms-4.html#jvms-4.1

use crate::constant_pool::{parser, ConstantPool};
use crate::error::ErrorKind;
use crate::parsing::{fail, ByteResult};
use log::trace;
use nom::bytes::complete::take;
use nom::multi::count;
use nom::number::complete::{be_u16, be_u32};

pub(crate) const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// A raw java class file structure.
#[derive(Debug, Clone)]
pub(crate) struct RawJavaClass {
    pub minor: u16,
    pub major: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Box<[u16]>,
    pub fields: Box<[RawMemberInfo]>,
    pub methods: Box<[RawMemberInfo]>,
    pub attributes: Box<[RawAttributeInfo]>,
}

/// The raw field/method info structure; both share one layout.
#[derive(Debug, Clone)]
pub(crate) struct RawMemberInfo {
    pub access_flags: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Box<[RawAttributeInfo]>,
}

/// The raw attribute info structure: a pool index naming it and its body.
#[derive(Debug, Clone)]
pub(crate) struct RawAttributeInfo {
    pub name_index: u16,
    pub info: Box<[u8]>,
}

/// Parses the entire byte array to create a raw java class.
pub(crate) fn parse_class_file_bytes(bytes: &[u8]) -> Result<RawJavaClass, ErrorKind> {
    let (rest, raw) = parse_raw_class(bytes).map_err(ErrorKind::from)?;
    if !rest.is_empty() {
        return Err(ErrorKind::TrailingBytes(rest.len()));
    }
    Ok(raw)
}

fn parse_raw_class(bytes: &[u8]) -> ByteResult<'_, RawJavaClass> {
    let (bytes, magic) = be_u32(bytes)?;
    if magic != CLASS_MAGIC {
        return fail(bytes, ErrorKind::BadMagic(magic));
    }
    let (bytes, minor) = be_u16(bytes)?;
    let (bytes, major) = be_u16(bytes)?;

    let (bytes, constant_pool_count) = be_u16(bytes)?;
    let (bytes, constant_pool) = parser::parse_constant_pool(constant_pool_count)(bytes)?;
    trace!("parsed constant pool with {} slots", constant_pool.len());

    let (bytes, access_flags) = be_u16(bytes)?;
    let (bytes, this_class) = be_u16(bytes)?;
    let (bytes, super_class) = be_u16(bytes)?;
    let (bytes, interfaces_count) = be_u16(bytes)?;
    let (bytes, interfaces) = count(be_u16, interfaces_count as usize)(bytes)?;

    let (bytes, fields) = parse_members(bytes)?;
    let (bytes, methods) = parse_members(bytes)?;

    let (bytes, attributes_count) = be_u16(bytes)?;
    let (bytes, attributes) = count(parse_attribute_info, attributes_count as usize)(bytes)?;

    Ok((
        bytes,
        RawJavaClass {
            minor,
            major,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces: interfaces.into_boxed_slice(),
            fields,
            methods,
            attributes: attributes.into_boxed_slice(),
        },
    ))
}

fn parse_members(bytes: &[u8]) -> ByteResult<'_, Box<[RawMemberInfo]>> {
    let (bytes, member_count) = be_u16(bytes)?;
    let (bytes, members) = count(parse_member_info, member_count as usize)(bytes)?;
    Ok((bytes, members.into_boxed_slice()))
}

fn parse_member_info(bytes: &[u8]) -> ByteResult<'_, RawMemberInfo> {
    let (bytes, access_flags) = be_u16(bytes)?;
    let (bytes, name_index) = be_u16(bytes)?;
    let (bytes, descriptor_index) = be_u16(bytes)?;
    let (bytes, attributes_count) = be_u16(bytes)?;
    let (bytes, attributes) = count(parse_attribute_info, attributes_count as usize)(bytes)?;
    Ok((
        bytes,
        RawMemberInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes: attributes.into_boxed_slice(),
        },
    ))
}

fn parse_attribute_info(bytes: &[u8]) -> ByteResult<'_, RawAttributeInfo> {
    let (bytes, name_index) = be_u16(bytes)?;
    let (bytes, length) = be_u32(bytes)?;
    let (bytes, info) = take(length)(bytes)?;
    Ok((
        bytes,
        RawAttributeInfo {
            name_index,
            info: Vec::from(info).into_boxed_slice(),
        },
    ))
}
