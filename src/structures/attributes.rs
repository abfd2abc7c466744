//! Parsed attributes.
//!
//! Attributes arrive as `(name, body)` records. The reader resolves the
//! name, offers the record to a caller-supplied hook for context-sensitive
//! handling, and otherwise dispatches on the name itself: `Deprecated` and
//! the runtime annotation pairs get structured parses, everything else is
//! preserved opaquely as [`Attribute::Unknown`].
//!
//! Every handler must account for the attribute's full declared length;
//! leftover body bytes mean the attribute is malformed.

use crate::constant_pool::resolved::{Constant, PoolResolver};
use crate::error::ErrorKind;
use crate::parsing::{fail, ByteResult};
use crate::raw_java_class::RawAttributeInfo;
use crate::structures::Signature;
use byteorder::ByteOrder;
use nom::number::complete::{be_u16, be_u8};

/// Nesting cap for annotation element values, which can hold arrays of
/// annotations holding arrays in turn.
const MAX_VALUE_NESTING: usize = 64;

/// A decoded attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// The zero-length `Deprecated` marker.
    Deprecated,
    /// `RuntimeVisibleAnnotations`.
    VisibleAnnotations(Vec<Annotation>),
    /// `RuntimeInvisibleAnnotations`.
    InvisibleAnnotations(Vec<Annotation>),
    /// Any attribute this decoder does not interpret, body preserved as-is.
    Unknown { name: String, info: Box<[u8]> },
}

impl Attribute {
    /// The attribute's name as it appeared in the class file.
    pub fn name(&self) -> &str {
        match self {
            Attribute::Deprecated => "Deprecated",
            Attribute::VisibleAnnotations(_) => "RuntimeVisibleAnnotations",
            Attribute::InvisibleAnnotations(_) => "RuntimeInvisibleAnnotations",
            Attribute::Unknown { name, .. } => name,
        }
    }
}

/// A single annotation: the annotation type and its element/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub signature: Signature,
    pub elements: Vec<(String, ElementValue)>,
}

/// The value of one annotation element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    /// A primitive or string constant. The tag byte is the original ASCII
    /// discriminator (`B C D F I J S Z s`), kept so round-trips are exact.
    Const(u8, Constant),
    /// An enum constant: the enum type and the constant's name.
    Enum {
        type_signature: Signature,
        name: String,
    },
    /// A class literal.
    Class(Signature),
    /// A nested annotation.
    Annotation(Annotation),
    /// An array of values.
    Array(Vec<ElementValue>),
}

/// What a context hook did with an attribute record.
pub(crate) enum HookOutcome {
    /// The hook consumed the body and produced an attribute to keep.
    Keep(Attribute),
    /// The hook consumed the body into its own state; the record is dropped.
    Consumed,
    /// The hook declined; default dispatch applies.
    Delegate,
}

/// Reads the 2-byte pool index that makes up the whole body of several
/// attributes.
pub(crate) fn pool_index(name: &str, body: &[u8]) -> Result<u16, ErrorKind> {
    if body.len() != 2 {
        return Err(ErrorKind::MalformedAttribute(name.to_string()));
    }
    Ok(byteorder::BigEndian::read_u16(body))
}

/// Runs an attribute body parser and enforces that it consumed the body
/// exactly. Anything left over, or a plain parse failure, marks the
/// attribute malformed.
pub(crate) fn finish_body<T>(name: &str, result: ByteResult<'_, T>) -> Result<T, ErrorKind> {
    match result {
        Ok((rest, value)) if rest.is_empty() => Ok(value),
        Ok((_, _)) => Err(ErrorKind::MalformedAttribute(name.to_string())),
        Err(e) => Err(match ErrorKind::from(e) {
            ErrorKind::Truncated => ErrorKind::MalformedAttribute(name.to_string()),
            other => other,
        }),
    }
}

/// Reads attribute records against a resolved pool.
pub(crate) struct AttributeReader<'a> {
    resolver: &'a PoolResolver<'a>,
    constants: &'a [Constant],
}

impl<'a> AttributeReader<'a> {
    pub(crate) fn new(resolver: &'a PoolResolver<'a>, constants: &'a [Constant]) -> Self {
        Self {
            resolver,
            constants,
        }
    }

    pub(crate) fn resolver(&self) -> &'a PoolResolver<'a> {
        self.resolver
    }

    /// Looks up an already-resolved constant for an attribute body index.
    pub(crate) fn constant(&self, index: u16) -> Result<Constant, ErrorKind> {
        match self.constants.get(index as usize) {
            None => Err(ErrorKind::InvalidConstantIndex(index)),
            Some(Constant::Unusable) => Err(ErrorKind::UnexpectedConstantKind(index)),
            Some(constant) => Ok(constant.clone()),
        }
    }

    /// Reads every record, consulting `hook` first for each one.
    pub(crate) fn read_all<F>(
        &self,
        raws: &[RawAttributeInfo],
        mut hook: F,
    ) -> Result<Vec<Attribute>, ErrorKind>
    where
        F: FnMut(&str, &[u8]) -> Result<HookOutcome, ErrorKind>,
    {
        let mut attributes = Vec::new();
        for raw in raws {
            let name = self.resolver.utf8_str(raw.name_index)?;
            match hook(name, &raw.info)? {
                HookOutcome::Keep(attribute) => attributes.push(attribute),
                HookOutcome::Consumed => {}
                HookOutcome::Delegate => attributes.push(self.default_attribute(name, &raw.info)?),
            }
        }
        Ok(attributes)
    }

    fn default_attribute(&self, name: &str, body: &[u8]) -> Result<Attribute, ErrorKind> {
        match name {
            "Deprecated" => {
                if !body.is_empty() {
                    return Err(ErrorKind::MalformedAttribute(name.to_string()));
                }
                Ok(Attribute::Deprecated)
            }
            "RuntimeVisibleAnnotations" => Ok(Attribute::VisibleAnnotations(
                self.parse_annotation_list(name, body)?,
            )),
            "RuntimeInvisibleAnnotations" => Ok(Attribute::InvisibleAnnotations(
                self.parse_annotation_list(name, body)?,
            )),
            _ => Ok(Attribute::Unknown {
                name: name.to_string(),
                info: body.to_vec().into_boxed_slice(),
            }),
        }
    }

    fn parse_annotation_list(&self, name: &str, body: &[u8]) -> Result<Vec<Annotation>, ErrorKind> {
        finish_body(name, annotation_list(body, self, name))
    }
}

fn annotation_list<'i>(
    bytes: &'i [u8],
    reader: &AttributeReader<'_>,
    name: &str,
) -> ByteResult<'i, Vec<Annotation>> {
    let (mut bytes, num) = be_u16(bytes)?;
    let mut annotations = Vec::with_capacity(num as usize);
    for _ in 0..num {
        let (rest, annotation) = parse_annotation(bytes, reader, name, 0)?;
        annotations.push(annotation);
        bytes = rest;
    }
    Ok((bytes, annotations))
}

fn parse_annotation<'i>(
    bytes: &'i [u8],
    reader: &AttributeReader<'_>,
    name: &str,
    depth: usize,
) -> ByteResult<'i, Annotation> {
    if depth > MAX_VALUE_NESTING {
        return fail(bytes, ErrorKind::MalformedAttribute(name.to_string()));
    }
    let (bytes, type_index) = be_u16(bytes)?;
    let signature = match reader
        .resolver
        .utf8_str(type_index)
        .and_then(Signature::parse)
    {
        Ok(signature) => signature,
        Err(e) => return fail(bytes, e),
    };
    let (mut bytes, num_pairs) = be_u16(bytes)?;
    let mut elements = Vec::with_capacity(num_pairs as usize);
    for _ in 0..num_pairs {
        let (rest, element_name_index) = be_u16(bytes)?;
        let element_name = match reader.resolver.utf8_str(element_name_index) {
            Ok(element_name) => element_name.to_string(),
            Err(e) => return fail(rest, e),
        };
        let (rest, value) = parse_element_value(rest, reader, name, depth + 1)?;
        elements.push((element_name, value));
        bytes = rest;
    }
    Ok((bytes, Annotation { signature, elements }))
}

fn parse_element_value<'i>(
    bytes: &'i [u8],
    reader: &AttributeReader<'_>,
    name: &str,
    depth: usize,
) -> ByteResult<'i, ElementValue> {
    if depth > MAX_VALUE_NESTING {
        return fail(bytes, ErrorKind::MalformedAttribute(name.to_string()));
    }
    let (bytes, tag) = be_u8(bytes)?;
    match tag {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' => {
            let (bytes, const_index) = be_u16(bytes)?;
            let constant = match reader.constant(const_index) {
                Ok(constant) => constant,
                Err(e) => return fail(bytes, e),
            };
            Ok((bytes, ElementValue::Const(tag, constant)))
        }
        b'e' => {
            let (bytes, type_name_index) = be_u16(bytes)?;
            let (bytes, const_name_index) = be_u16(bytes)?;
            let type_signature = match reader
                .resolver
                .utf8_str(type_name_index)
                .and_then(Signature::parse)
            {
                Ok(signature) => signature,
                Err(e) => return fail(bytes, e),
            };
            let const_name = match reader.resolver.utf8_str(const_name_index) {
                Ok(const_name) => const_name.to_string(),
                Err(e) => return fail(bytes, e),
            };
            Ok((
                bytes,
                ElementValue::Enum {
                    type_signature,
                    name: const_name,
                },
            ))
        }
        b'c' => {
            let (bytes, class_index) = be_u16(bytes)?;
            let signature = match reader
                .resolver
                .utf8_str(class_index)
                .and_then(Signature::parse)
            {
                Ok(signature) => signature,
                Err(e) => return fail(bytes, e),
            };
            Ok((bytes, ElementValue::Class(signature)))
        }
        b'@' => {
            let (bytes, annotation) = parse_annotation(bytes, reader, name, depth + 1)?;
            Ok((bytes, ElementValue::Annotation(annotation)))
        }
        b'[' => {
            let (mut bytes, num) = be_u16(bytes)?;
            let mut values = Vec::with_capacity(num as usize);
            for _ in 0..num {
                let (rest, value) = parse_element_value(bytes, reader, name, depth + 1)?;
                values.push(value);
                bytes = rest;
            }
            Ok((bytes, ElementValue::Array(values)))
        }
        _ => fail(bytes, ErrorKind::MalformedAttribute(name.to_string())),
    }
}
