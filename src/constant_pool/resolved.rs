//! Phase two: expanding the raw pool into self-contained constants.
//!
//! The resolver walks the raw pool once, front to back, chasing every index
//! an entry holds into the data it stands for. The output pool has the same
//! length and slot layout as the raw pool but no entry refers back into it,
//! so a resolved constant can be handed out on its own.

use crate::constant_pool::{ConstantPool, ConstantPoolInfo, ReferenceKind};
use crate::error::ErrorKind;
use crate::structures::{ClassPath, Signature};

/// A fully resolved constant pool entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Slot 0, and the phantom slot after every `Long`/`Double`.
    Unusable,
    /// Raw modified-UTF-8 payload, passed through undecoded.
    Utf8(Box<[u8]>),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),
    Class(ClassPath),
    Field {
        class: ClassPath,
        name: String,
        signature: Signature,
    },
    Method {
        class: ClassPath,
        name: String,
        /// Always the [`Signature::Method`] variant.
        signature: Signature,
    },
    InterfaceMethod {
        class: ClassPath,
        name: String,
        /// Always the [`Signature::Method`] variant.
        signature: Signature,
    },
    NameAndType {
        name: String,
        signature: Signature,
    },
    MethodHandle {
        kind: ReferenceKind,
        /// The referenced member, itself already expanded. Always one of
        /// [`Constant::Field`], [`Constant::Method`] or
        /// [`Constant::InterfaceMethod`].
        referent: Box<Constant>,
    },
    MethodType(Signature),
    InvokeDynamic {
        /// Index into the `BootstrapMethods` attribute, kept as-is.
        bootstrap_index: u16,
        name: String,
        signature: Signature,
    },
}

/// Chases raw pool indices into resolved data.
pub(crate) struct PoolResolver<'a> {
    raw: &'a ConstantPool,
}

impl<'a> PoolResolver<'a> {
    pub(crate) fn new(raw: &'a ConstantPool) -> Self {
        Self { raw }
    }

    /// Expands every slot of the raw pool, in order, exactly once.
    pub(crate) fn resolve_all(&self) -> Result<Vec<Constant>, ErrorKind> {
        (0..self.raw.len())
            .map(|index| self.expand(index))
            .collect()
    }

    fn entry(&self, index: u16) -> Result<&'a ConstantPoolInfo, ErrorKind> {
        self.raw
            .get(index)
            .ok_or(ErrorKind::InvalidConstantIndex(index))
    }

    pub(crate) fn utf8(&self, index: u16) -> Result<&'a [u8], ErrorKind> {
        match self.entry(index)? {
            ConstantPoolInfo::Utf8(bytes) => Ok(bytes),
            _ => Err(ErrorKind::UnexpectedConstantKind(index)),
        }
    }

    pub(crate) fn utf8_str(&self, index: u16) -> Result<&'a str, ErrorKind> {
        std::str::from_utf8(self.utf8(index)?).map_err(|_| ErrorKind::InvalidUtf8(index))
    }

    pub(crate) fn class_path(&self, index: u16) -> Result<ClassPath, ErrorKind> {
        match self.entry(index)? {
            ConstantPoolInfo::Class { name_index } => {
                Ok(ClassPath::from_internal_name(self.utf8_str(*name_index)?))
            }
            _ => Err(ErrorKind::UnexpectedConstantKind(index)),
        }
    }

    fn name_and_type(&self, index: u16) -> Result<(String, Signature), ErrorKind> {
        match self.entry(index)? {
            ConstantPoolInfo::NameAndType {
                name_index,
                descriptor_index,
            } => {
                let name = self.utf8_str(*name_index)?.to_string();
                let signature = Signature::parse(self.utf8_str(*descriptor_index)?)?;
                Ok((name, signature))
            }
            _ => Err(ErrorKind::UnexpectedConstantKind(index)),
        }
    }

    /// Resolves a name-and-type whose descriptor must (or must not) be a
    /// method type, depending on the referring entry.
    fn member_name_and_type(
        &self,
        index: u16,
        method: bool,
    ) -> Result<(String, Signature), ErrorKind> {
        let (name, signature) = self.name_and_type(index)?;
        if matches!(signature, Signature::Method { .. }) == method {
            Ok((name, signature))
        } else {
            Err(ErrorKind::UnexpectedConstantKind(index))
        }
    }

    fn expand(&self, index: u16) -> Result<Constant, ErrorKind> {
        let info = self.entry(index)?;
        self.expand_info(info)
    }

    fn expand_info(&self, info: &ConstantPoolInfo) -> Result<Constant, ErrorKind> {
        Ok(match info {
            ConstantPoolInfo::Unusable => Constant::Unusable,
            ConstantPoolInfo::Utf8(bytes) => Constant::Utf8(bytes.clone()),
            ConstantPoolInfo::Integer(value) => Constant::Integer(*value),
            ConstantPoolInfo::Float(value) => Constant::Float(*value),
            ConstantPoolInfo::Long(value) => Constant::Long(*value),
            ConstantPoolInfo::Double(value) => Constant::Double(*value),
            ConstantPoolInfo::Class { name_index } => {
                Constant::Class(ClassPath::from_internal_name(self.utf8_str(*name_index)?))
            }
            ConstantPoolInfo::String { string_index } => {
                Constant::String(self.utf8_str(*string_index)?.to_string())
            }
            ConstantPoolInfo::FieldRef {
                class_index,
                name_and_type_index,
            } => {
                let (name, signature) = self.member_name_and_type(*name_and_type_index, false)?;
                Constant::Field {
                    class: self.class_path(*class_index)?,
                    name,
                    signature,
                }
            }
            ConstantPoolInfo::MethodRef {
                class_index,
                name_and_type_index,
            } => {
                let (name, signature) = self.member_name_and_type(*name_and_type_index, true)?;
                Constant::Method {
                    class: self.class_path(*class_index)?,
                    name,
                    signature,
                }
            }
            ConstantPoolInfo::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => {
                let (name, signature) = self.member_name_and_type(*name_and_type_index, true)?;
                Constant::InterfaceMethod {
                    class: self.class_path(*class_index)?,
                    name,
                    signature,
                }
            }
            ConstantPoolInfo::NameAndType {
                name_index,
                descriptor_index,
            } => Constant::NameAndType {
                name: self.utf8_str(*name_index)?.to_string(),
                signature: Signature::parse(self.utf8_str(*descriptor_index)?)?,
            },
            ConstantPoolInfo::MethodHandle {
                reference_kind,
                reference_index,
            } => {
                let referent = self.entry(*reference_index)?;
                // only member refs are legal here, which also means the
                // recursion cannot go deeper than one level
                if !matches!(
                    referent,
                    ConstantPoolInfo::FieldRef { .. }
                        | ConstantPoolInfo::MethodRef { .. }
                        | ConstantPoolInfo::InterfaceMethodRef { .. }
                ) {
                    return Err(ErrorKind::UnexpectedConstantKind(*reference_index));
                }
                Constant::MethodHandle {
                    kind: *reference_kind,
                    referent: Box::new(self.expand_info(referent)?),
                }
            }
            ConstantPoolInfo::MethodType { descriptor_index } => {
                Constant::MethodType(Signature::parse_method(self.utf8_str(*descriptor_index)?)?)
            }
            ConstantPoolInfo::InvokeDynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => {
                let (name, signature) = self.name_and_type(*name_and_type_index)?;
                Constant::InvokeDynamic {
                    bootstrap_index: *bootstrap_method_attr_index,
                    name,
                    signature,
                }
            }
        })
    }
}
