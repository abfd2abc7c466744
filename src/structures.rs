//! The resolved, user-facing model of a decoded class.

pub(crate) mod access_flags;
pub(crate) mod attributes;
mod class;
mod class_path;
mod members;
mod signatures;

pub use access_flags::AccessFlag;
pub use attributes::{Annotation, Attribute, ElementValue};
pub use class::{InnerClassRecord, JavaClass};
pub use class_path::ClassPath;
pub use members::{Member, MemberKind};
pub use signatures::{
    ClassSignature, FormalTypeParameter, MethodSignature, Signature, SimpleClassType, TypeArgument,
    Wildcard,
};
