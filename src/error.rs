//! Contains the error type that can be emitted while decoding

use std::backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};
use std::io;

/// The error type
pub struct Error {
    kind: ErrorKind,
    backtrace: Backtrace,
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{} at\n{}", self.kind, self.backtrace)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a new error from an error kind
    pub fn new<E: Into<ErrorKind>>(kind: E) -> Self {
        Self {
            kind: kind.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Gets the error kind
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        let kind = error.into();
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }
}

/// The error kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The first four bytes were not the class file magic number
    #[error("not a class file: bad magic number {0:#010x}")]
    BadMagic(u32),
    /// The input ended before the structure being read was complete
    #[error("unexpected end of class file")]
    Truncated,
    /// Bytes remained after the class file structure was fully read
    #[error("{0} trailing bytes after end of class file")]
    TrailingBytes(usize),
    /// An unknown tag was found in the constant pool
    #[error("{0} is not a known constant pool tag")]
    BadConstantTag(u8),
    /// A constant pool index was zero or past the declared pool size
    #[error("constant pool index {0} is out of range")]
    InvalidConstantIndex(u16),
    /// A constant pool entry did not have the kind required by its referrer
    #[error("constant pool entry {0} has an unexpected kind")]
    UnexpectedConstantKind(u16),
    /// A constant required as a string did not hold valid UTF-8
    #[error("constant pool entry {0} is not valid UTF-8")]
    InvalidUtf8(u16),
    /// A method handle carried an unknown reference kind tag
    #[error("{0} is not a valid method handle reference kind")]
    BadReferenceKind(u8),
    /// A descriptor or signature string failed to parse
    #[error("{0:?} is not a valid descriptor or signature")]
    InvalidSignature(String),
    /// An inner class segment of a signature declared a package
    #[error("inner class in signature {0:?} declares a package")]
    InnerClassWithPackage(String),
    /// A signature nested deeper than the decoder supports
    #[error("signature {0:?} nests too deeply")]
    SignatureTooDeep(String),
    /// A known attribute's body did not match its expected layout
    #[error("malformed {0} attribute")]
    MalformedAttribute(String),
    /// An access flag bit was set that is not usable in its context
    #[error("unusable access flag bits set in {0:#06x}")]
    UnusableFlagBits(u16),
    /// An io error occurred
    #[error(transparent)]
    IoError(#[from] io::Error),
}
