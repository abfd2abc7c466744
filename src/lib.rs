//! Decodes JVM `.class` files into a resolved, self-contained model.
//!
//! A class file leans heavily on its constant pool: nearly every name, type
//! and literal elsewhere in the file is a pool index. This library reads the
//! raw structure, expands the pool so that every constant stands on its own,
//! parses descriptor and signature strings into typed trees, and folds
//! context-specific attributes (`ConstantValue`, `Exceptions`, `Signature`,
//! `InnerClasses`, ...) into dedicated slots on the decoded
//! [`JavaClass`].
//!
//! The entry points are [`parse_class_bytes`] for an in-memory image,
//! [`parse_bytes`] for any reader, and [`parse_file`].
//!
//! # Example
//! ```no_run
//! let class = classfile_reader::parse_file("com/example/Square.class")
//!     .expect("couldn't decode class");
//! println!("{} extends {}", class.path, class.super_class);
//! for method in &class.methods {
//!     println!("  {} {}", method.name, method.signature);
//! }
//! ```
//!
//! Decoding is one-shot and synchronous. The decoder holds no state between
//! calls, so independent decodes may run on separate threads, and the
//! returned [`JavaClass`] is immutable and freely shareable.
//!
//! Bytecode is not interpreted: a method's `Code` attribute is preserved as
//! an opaque byte block. `Utf8` constants likewise keep their raw modified
//! UTF-8 payload; strings are only decoded where the model needs them as
//! text.

mod constant_pool;
pub mod error;
pub(crate) mod parsing;
pub(crate) mod raw_java_class;
mod structures;

pub use constant_pool::resolved::Constant;
pub use constant_pool::ReferenceKind;
pub use structures::*;

use crate::error::Error;
use log::debug;
use std::io::Read;
use std::path::Path;

/// Decodes a class file already held in memory.
///
/// # Error
/// Will return an error if the bytes do not form a valid java class, or if
/// anything follows the class structure.
pub fn parse_class_bytes(bytes: &[u8]) -> Result<JavaClass, Error> {
    debug!("decoding a {} byte class file", bytes.len());
    let raw = raw_java_class::parse_class_file_bytes(bytes)?;
    Ok(JavaClass::from_raw(&raw)?)
}

/// Reads a java class from any byte source.
///
/// # Error
/// Will return an error if the byte stream does not resolve to a valid java
/// class.
pub fn parse_bytes<R: Read>(mut read: R) -> Result<JavaClass, Error> {
    let mut buffer = vec![];
    read.read_to_end(&mut buffer)?;
    parse_class_bytes(&buffer)
}

/// Parses the contents of a file into a java class.
///
/// # Error
/// Will return an error if the file does not exist, or the contents of the
/// file don't resolve to a valid java class.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<JavaClass, Error> {
    let bytes = std::fs::read(path)?;
    parse_class_bytes(&bytes)
}
