//! Access flag decoding.
//!
//! The same 16 bit positions mean different modifiers depending on what the
//! flag word is attached to (0x0040 is `volatile` on a field but `bridge` on
//! a method), and some positions mean nothing at all in a given context. Each
//! context therefore gets its own positional table; a set bit whose table
//! slot is [`AccessFlag::Unusable`] (or that lies past the table) aborts the
//! decode rather than being silently accepted.

use crate::error::ErrorKind;
use std::collections::BTreeSet;

/// A single decoded modifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessFlag {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Super,
    Synchronized,
    Volatile,
    Bridge,
    Transient,
    VarArgs,
    Native,
    Interface,
    Abstract,
    Strict,
    Synthetic,
    Annotation,
    Enum,
    /// Placeholder for a bit position with no meaning in the current
    /// context. Never appears in a decoded flag set.
    Unusable,
}

use AccessFlag::*;

/// Flag table for fields.
pub(crate) const FIELD_FLAGS: &[AccessFlag] = &[
    Public, Private, Protected, Static, Final, Unusable, Volatile, Transient, Unusable, Unusable,
    Unusable, Unusable, Synthetic, Unusable, Enum,
];

/// Flag table for methods.
pub(crate) const METHOD_FLAGS: &[AccessFlag] = &[
    Public, Private, Protected, Static, Final, Synchronized, Bridge, VarArgs, Native, Unusable,
    Abstract, Strict, Synthetic,
];

/// Flag table for the class itself.
pub(crate) const CLASS_FLAGS: &[AccessFlag] = &[
    Public, Unusable, Unusable, Unusable, Final, Super, Unusable, Unusable, Unusable, Interface,
    Abstract, Unusable, Synthetic, Annotation, Enum,
];

/// Flag table for `InnerClasses` records.
pub(crate) const INNER_CLASS_FLAGS: &[AccessFlag] = &[
    Public, Private, Protected, Static, Final, Unusable, Unusable, Unusable, Unusable, Interface,
    Abstract, Synthetic, Annotation, Enum,
];

/// Decodes a raw flag word against a context table.
pub(crate) fn flags_from_bits(
    bits: u16,
    table: &[AccessFlag],
) -> Result<BTreeSet<AccessFlag>, ErrorKind> {
    let mut flags = BTreeSet::new();
    for position in 0..16 {
        if bits & (1 << position) == 0 {
            continue;
        }
        match table.get(position) {
            Some(&Unusable) | None => return Err(ErrorKind::UnusableFlagBits(bits)),
            Some(&flag) => {
                flags.insert(flag);
            }
        }
    }
    Ok(flags)
}
