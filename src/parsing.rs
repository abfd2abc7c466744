//! nom plumbing shared by the binary parsers.
//!
//! The raw class file parsers run over `&[u8]` with an error type that can
//! carry a structured [`ErrorKind`] out of the combinator stack. A plain nom
//! error at the byte level always means the input ran out, so the conversion
//! back to [`ErrorKind`] reports [`Truncated`](ErrorKind::Truncated) unless a
//! parser attached something more specific.

use crate::error::ErrorKind;
use nom::IResult;

/// Error type for the byte-level parsers.
#[derive(Debug)]
pub(crate) struct ByteParseError<'a> {
    #[allow(dead_code)]
    input: &'a [u8],
    kind: Option<ErrorKind>,
}

impl<'a> nom::error::ParseError<&'a [u8]> for ByteParseError<'a> {
    fn from_error_kind(input: &'a [u8], _kind: nom::error::ErrorKind) -> Self {
        Self { input, kind: None }
    }

    fn append(_input: &'a [u8], _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

pub(crate) type ByteResult<'a, T> = IResult<&'a [u8], T, ByteParseError<'a>>;

/// Aborts the surrounding parse with a structured error.
pub(crate) fn fail<'a, T>(input: &'a [u8], kind: ErrorKind) -> ByteResult<'a, T> {
    Err(nom::Err::Failure(ByteParseError {
        input,
        kind: Some(kind),
    }))
}

impl From<nom::Err<ByteParseError<'_>>> for ErrorKind {
    fn from(e: nom::Err<ByteParseError<'_>>) -> Self {
        match e {
            nom::Err::Error(inner) | nom::Err::Failure(inner) => {
                inner.kind.unwrap_or(ErrorKind::Truncated)
            }
            nom::Err::Incomplete(_) => ErrorKind::Truncated,
        }
    }
}
