//! The error record returned by every fallible operation in this crate.

use std::fmt;

/// Coarse classification of what went wrong.
///
/// `Ok` is never carried by an [`Error`] in practice (errors are only ever
/// constructed for a non-ok outcome) but is kept as the explicit zero state
/// so callers that store a `(Value, ErrorKind)` pair side by side have a
/// sentinel to default to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Ok,
    InvalidArg,
    Parse,
    Type,
    Range,
    Alloc,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Ok => "ok",
            ErrorKind::InvalidArg => "invalid argument",
            ErrorKind::Parse => "parse error",
            ErrorKind::Type => "type error",
            ErrorKind::Range => "range error",
            ErrorKind::Alloc => "allocation failure",
        };
        f.write_str(s)
    }
}

/// Kind, byte offset into the input, and a short message.
///
/// The offset is 0 when not meaningful (e.g. [`ErrorKind::InvalidArg`]
/// raised before any input was consumed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, offset: usize, message: impl Into<String>) -> Self {
        Error {
            kind,
            offset,
            message: message.into(),
        }
    }

    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidArg, 0, message)
    }

    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Parse, offset, message)
    }

    pub fn type_error(offset: usize, message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Type, offset, message)
    }

    pub fn range(offset: usize, message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Range, offset, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}: {}", self.kind, self.offset, self.message)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
