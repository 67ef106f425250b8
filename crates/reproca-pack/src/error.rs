//! Encoder/decoder error type.

use reproca_buffers::BufferError;
use thiserror::Error;

/// Error type for packing, unpacking and seeking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error("unknown tag byte 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("truncated or corrupt stream at offset {offset}: {reason}")]
    TruncatedOrCorrupt { offset: usize, reason: &'static str },
    #[error("invalid UTF-8 in text at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),
    #[error("integer out of signed 64-bit range: {0}")]
    OutOfRange(String),
    #[error("object key {0:?} does not fit the 4-byte key slot")]
    KeyTooLong(String),
    #[error("object key {0:?} is not representable as ASCII")]
    NonAsciiKey(String),
    #[error("text contains a NUL character at byte {position}")]
    NulInText { position: usize },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    #[error("index {0} out of bounds")]
    IndexOutOfBounds(usize),
    #[error("cannot step into a {kind} value")]
    NotAContainer { kind: &'static str },
    #[error("path step expects {expected}, found {found}")]
    StepMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
    #[error("cannot deserialize: {0}")]
    Deserialize(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl PackError {
    pub(crate) fn corrupt(offset: usize, reason: &'static str) -> Self {
        PackError::TruncatedOrCorrupt { offset, reason }
    }

    /// Rewrites the offset carried by positional variants.
    pub(crate) fn at(self, at: usize) -> Self {
        match self {
            PackError::UnknownTag { tag, .. } => PackError::UnknownTag { tag, offset: at },
            PackError::TruncatedOrCorrupt { reason, .. } => {
                PackError::TruncatedOrCorrupt { offset: at, reason }
            }
            other => other,
        }
    }
}

impl From<BufferError> for PackError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => PackError::corrupt(0, "unexpected end of input"),
            BufferError::Overflow => PackError::corrupt(0, "length exceeds address space"),
        }
    }
}

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                PackError::corrupt(0, "unexpected end of input")
            }
            _ => PackError::Io(err.to_string()),
        }
    }
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;
