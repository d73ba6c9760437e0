//! Error taxonomy for dig calls.
//!
//! Every failure is local to one dig call. Decode errors and structural
//! violations both stop the scan: resynchronizing at an arbitrary offset
//! would risk miscounted depth and silently wrong results.

use std::path::PathBuf;

use thiserror::Error;

/// Error codes for token-level decode failures.
///
/// Kept as a small `Copy` enum so the cursor can fail without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Input ended in the middle of a token
    UnexpectedEof = 0,
    /// Input ended while an array or object was still open
    Unclosed,
    /// Misspelled `true`, `false` or `null`
    InvalidLiteral,
    /// Malformed number literal
    InvalidNumber,
    /// Unknown escape or malformed `\u` sequence
    InvalidEscape,
    /// Raw control character inside a string
    ControlCharacter,
    /// String bytes are not valid UTF-8
    InvalidUtf8,
    /// Token not allowed at this grammar position
    UnexpectedToken,
    /// `]` closing an object or `}` closing an array
    MismatchedClose,
    /// Content after the top-level value
    TrailingContent,
    /// Nesting exceeds the configured limit
    NestingTooDeep,
    /// Integer does not fit in 64 bits
    IntegerOverflow,
    /// Typed read on a token of another kind
    TypeMismatch,
}

impl ErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "unexpected end of input",
            Self::Unclosed => "unclosed array or object",
            Self::InvalidLiteral => "invalid literal",
            Self::InvalidNumber => "invalid number",
            Self::InvalidEscape => "invalid escape",
            Self::ControlCharacter => "control character in string",
            Self::InvalidUtf8 => "invalid utf-8",
            Self::UnexpectedToken => "unexpected token",
            Self::MismatchedClose => "mismatched close",
            Self::TrailingContent => "trailing content",
            Self::NestingTooDeep => "nesting too deep",
            Self::IntegerOverflow => "integer overflow",
            Self::TypeMismatch => "type mismatch",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't read {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("{code} at offset {offset}")]
    Decode { offset: usize, code: ErrorCode },

    #[error("{message} at offset {offset}")]
    Structure { offset: usize, message: &'static str },

    #[error("property {name:?} not found")]
    FieldNotFound { name: &'static str },
}

impl Error {
    /// Byte offset of the failure, when the scan had started.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Decode { offset, .. } | Self::Structure { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Decode error code, if this is a decode error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Decode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
