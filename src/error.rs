use serde::{de, ser};
use std::{error, fmt, io};

/// The reason an encode or decode operation failed.
#[derive(Debug)]
pub enum ErrorKind {
    /// An IO error was encountered while writing encoded output.
    Io(io::Error),
    /// A message produced by a `serde` trait implementation.
    Custom(String),
    /// The input did not begin with the `:)\n` header bytes.
    InvalidHeader,
    /// The input ended where a token byte was expected.
    UnexpectedEndOfInput,
    /// Fewer than 4 bytes followed a 32-bit integer token.
    IncompleteInt32,
    /// Fewer than 8 bytes followed a 64-bit integer token.
    IncompleteInt64,
    /// Fewer than 4 bytes followed a 32-bit float token.
    IncompleteFloat32,
    /// Fewer than 8 bytes followed a 64-bit float token.
    IncompleteFloat64,
    /// A string's declared length exceeded the bytes remaining.
    IncompleteString,
    /// A long string ran to the end of the input without its terminator byte.
    MissingStringTerminator,
    /// A long field name ran to the end of the input without its terminator byte.
    MissingFieldNameTerminator,
    /// A variable-length integer's continuation bits never terminated.
    IncompleteVInt,
    /// A shared string reference token was missing its index byte.
    IncompleteSharedReference,
    /// A shared name reference token was missing its index bytes.
    IncompleteSharedNameReference,
    /// A dispatch byte with no meaning in value position.
    UnknownToken(u8),
    /// A dispatch byte with no meaning in field name position.
    UnknownKeyToken(u8),
    /// A reference to a back-reference table index that has not been filled.
    InvalidSharedReference(u16),
    /// A decoded string was not valid UTF-8.
    InvalidUtf8,
    /// Bytes other than the end-of-stream marker remained after the value.
    TrailingData,
    /// Arrays and objects were nested too deeply to decode.
    RecursionLimitExceeded,
    /// An integer outside the representable signed 64-bit range.
    IntegerOutOfRange,
    /// A native value with no equivalent in the Smile data model.
    UnsupportedType,
    /// An object key that is neither a string nor coercible to one.
    KeyMustBeAString,
}

/// An error encountered when encoding or decoding Smile data.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ErrorKind::Io(_) => f.write_str("IO error"),
            ErrorKind::Custom(e) => f.write_str(e),
            ErrorKind::InvalidHeader => f.write_str("invalid header"),
            ErrorKind::UnexpectedEndOfInput => f.write_str("unexpected end of input"),
            ErrorKind::IncompleteInt32 => f.write_str("incomplete 32-bit integer"),
            ErrorKind::IncompleteInt64 => f.write_str("incomplete 64-bit integer"),
            ErrorKind::IncompleteFloat32 => f.write_str("incomplete 32-bit float"),
            ErrorKind::IncompleteFloat64 => f.write_str("incomplete 64-bit float"),
            ErrorKind::IncompleteString => f.write_str("incomplete string"),
            ErrorKind::MissingStringTerminator => f.write_str("missing string terminator"),
            ErrorKind::MissingFieldNameTerminator => f.write_str("missing field name terminator"),
            ErrorKind::IncompleteVInt => f.write_str("incomplete vint"),
            ErrorKind::IncompleteSharedReference => f.write_str("incomplete shared string reference"),
            ErrorKind::IncompleteSharedNameReference => {
                f.write_str("incomplete shared name reference")
            }
            ErrorKind::UnknownToken(token) => write!(f, "unknown token 0x{:02x}", token),
            ErrorKind::UnknownKeyToken(token) => write!(f, "unknown key token 0x{:02x}", token),
            ErrorKind::InvalidSharedReference(reference) => {
                write!(f, "invalid shared reference {}", reference)
            }
            ErrorKind::InvalidUtf8 => f.write_str("invalid UTF-8"),
            ErrorKind::TrailingData => f.write_str("trailing data"),
            ErrorKind::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorKind::IntegerOutOfRange => f.write_str("integer out of range"),
            ErrorKind::UnsupportedType => f.write_str("unsupported type"),
            ErrorKind::KeyMustBeAString => f.write_str("key must be a string"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &*self.0 {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error(Box::new(ErrorKind::Custom(msg.to_string())))
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error(Box::new(ErrorKind::Custom(msg.to_string())))
    }
}

impl Error {
    pub(crate) fn io(e: io::Error) -> Self {
        Error(Box::new(ErrorKind::Io(e)))
    }

    pub(crate) fn invalid_header() -> Self {
        Error(Box::new(ErrorKind::InvalidHeader))
    }

    pub(crate) fn unexpected_end_of_input() -> Self {
        Error(Box::new(ErrorKind::UnexpectedEndOfInput))
    }

    pub(crate) fn incomplete_int_32() -> Self {
        Error(Box::new(ErrorKind::IncompleteInt32))
    }

    pub(crate) fn incomplete_int_64() -> Self {
        Error(Box::new(ErrorKind::IncompleteInt64))
    }

    pub(crate) fn incomplete_float_32() -> Self {
        Error(Box::new(ErrorKind::IncompleteFloat32))
    }

    pub(crate) fn incomplete_float_64() -> Self {
        Error(Box::new(ErrorKind::IncompleteFloat64))
    }

    pub(crate) fn incomplete_string() -> Self {
        Error(Box::new(ErrorKind::IncompleteString))
    }

    pub(crate) fn missing_string_terminator() -> Self {
        Error(Box::new(ErrorKind::MissingStringTerminator))
    }

    pub(crate) fn missing_field_name_terminator() -> Self {
        Error(Box::new(ErrorKind::MissingFieldNameTerminator))
    }

    pub(crate) fn incomplete_vint() -> Self {
        Error(Box::new(ErrorKind::IncompleteVInt))
    }

    pub(crate) fn incomplete_shared_reference() -> Self {
        Error(Box::new(ErrorKind::IncompleteSharedReference))
    }

    pub(crate) fn incomplete_shared_name_reference() -> Self {
        Error(Box::new(ErrorKind::IncompleteSharedNameReference))
    }

    pub(crate) fn unknown_token(token: u8) -> Self {
        Error(Box::new(ErrorKind::UnknownToken(token)))
    }

    pub(crate) fn unknown_key_token(token: u8) -> Self {
        Error(Box::new(ErrorKind::UnknownKeyToken(token)))
    }

    pub(crate) fn invalid_shared_reference(reference: u16) -> Self {
        Error(Box::new(ErrorKind::InvalidSharedReference(reference)))
    }

    pub(crate) fn invalid_utf8() -> Self {
        Error(Box::new(ErrorKind::InvalidUtf8))
    }

    pub(crate) fn trailing_data() -> Self {
        Error(Box::new(ErrorKind::TrailingData))
    }

    pub(crate) fn recursion_limit_exceeded() -> Self {
        Error(Box::new(ErrorKind::RecursionLimitExceeded))
    }

    pub(crate) fn integer_out_of_range() -> Self {
        Error(Box::new(ErrorKind::IntegerOutOfRange))
    }

    pub(crate) fn unsupported_type() -> Self {
        Error(Box::new(ErrorKind::UnsupportedType))
    }

    pub(crate) fn key_must_be_a_string() -> Self {
        Error(Box::new(ErrorKind::KeyMustBeAString))
    }
}
