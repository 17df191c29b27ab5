use std::fmt;

/// Error returned when a value cannot be written to or read from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerError {
    /// The input ended before a value was complete.
    UnexpectedEof {
        /// Bytes the next read required.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// A boolean byte was neither `0` nor `1`.
    InvalidBool(u8),
    /// A string payload was not valid UTF-8.
    InvalidUtf8,
    /// A length prefix exceeded the configured or representable maximum.
    LengthTooLarge {
        /// The offending length.
        len: usize,
        /// The largest length accepted.
        max: usize,
    },
    /// Input remained after the top-level value was decoded.
    TrailingBytes(usize),
}

impl fmt::Display for SerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { needed, remaining } => write!(
                f,
                "unexpected end of input: needed {needed} bytes, {remaining} remaining"
            ),
            Self::InvalidBool(byte) => write!(f, "invalid boolean byte: {byte:#04x}"),
            Self::InvalidUtf8 => write!(f, "string payload is not valid UTF-8"),
            Self::LengthTooLarge { len, max } => {
                write!(f, "length {len} exceeds maximum {max}")
            }
            Self::TrailingBytes(n) => write!(f, "{n} trailing bytes after value"),
        }
    }
}

impl std::error::Error for SerializerError {}
