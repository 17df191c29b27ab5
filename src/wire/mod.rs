//! Byte-stream codec for values, including optional values.
//!
//! Layout:
//! - `bool`: 1 byte, `0` or `1`
//! - integers and floats: little-endian, fixed width
//! - `String`, `Vec<T>`: 4-byte little-endian length, then the payload
//! - `Option<T>`: 1 byte presence flag, then `T` if the flag is `1`
//!
//! Every read and write returns `Result<_, SerializerError>` and composite
//! values propagate the first failure with `?`.
//!
//! # Example
//!
//! ```
//! use lockbound::wire::{self, SerializerError};
//!
//! let bytes = wire::to_bytes(&Some(7_u16))?;
//! assert_eq!(bytes, [1, 7, 0]);
//! assert_eq!(wire::from_bytes::<Option<u16>>(&bytes)?, Some(7));
//!
//! assert_eq!(wire::to_bytes(&None::<u16>)?, [0]);
//! # Ok::<(), SerializerError>(())
//! ```

mod error;
mod impls;

pub use error::SerializerError;

/// Default maximum length prefix accepted by the decoder (16 MiB).
pub const DEFAULT_MAX_LEN: usize = 16 * 1024 * 1024;

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireConfig {
    /// Largest length prefix accepted for strings and sequences. For
    /// sequences this counts elements, not bytes.
    pub max_len: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

/// A type with a wire representation.
pub trait Wire: Sized {
    /// Appends the encoding of `self` to `out`.
    fn write(&self, out: &mut OutputSerializer) -> Result<(), SerializerError>;

    /// Decodes one value from the front of `input`.
    fn read(input: &mut InputSerializer<'_>) -> Result<Self, SerializerError>;
}

/// Growable output buffer.
#[derive(Debug, Clone, Default)]
pub struct OutputSerializer {
    buf: Vec<u8>,
}

impl OutputSerializer {
    /// Creates an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an output buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends one byte.
    pub fn write_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends a 4-byte length prefix.
    pub fn write_len(&mut self, len: usize) -> Result<(), SerializerError> {
        let len32 = u32::try_from(len).map_err(|_| SerializerError::LengthTooLarge {
            len,
            max: u32::MAX as usize,
        })?;
        self.write_bytes(&len32.to_le_bytes());
        Ok(())
    }

    /// Encoded bytes so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of encoded bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the serializer, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over encoded input.
#[derive(Debug, Clone)]
pub struct InputSerializer<'a> {
    data: &'a [u8],
    pos: usize,
    config: WireConfig,
}

impl<'a> InputSerializer<'a> {
    /// Creates a cursor with the default [`WireConfig`].
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, WireConfig::default())
    }

    /// Creates a cursor with custom limits.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: WireConfig) -> Self {
        Self {
            data,
            pos: 0,
            config,
        }
    }

    /// Consumes exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], SerializerError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(SerializerError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerializerError> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Consumes one byte.
    pub fn read_u8(&mut self) -> Result<u8, SerializerError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Consumes a 4-byte length prefix and checks it against the limit.
    pub fn read_len(&mut self) -> Result<usize, SerializerError> {
        let len = u32::from_le_bytes(self.read_array()?) as usize;
        if len > self.config.max_len {
            return Err(SerializerError::LengthTooLarge {
                len,
                max: self.config.max_len,
            });
        }
        Ok(len)
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if the input is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails unless the input is exhausted.
    pub fn finish(&self) -> Result<(), SerializerError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(SerializerError::TrailingBytes(n)),
        }
    }
}

/// Encodes `value` into a fresh buffer.
pub fn to_bytes<T: Wire>(value: &T) -> Result<Vec<u8>, SerializerError> {
    let mut out = OutputSerializer::new();
    value.write(&mut out)?;
    Ok(out.into_bytes())
}

/// Decodes one `T` that must span all of `bytes`.
pub fn from_bytes<T: Wire>(bytes: &[u8]) -> Result<T, SerializerError> {
    from_bytes_with_config(bytes, WireConfig::default())
}

/// Like [`from_bytes`], with custom decoder limits.
pub fn from_bytes_with_config<T: Wire>(
    bytes: &[u8],
    config: WireConfig,
) -> Result<T, SerializerError> {
    let mut input = InputSerializer::with_config(bytes, config);
    let decoded = T::read(&mut input).and_then(|value| {
        input.finish()?;
        Ok(value)
    });
    if let Err(err) = &decoded {
        tracing::debug!(
            error = %err,
            len = bytes.len(),
            ty = std::any::type_name::<T>(),
            "wire decode failed"
        );
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn option_layout_is_flag_then_payload() {
        init_test("option_layout_is_flag_then_payload");
        let some = to_bytes(&Some(0x0102_0304_u32)).expect("encode some");
        crate::assert_with_log!(some == [1, 4, 3, 2, 1], "some layout", [1, 4, 3, 2, 1], some);
        let none = to_bytes(&None::<u32>).expect("encode none");
        crate::assert_with_log!(none == [0], "none layout", [0], none);
        crate::test_complete!("option_layout_is_flag_then_payload");
    }

    #[test]
    fn option_round_trips() {
        init_test("option_round_trips");
        let value = Some(String::from("brane"));
        let bytes = to_bytes(&value).expect("encode");
        let back: Option<String> = from_bytes(&bytes).expect("decode");
        crate::assert_with_log!(back == value, "some round trip", value, back);

        let bytes = to_bytes(&None::<String>).expect("encode");
        let back: Option<String> = from_bytes(&bytes).expect("decode");
        crate::assert_with_log!(back.is_none(), "none round trip", None::<String>, back);
        crate::test_complete!("option_round_trips");
    }

    #[test]
    fn nested_options_round_trip() {
        init_test("nested_options_round_trip");
        let value: Vec<Option<Option<i64>>> = vec![None, Some(None), Some(Some(-9))];
        let bytes = to_bytes(&value).expect("encode");
        let back: Vec<Option<Option<i64>>> = from_bytes(&bytes).expect("decode");
        crate::assert_with_log!(back == value, "nested", value, back);
        crate::test_complete!("nested_options_round_trip");
    }

    #[test]
    fn truncated_payload_reports_eof() {
        init_test("truncated_payload_reports_eof");
        let err = from_bytes::<Option<u32>>(&[1, 0xAA, 0xBB]).expect_err("truncated");
        let expected = SerializerError::UnexpectedEof {
            needed: 4,
            remaining: 2,
        };
        crate::assert_with_log!(err == expected, "eof", expected, err);
        crate::test_complete!("truncated_payload_reports_eof");
    }

    #[test]
    fn presence_flag_must_be_zero_or_one() {
        init_test("presence_flag_must_be_zero_or_one");
        let err = from_bytes::<Option<u8>>(&[2, 5]).expect_err("bad flag");
        crate::assert_with_log!(
            err == SerializerError::InvalidBool(2),
            "invalid flag",
            SerializerError::InvalidBool(2),
            err
        );
        crate::test_complete!("presence_flag_must_be_zero_or_one");
    }

    #[test]
    fn failure_short_circuits_remaining_reads() {
        init_test("failure_short_circuits_remaining_reads");
        // Second element has an invalid flag; the cursor must stop there.
        let bytes = [3, 0, 0, 0, 1, 10, 7, 1, 11];
        let mut input = InputSerializer::new(&bytes);
        let err = Vec::<Option<u8>>::read(&mut input).expect_err("bad element");
        crate::assert_with_log!(
            err == SerializerError::InvalidBool(7),
            "first failure wins",
            SerializerError::InvalidBool(7),
            err
        );
        crate::assert_with_log!(input.remaining() == 2, "stopped at failure", 2, input.remaining());
        crate::test_complete!("failure_short_circuits_remaining_reads");
    }

    #[test]
    fn trailing_bytes_rejected() {
        init_test("trailing_bytes_rejected");
        let err = from_bytes::<Option<u8>>(&[0, 9]).expect_err("trailing");
        crate::assert_with_log!(
            err == SerializerError::TrailingBytes(1),
            "trailing",
            SerializerError::TrailingBytes(1),
            err
        );
        crate::test_complete!("trailing_bytes_rejected");
    }

    #[test]
    fn length_limit_enforced() {
        init_test("length_limit_enforced");
        let bytes = to_bytes(&String::from("too long")).expect("encode");
        let config = WireConfig { max_len: 4 };
        let err = from_bytes_with_config::<String>(&bytes, config).expect_err("limit");
        let expected = SerializerError::LengthTooLarge { len: 8, max: 4 };
        crate::assert_with_log!(err == expected, "limit", expected, err);
        let ok = from_bytes_with_config::<String>(&bytes, WireConfig { max_len: 8 });
        crate::assert_with_log!(ok.is_ok(), "at limit", true, ok.is_ok());
        crate::test_complete!("length_limit_enforced");
    }

    #[test]
    fn invalid_utf8_rejected() {
        init_test("invalid_utf8_rejected");
        let err = from_bytes::<String>(&[2, 0, 0, 0, 0xC3, 0x28]).expect_err("utf8");
        crate::assert_with_log!(
            err == SerializerError::InvalidUtf8,
            "utf8",
            SerializerError::InvalidUtf8,
            err
        );
        crate::test_complete!("invalid_utf8_rejected");
    }

    #[test]
    fn error_display() {
        init_test("error_display");
        let msg = SerializerError::UnexpectedEof {
            needed: 4,
            remaining: 1,
        }
        .to_string();
        crate::assert_with_log!(msg.contains("needed 4"), "eof display", "needed 4", msg);
        let msg = SerializerError::InvalidBool(0x7f).to_string();
        crate::assert_with_log!(msg.contains("0x7f"), "bool display", "0x7f", msg);
        crate::test_complete!("error_display");
    }

    #[test]
    fn output_serializer_accessors() {
        init_test("output_serializer_accessors");
        let mut out = OutputSerializer::with_capacity(8);
        crate::assert_with_log!(out.is_empty(), "starts empty", true, out.is_empty());
        true.write(&mut out).expect("bool");
        out.write_len(3).expect("len");
        crate::assert_with_log!(out.len() == 5, "len", 5, out.len());
        crate::assert_with_log!(
            out.as_bytes() == [1, 3, 0, 0, 0],
            "bytes",
            [1, 3, 0, 0, 0],
            out.as_bytes()
        );
        crate::test_complete!("output_serializer_accessors");
    }
}
