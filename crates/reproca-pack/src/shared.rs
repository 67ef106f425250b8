//! Shared convenience wrappers for encode/decode.

use crate::{Decoder, Encoder, EncoderOptions, Result, Value};

/// Encode a [`Value`] with default options.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    Encoder::new().encode(value)
}

/// Encode a [`Value`] with explicit options.
pub fn encode_with(value: &Value, options: EncoderOptions) -> Result<Vec<u8>> {
    Encoder::with_options(options).encode(value)
}

/// Decode the value at the start of `data`, returning it together with the
/// number of bytes it occupied.
pub fn decode(data: &[u8]) -> Result<(Value, usize)> {
    Decoder::new(data).read_any()
}

/// Decode the value at the start of `data`. Bytes after it are ignored.
pub fn unpack_value(data: &[u8]) -> Result<Value> {
    decode(data).map(|(value, _)| value)
}
