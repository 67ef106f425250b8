//! Binary decoder.
//!
//! Every read reports how many bytes the value occupied. Container bodies
//! are decoded through a sub-reader bounded to the declared size, so a child
//! that runs past its parent's end surfaces as a corrupt stream rather than
//! silently borrowing bytes from the next sibling.

use reproca_buffers::{print_octets, BufferError, Reader};

use crate::constants::*;
use crate::value::Object;
use crate::{PackError, Result, Value};

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Containers nested deeper than this fail with
    /// [`PackError::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Maps a short read to a corrupt-stream error at `at`.
#[inline]
pub(crate) fn need<T>(
    res: std::result::Result<T, BufferError>,
    at: usize,
    reason: &'static str,
) -> Result<T> {
    res.map_err(|_| PackError::corrupt(at, reason))
}

/// Reads a tag byte, reporting unknown bytes with their offset.
pub(crate) fn read_tag(reader: &mut Reader<'_>) -> Result<Tag> {
    let at = reader.position();
    let byte = need(reader.u8(), at, "expected a tag byte")?;
    Tag::try_from(byte).map_err(|err| err.at(at))
}

/// Decodes a 4-byte key slot: trailing zero padding is stripped.
pub(crate) fn decode_key(slot: &[u8]) -> Result<String> {
    let len = slot.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let key = &slot[..len];
    if !key.is_ascii() {
        return Err(PackError::NonAsciiKey(
            String::from_utf8_lossy(key).into_owned(),
        ));
    }
    Ok(key.iter().map(|&b| b as char).collect())
}

/// Decoder over a borrowed byte slice.
pub struct Decoder<'a> {
    pub reader: Reader<'a>,
    pub options: DecoderOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecoderOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecoderOptions) -> Self {
        Self {
            reader: Reader::new(data),
            options,
        }
    }

    /// Points the decoder at a new input.
    pub fn reset(&mut self, data: &'a [u8]) {
        self.reader.reset(data);
    }

    /// Cursor offset from the start of the input.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    /// Decodes one value at the cursor.
    ///
    /// Returns the value and the exact number of bytes it occupied, tag
    /// included. On failure the cursor is left where the value started.
    pub fn read_any(&mut self) -> Result<(Value, usize)> {
        let start = self.reader.position();
        let mut reader = self.reader.clone();
        match read_value(&mut reader, 0, self.options.max_depth) {
            Ok(value) => {
                let consumed = reader.position() - start;
                self.reader = reader;
                Ok((value, consumed))
            }
            Err(err) => {
                tracing::debug!(
                    offset = start,
                    error = %err,
                    preview = %print_octets(&self.reader.uint8[start..self.reader.end], 16),
                    "decode failed"
                );
                Err(err)
            }
        }
    }

    /// Checks that `data[offset..offset + size]` holds exactly one well-formed
    /// value.
    pub fn validate(data: &[u8], offset: usize, size: usize) -> Result<()> {
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| PackError::corrupt(offset, "range exceeds input"))?;
        let mut decoder = Decoder::new(&data[offset..end]);
        let (_, consumed) = decoder.read_any()?;
        if consumed != size {
            return Err(PackError::corrupt(offset + consumed, "trailing bytes"));
        }
        Ok(())
    }
}

fn read_value(reader: &mut Reader<'_>, depth: usize, max_depth: usize) -> Result<Value> {
    let at = reader.position();
    Ok(match read_tag(reader)? {
        Tag::Unit => Value::Unit,
        Tag::True => Value::Bool(true),
        Tag::False => Value::Bool(false),
        Tag::Int => Value::Int(need(reader.i64_le(), at, "truncated int")?),
        Tag::Float => Value::Float(need(reader.f64_le(), at, "truncated float")?),
        Tag::Text => {
            let raw = need(reader.until(TEXT_TERMINATOR), at, "unterminated text")?;
            let text = std::str::from_utf8(raw).map_err(|_| PackError::InvalidUtf8 { offset: at })?;
            Value::Text(text.to_owned())
        }
        Tag::Bytes => {
            let len = need(reader.len_u64_le(), at, "truncated bytes length")?;
            Value::Bytes(need(reader.buf(len), at, "bytes overrun input")?.to_vec())
        }
        Tag::List => {
            let mut body = read_container_body(reader, at, depth, max_depth)?;
            let mut items = Vec::new();
            while body.size() > 0 {
                items.push(read_value(&mut body, depth + 1, max_depth)?);
            }
            Value::List(items)
        }
        Tag::Object => {
            let mut body = read_container_body(reader, at, depth, max_depth)?;
            let mut entries = Object::new();
            while body.size() > 0 {
                let key_at = body.position();
                let slot = need(body.buf(KEY_SLOT_LEN), key_at, "key slot overruns container")?;
                let key = decode_key(slot)?;
                let value = read_value(&mut body, depth + 1, max_depth)?;
                // Keys colliding after truncation: the later entry wins.
                entries.insert(key, value);
            }
            Value::Object(entries)
        }
    })
}

/// Reads a container's size field and returns a reader bounded to its body.
fn read_container_body<'a>(
    reader: &mut Reader<'a>,
    at: usize,
    depth: usize,
    max_depth: usize,
) -> Result<Reader<'a>> {
    if depth >= max_depth {
        return Err(PackError::DepthLimitExceeded(max_depth));
    }
    let size = need(reader.len_u64_le(), at, "truncated container size")?;
    need(reader.cut(size), at, "declared size exceeds input")
}
