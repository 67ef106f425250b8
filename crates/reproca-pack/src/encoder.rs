//! Binary encoder.
//!
//! Containers are written with a reserved 8-byte size field that is patched
//! once the body is complete, so a single pass over the value suffices.

use reproca_buffers::Writer;

use crate::constants::*;
use crate::{PackError, Result, Value};

/// How object keys that don't fit a 4-byte slot are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Keys longer than 4 bytes are cut to their first 4 bytes. Distinct keys
    /// that share a prefix collide on the wire.
    #[default]
    Truncate,
    /// Keys longer than 4 bytes, or containing a NUL, are rejected.
    Strict,
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderOptions {
    pub key_mode: KeyMode,
}

/// Packs an object key into its 4-byte slot, right-padded with zeros.
///
/// Non-ASCII names are always rejected: the slot is decoded as ASCII.
pub fn key_slot(name: &str, mode: KeyMode) -> Result<[u8; KEY_SLOT_LEN]> {
    if !name.is_ascii() {
        return Err(PackError::NonAsciiKey(name.to_owned()));
    }
    if mode == KeyMode::Strict {
        if name.len() > KEY_SLOT_LEN {
            return Err(PackError::KeyTooLong(name.to_owned()));
        }
        if name.bytes().any(|b| b == 0) {
            return Err(PackError::NonAsciiKey(name.to_owned()));
        }
    }
    let mut slot = [0u8; KEY_SLOT_LEN];
    let len = name.len().min(KEY_SLOT_LEN);
    slot[..len].copy_from_slice(&name.as_bytes()[..len]);
    Ok(slot)
}

/// Binary encoder.
///
/// Reuses its internal buffer across calls.
pub struct Encoder {
    pub writer: Writer,
    pub options: EncoderOptions,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
        }
    }

    /// Encodes a [`Value`] and returns the encoded bytes.
    ///
    /// Nothing is returned on failure; a partially written buffer is
    /// discarded.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>> {
        self.writer.reset();
        self.writer.ensure_capacity(value.encoded_len());
        if let Err(err) = self.write_any(value) {
            self.writer.reset();
            tracing::debug!(kind = value.kind(), error = %err, "encode failed");
            return Err(err);
        }
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Unit => self.write_unit(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Int(i) => self.write_int(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Text(s) => return self.write_text(s),
            Value::Bytes(b) => self.write_bytes(b),
            Value::List(items) => return self.write_list(items),
            Value::Object(entries) => {
                return self.write_object(entries.iter().map(|(k, v)| (k.as_str(), v)))
            }
        }
        Ok(())
    }

    pub fn write_unit(&mut self) {
        self.writer.u8(TAG_UNIT);
    }

    pub fn write_bool(&mut self, b: bool) {
        self.writer.u8(if b { TAG_TRUE } else { TAG_FALSE });
    }

    pub fn write_int(&mut self, int: i64) {
        self.writer.u8(TAG_INT);
        self.writer.i64_le(int);
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8(TAG_FLOAT);
        self.writer.f64_le(float);
    }

    /// Writes UTF-8 text followed by a zero terminator.
    ///
    /// Text containing U+0000 cannot be framed and is rejected.
    pub fn write_text(&mut self, s: &str) -> Result<()> {
        if let Some(position) = s.bytes().position(|b| b == TEXT_TERMINATOR) {
            return Err(PackError::NulInText { position });
        }
        self.writer.u8(TAG_TEXT);
        self.writer.buf(s.as_bytes());
        self.writer.u8(TEXT_TERMINATOR);
        Ok(())
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.writer.u8(TAG_BYTES);
        self.writer.u64_le(data.len() as u64);
        self.writer.buf(data);
    }

    pub fn write_list(&mut self, items: &[Value]) -> Result<()> {
        let slot = self.write_container_hdr(TAG_LIST);
        for item in items {
            self.write_any(item)?;
        }
        self.patch_container_size(slot);
        Ok(())
    }

    /// Writes object entries in iteration order.
    pub fn write_object<'v, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'v str, &'v Value)>,
    {
        let slot = self.write_container_hdr(TAG_OBJECT);
        for (key, value) in entries {
            self.write_key(key)?;
            self.write_any(value)?;
        }
        self.patch_container_size(slot);
        Ok(())
    }

    pub fn write_key(&mut self, key: &str) -> Result<()> {
        let slot = key_slot(key, self.options.key_mode)?;
        self.writer.buf(&slot);
        Ok(())
    }

    /// Writes the tag and a zeroed size field; returns the size field offset.
    fn write_container_hdr(&mut self, tag: u8) -> usize {
        self.writer.u8(tag);
        self.writer.reserve(SIZE_FIELD_LEN)
    }

    fn patch_container_size(&mut self, slot: usize) {
        let body = self.writer.x - slot - SIZE_FIELD_LEN;
        self.writer.patch_u64_le(slot, body as u64);
    }
}
