//! Field lookup directly against encoded bytes.
//!
//! Siblings are stepped over with [`Decoder::skip_any`], which uses each
//! value's framing (fixed widths, length and size fields, the text
//! terminator) without materialising it. Container siblings cost O(1)
//! regardless of their contents, so a lookup touches only the entries on
//! the path and their immediate siblings.

use reproca_buffers::Reader;

use crate::constants::*;
use crate::decoder::{need, read_tag};
use crate::encoder::{key_slot, KeyMode};
use crate::{Decoder, PackError, Result, Value};

/// One step of a lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
    /// Object entry, matched after truncation to the 4-byte key slot.
    Key(&'a str),
    /// List item.
    Index(usize),
}

/// An owned selector step for [`seek_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Field(String),
    Index(usize),
}

/// Steps over one value. Container bodies are not inspected.
fn skip_value(reader: &mut Reader<'_>) -> Result<()> {
    let at = reader.position();
    let tag = read_tag(reader)?;
    if let Some(len) = tag.fixed_payload_len() {
        return need(reader.skip(len), at, "truncated scalar");
    }
    match tag {
        Tag::Text => need(reader.until(TEXT_TERMINATOR), at, "unterminated text").map(drop),
        _ => {
            let len = need(reader.len_u64_le(), at, "truncated size field")?;
            need(reader.skip(len), at, "declared size exceeds input")
        }
    }
}

impl<'a> Decoder<'a> {
    /// Steps over the value at the cursor and returns its encoded length.
    ///
    /// On failure the cursor does not move.
    pub fn skip_any(&mut self) -> Result<usize> {
        let start = self.reader.position();
        let mut reader = self.reader.clone();
        skip_value(&mut reader)?;
        self.reader = reader;
        Ok(self.reader.position() - start)
    }

    /// Moves the cursor from an object to the value stored under `name`.
    ///
    /// When several entries share the truncated key, the last one is chosen,
    /// matching what a full decode keeps.
    pub fn find_key(&mut self, name: &str) -> Result<()> {
        let target = key_slot(name, KeyMode::Truncate)?;
        let mut body = self.container_body(Tag::Object)?;
        let mut found = None;
        while body.size() > 0 {
            let key_at = body.position();
            let slot = need(body.buf(KEY_SLOT_LEN), key_at, "key slot overruns container")?;
            let value_at = body.position();
            skip_value(&mut body)?;
            if *slot == target[..] {
                found = Some(value_at);
            }
        }
        let value_at = found.ok_or_else(|| PackError::KeyNotFound(name.to_owned()))?;
        tracing::trace!(key = name, offset = value_at, "seek: key");
        self.reader.x = value_at;
        Ok(())
    }

    /// Moves the cursor from a list to its `index`-th item.
    pub fn find_index(&mut self, index: usize) -> Result<()> {
        let mut body = self.container_body(Tag::List)?;
        for _ in 0..index {
            if body.size() == 0 {
                return Err(PackError::IndexOutOfBounds(index));
            }
            skip_value(&mut body)?;
        }
        if body.size() == 0 {
            return Err(PackError::IndexOutOfBounds(index));
        }
        tracing::trace!(index, offset = body.position(), "seek: index");
        self.reader.x = body.position();
        Ok(())
    }

    /// Follows `path` from the value at the cursor.
    ///
    /// On failure the cursor is restored to where it started.
    pub fn find_path(&mut self, path: &[PathStep<'_>]) -> Result<()> {
        let start = self.reader.position();
        for step in path {
            let res = match *step {
                PathStep::Key(name) => self.find_key(name),
                PathStep::Index(index) => self.find_index(index),
            };
            if let Err(err) = res {
                self.reader.x = start;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Checks the tag at the cursor and returns a reader over the container
    /// body. The cursor itself is not moved.
    fn container_body(&self, expected: Tag) -> Result<Reader<'a>> {
        let mut reader = self.reader.clone();
        let at = reader.position();
        let tag = read_tag(&mut reader)?;
        if !tag.is_container() {
            return Err(PackError::NotAContainer { kind: tag.kind() });
        }
        if tag != expected {
            return Err(PackError::StepMismatch {
                expected: expected.kind(),
                found: tag.kind(),
            });
        }
        let size = need(reader.len_u64_le(), at, "truncated container size")?;
        need(reader.cut(size), at, "declared size exceeds input")
    }
}

/// Returns the offset of the value at `path` inside `data`.
pub fn seek(data: &[u8], path: &[PathStep<'_>]) -> Result<usize> {
    let mut decoder = Decoder::new(data);
    decoder.find_path(path)?;
    Ok(decoder.position())
}

/// Decodes only the value at `path`.
pub fn get(data: &[u8], path: &[PathStep<'_>]) -> Result<Value> {
    let mut decoder = Decoder::new(data);
    decoder.find_path(path)?;
    decoder.read_any().map(|(value, _)| value)
}

/// Single-field lookup with the narrow selector contract of older clients.
///
/// Exactly one [`Selector::Field`] step is supported; anything else fails
/// with [`PackError::NotImplemented`]. Returns the offset of the field's
/// value.
pub fn seek_field(data: &[u8], selector: &[Selector]) -> Result<usize> {
    match selector {
        [Selector::Field(name)] => seek(data, &[PathStep::Key(name.as_str())]),
        [Selector::Index(_)] => Err(PackError::NotImplemented("index selector")),
        [] => Err(PackError::NotImplemented("empty selector")),
        _ => Err(PackError::NotImplemented("multi-step selector")),
    }
}
