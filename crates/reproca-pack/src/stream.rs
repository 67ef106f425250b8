//! Reading single encoded values from an [`std::io::BufRead`] source.
//!
//! The framing tells exactly how many bytes a value spans, so one value can be
//! pulled off a stream without over-reading into the next. Reads are assumed
//! to be exact: a source that ends early yields
//! [`PackError::TruncatedOrCorrupt`].

use std::io::{BufRead, Read};

use crate::constants::*;
use crate::{Decoder, PackError, Result, Value};

/// Reads the bytes of exactly one encoded value.
///
/// Container and byte-blob bodies are copied without being inspected;
/// decode the frame to validate it.
pub fn read_frame<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut frame = Vec::new();
    let mut tag = [0u8; TAG_LEN];
    reader.read_exact(&mut tag).map_err(PackError::from)?;
    frame.push(tag[0]);
    let tag = Tag::try_from(tag[0])?;

    if let Some(len) = tag.fixed_payload_len() {
        copy_exact(reader, &mut frame, len)?;
        return Ok(frame);
    }
    match tag {
        Tag::Text => {
            reader.read_until(TEXT_TERMINATOR, &mut frame)?;
            if frame.len() < 2 || frame.last() != Some(&TEXT_TERMINATOR) {
                return Err(PackError::corrupt(frame.len(), "unterminated text"));
            }
        }
        _ => {
            let mut size = [0u8; SIZE_FIELD_LEN];
            reader
                .read_exact(&mut size)
                .map_err(|err| PackError::from(err).at(TAG_LEN))?;
            frame.extend_from_slice(&size);
            let size = usize::try_from(u64::from_le_bytes(size))
                .map_err(|_| PackError::corrupt(TAG_LEN, "length exceeds address space"))?;
            copy_exact(reader, &mut frame, size)?;
        }
    }
    Ok(frame)
}

/// Appends exactly `len` bytes from `reader` to `out`.
///
/// Grows `out` only as data arrives, so a bogus length cannot force a large
/// allocation up front.
fn copy_exact<R: Read>(reader: &mut R, out: &mut Vec<u8>, len: usize) -> Result<()> {
    let at = out.len();
    let read = reader.by_ref().take(len as u64).read_to_end(out)?;
    if read != len {
        return Err(PackError::corrupt(at + read, "unexpected end of input"));
    }
    Ok(())
}

/// Reads and decodes one value from `reader`.
pub fn unpack_from<R: BufRead>(reader: &mut R) -> Result<Value> {
    let frame = read_frame(reader)?;
    Decoder::new(&frame).read_any().map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::encode;
    use std::io::Cursor;

    #[test]
    fn reads_consecutive_values() {
        let mut data = encode(&Value::list([1i64, 2])).unwrap();
        data.extend(encode(&Value::from("tail")).unwrap());
        let mut cursor = Cursor::new(data);
        assert_eq!(unpack_from(&mut cursor).unwrap(), Value::list([1i64, 2]));
        assert_eq!(unpack_from(&mut cursor).unwrap(), Value::from("tail"));
        assert!(unpack_from(&mut cursor).is_err());
    }

    #[test]
    fn frame_is_exact() {
        let bytes = encode(&Value::object([("k", Value::bytes(vec![0; 3]))])).unwrap();
        let mut with_tail = bytes.clone();
        with_tail.push(0x01);
        let mut cursor = Cursor::new(with_tail);
        assert_eq!(read_frame(&mut cursor).unwrap(), bytes);
        assert_eq!(cursor.position() as usize, bytes.len());
    }

    #[test]
    fn short_stream_is_truncated() {
        let bytes = encode(&Value::list([1i64, 2])).unwrap();
        for cut in 1..bytes.len() {
            let mut cursor = Cursor::new(&bytes[..cut]);
            assert!(
                matches!(
                    read_frame(&mut cursor),
                    Err(PackError::TruncatedOrCorrupt { .. })
                ),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn unknown_tag() {
        let mut cursor = Cursor::new(vec![0x0a]);
        assert_eq!(
            read_frame(&mut cursor),
            Err(PackError::UnknownTag { tag: 0x0a, offset: 0 })
        );
    }
}
