//! Wire constants.
//!
//! ```text
//! UNIT   : 0x01
//! TRUE   : 0x02
//! FALSE  : 0x03
//! INT    : 0x04 value=i64
//! FLOAT  : 0x05 value=f64
//! TEXT   : 0x06 value=utf8 0x00
//! BYTES  : 0x07 length=u64 values=byte*
//! LIST   : 0x08 size=u64 values=VALUE*
//! OBJECT : 0x09 size=u64 items=(key=byte[4] value=VALUE)*
//! ```
//!
//! All fixed-width numbers are little-endian.

use crate::PackError;

pub const TAG_UNIT: u8 = 0x01;
pub const TAG_TRUE: u8 = 0x02;
pub const TAG_FALSE: u8 = 0x03;
pub const TAG_INT: u8 = 0x04;
pub const TAG_FLOAT: u8 = 0x05;
pub const TAG_TEXT: u8 = 0x06;
pub const TAG_BYTES: u8 = 0x07;
pub const TAG_LIST: u8 = 0x08;
pub const TAG_OBJECT: u8 = 0x09;

/// Width of the tag byte.
pub const TAG_LEN: usize = 1;
/// Width of a container size field or a byte-blob length field.
pub const SIZE_FIELD_LEN: usize = 8;
/// Width of an Int or Float payload.
pub const SCALAR_LEN: usize = 8;
/// Width of an object key slot.
pub const KEY_SLOT_LEN: usize = 4;
/// Terminates a text payload.
pub const TEXT_TERMINATOR: u8 = 0x00;

/// Tag header plus size field that precede every container body.
pub const CONTAINER_HEADER_LEN: usize = TAG_LEN + SIZE_FIELD_LEN;

/// The nine wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Unit = TAG_UNIT,
    True = TAG_TRUE,
    False = TAG_FALSE,
    Int = TAG_INT,
    Float = TAG_FLOAT,
    Text = TAG_TEXT,
    Bytes = TAG_BYTES,
    List = TAG_LIST,
    Object = TAG_OBJECT,
}

impl Tag {
    /// Payload width for tags whose encoding has a fixed size, excluding the
    /// tag byte itself.
    pub fn fixed_payload_len(self) -> Option<usize> {
        match self {
            Tag::Unit | Tag::True | Tag::False => Some(0),
            Tag::Int | Tag::Float => Some(SCALAR_LEN),
            Tag::Text | Tag::Bytes | Tag::List | Tag::Object => None,
        }
    }

    /// Short name of the value kind this tag encodes.
    pub fn kind(self) -> &'static str {
        match self {
            Tag::Unit => "unit",
            Tag::True | Tag::False => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Text => "text",
            Tag::Bytes => "bytes",
            Tag::List => "list",
            Tag::Object => "object",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Tag::List | Tag::Object)
    }
}

impl TryFrom<u8> for Tag {
    type Error = PackError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            TAG_UNIT => Tag::Unit,
            TAG_TRUE => Tag::True,
            TAG_FALSE => Tag::False,
            TAG_INT => Tag::Int,
            TAG_FLOAT => Tag::Float,
            TAG_TEXT => Tag::Text,
            TAG_BYTES => Tag::Bytes,
            TAG_LIST => Tag::List,
            TAG_OBJECT => Tag::Object,
            tag => return Err(PackError::UnknownTag { tag, offset: 0 }),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}
