//! Compact self-describing binary value format.
//!
//! Every value starts with a tag byte. Lists and objects carry the byte length
//! of their body up front, which lets a reader skip a whole subtree without
//! decoding it and look up a single field directly in the encoded bytes.
//!
//! - [`Encoder`] / [`encode`] turn a [`Value`] into bytes.
//! - [`Decoder`] / [`decode`] turn bytes back into a value plus the exact
//!   number of bytes consumed.
//! - [`seek`] / [`get`] / [`Decoder::find_path`] navigate to one field
//!   without materialising its siblings.
//! - [`pack`] / [`unpack`] go through serde for arbitrary Rust types;
//!   [`to_value`] / [`from_value`] stop at the [`Value`] level.
//!
//! # Example
//!
//! ```
//! use reproca_pack::{decode, encode, get, PathStep, Value};
//!
//! let user = Value::object([
//!     ("ID", Value::Int(0)),
//!     ("NAME", Value::from("aspizu")),
//!     ("ADMN", Value::Bool(true)),
//! ]);
//! let bytes = encode(&user).unwrap();
//!
//! let (back, consumed) = decode(&bytes).unwrap();
//! assert_eq!(back, user);
//! assert_eq!(consumed, bytes.len());
//!
//! let name = get(&bytes, &[PathStep::Key("NAME")]).unwrap();
//! assert_eq!(name, Value::from("aspizu"));
//! ```
//!
//! # Limitations
//!
//! Object keys occupy a fixed 4-byte ASCII slot: longer keys are truncated
//! (or rejected with [`KeyMode::Strict`]) and keys sharing a 4-byte prefix
//! collide. Text is zero-terminated, so a string containing U+0000 cannot be
//! encoded.

pub mod constants;
mod de;
mod decoder;
mod encoder;
mod error;
mod json;
mod ser;
mod seek;
mod shared;
mod stream;
mod value;

pub use constants::Tag;
pub use de::{from_value, unpack};
pub use decoder::{Decoder, DecoderOptions, DEFAULT_MAX_DEPTH};
pub use encoder::{key_slot, Encoder, EncoderOptions, KeyMode};
pub use error::{PackError, Result};
pub use ser::{pack, to_value, Serializer};
pub use seek::{get, seek, seek_field, PathStep, Selector};
pub use shared::{decode, encode, encode_with, unpack_value};
pub use stream::{read_frame, unpack_from};
pub use value::{Object, Value};
