//! Binary buffer utilities for reproca.
//!
//! # Overview
//!
//! - [`Reader`] - Reads little-endian binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer, with placeholder patching
//! - [`print_octets`] / [`hexdump`] - Debug formatting for byte slices
//!
//! # Example
//!
//! ```
//! use reproca_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x04);
//! writer.i64_le(-7);
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x04);
//! assert_eq!(reader.i64_le().unwrap(), -7);
//! ```

mod print_octets;
mod reader;
mod writer;

pub use print_octets::{hexdump, print_octets};
pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// A length did not fit the platform's address space.
    Overflow,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::Overflow => write!(f, "buffer overflow"),
        }
    }
}

impl std::error::Error for BufferError {}
