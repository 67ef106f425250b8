//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and an exclusive end bound. All
/// multi-byte quantities are little-endian. Every read is bounds-checked and
/// reports [`BufferError::EndOfBuffer`] rather than panicking, so a decoder
/// built on top of it can turn a short stream into a proper error.
///
/// # Example
///
/// ```
/// use reproca_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u64_le().unwrap(), 2);
/// assert_eq!(reader.size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader over `uint8[x..end]`.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self {
            uint8,
            x: x.min(end),
            end,
        }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.end = uint8.len();
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns the absolute cursor position in the underlying slice.
    pub fn position(&self) -> usize {
        self.x
    }

    #[inline]
    fn assert_size(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x = x + size;
        Ok(&self.uint8[x..x + size])
    }

    /// Creates a new Reader bounded to the next `size` bytes and advances the
    /// cursor past them.
    ///
    /// Positions reported by the returned reader stay absolute.
    pub fn cut(&mut self, size: usize) -> Result<Reader<'a>, BufferError> {
        self.assert_size(size)?;
        let slice = Reader::from_slice(self.uint8, self.x, self.x + size);
        self.x += size;
        Ok(slice)
    }

    /// Reads bytes up to (not including) the next `terminator`, then consumes
    /// the terminator as well.
    pub fn until(&mut self, terminator: u8) -> Result<&'a [u8], BufferError> {
        let window = &self.uint8[self.x..self.end];
        let len = window
            .iter()
            .position(|&b| b == terminator)
            .ok_or(BufferError::EndOfBuffer)?;
        let bin = &window[..len];
        self.x += len + 1;
        Ok(bin)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    fn array8(&mut self) -> Result<[u8; 8], BufferError> {
        self.assert_size(8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.uint8[self.x..self.x + 8]);
        self.x += 8;
        Ok(bytes)
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        self.array8().map(u64::from_le_bytes)
    }

    /// Reads a little-endian u64 length prefix as a `usize`.
    pub fn len_u64_le(&mut self) -> Result<usize, BufferError> {
        let len = self.u64_le()?;
        usize::try_from(len).map_err(|_| BufferError::Overflow)
    }

    /// Reads a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64_le(&mut self) -> Result<i64, BufferError> {
        self.array8().map(i64::from_le_bytes)
    }

    /// Reads a 64-bit floating point number (little-endian).
    #[inline]
    pub fn f64_le(&mut self) -> Result<f64, BufferError> {
        self.array8().map(f64::from_le_bytes)
    }
}
