//! Auto-growing binary buffer writer.

/// Default initial allocation for a fresh [`Writer`].
const DEFAULT_ALLOC_SIZE: usize = 1024;

/// A binary writer over an auto-growing buffer.
///
/// `uint8[..x]` holds the bytes written so far. Multi-byte quantities are
/// little-endian. Length prefixes that are only known once a body has been
/// written use [`Writer::reserve`] followed by [`Writer::patch_u64_le`].
///
/// # Example
///
/// ```
/// use reproca_buffers::Writer;
///
/// let mut writer = Writer::new();
/// let slot = writer.reserve(8);
/// writer.buf(b"body");
/// writer.patch_u64_le(slot, 4);
/// assert_eq!(writer.flush(), [4, 0, 0, 0, 0, 0, 0, 0, b'b', b'o', b'd', b'y']);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// Backing storage. Bytes past `x` are scratch space.
    pub uint8: Vec<u8>,
    /// Write cursor.
    pub x: usize,
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer with the default allocation size.
    pub fn new() -> Self {
        Self::with_alloc_size(DEFAULT_ALLOC_SIZE)
    }

    /// Creates a writer whose buffer starts at `alloc_size` bytes.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: vec![0; alloc_size],
            x: 0,
            alloc_size,
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Returns the written bytes and resets the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[..self.x].to_vec();
        self.reset();
        out
    }

    /// Returns the written bytes without resetting.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    /// Makes sure at least `capacity` more bytes fit after the cursor.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(self.alloc_size);
            self.uint8.resize(required.max(grown), 0);
        }
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        let len = data.len();
        self.ensure_capacity(len);
        self.uint8[self.x..self.x + len].copy_from_slice(data);
        self.x += len;
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    #[inline]
    pub fn u64_le(&mut self, val: u64) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes a signed 64-bit integer (little-endian).
    #[inline]
    pub fn i64_le(&mut self, val: i64) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes a 64-bit float (little-endian).
    #[inline]
    pub fn f64_le(&mut self, val: f64) {
        self.buf(&val.to_le_bytes());
    }

    /// Writes `n` zero bytes and returns the offset they start at.
    pub fn reserve(&mut self, n: usize) -> usize {
        self.ensure_capacity(n);
        let offset = self.x;
        self.uint8[offset..offset + n].fill(0);
        self.x += n;
        offset
    }

    /// Overwrites 8 previously written bytes at `offset` with `val`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 8` is beyond the written region.
    pub fn patch_u64_le(&mut self, offset: usize, val: u64) {
        assert!(offset + 8 <= self.x, "patch outside written region");
        self.uint8[offset..offset + 8].copy_from_slice(&val.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_past_alloc_size() {
        let mut writer = Writer::with_alloc_size(2);
        writer.buf(&[1, 2, 3, 4, 5]);
        writer.u8(6);
        assert_eq!(writer.flush(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_reset_discards() {
        let mut writer = Writer::new();
        writer.u8(1);
        writer.reset();
        writer.u8(2);
        assert_eq!(writer.flush(), vec![2]);
    }

    #[test]
    fn test_reserve_zeroes_scratch() {
        let mut writer = Writer::with_alloc_size(16);
        writer.u64_le(u64::MAX);
        writer.reset();
        let slot = writer.reserve(8);
        assert_eq!(slot, 0);
        assert_eq!(writer.as_slice(), &[0; 8]);
    }

    #[test]
    fn test_patch() {
        let mut writer = Writer::new();
        writer.u8(0x08);
        let slot = writer.reserve(8);
        writer.i64_le(-1);
        writer.patch_u64_le(slot, 8);
        let out = writer.flush();
        assert_eq!(&out[1..9], &8u64.to_le_bytes());
        assert_eq!(&out[9..], &[0xff; 8]);
    }
}
