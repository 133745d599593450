//! Fixed-capacity byte ring used for VM input and output staging.

use crate::error::{ExecError, ExecResult};

/// Byte ring with one wrapping cursor shared by reads and writes.
///
/// Neither direction signals overflow or underflow: the cursor wraps
/// modulo the capacity and later writes overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl CircularBuffer {
    /// Zero-filled buffer. A zero capacity is rejected.
    pub fn new(capacity: usize) -> ExecResult<Self> {
        if capacity == 0 {
            return Err(ExecError::InvalidConfig(
                "circular buffer capacity must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            data: vec![0; capacity],
            cursor: 0,
        })
    }

    /// Returns the byte at the cursor and advances it
    #[inline]
    pub fn read(&mut self) -> u8 {
        let value = self.data[self.cursor];
        self.advance();
        value
    }

    /// Stores a byte at the cursor and advances it
    #[inline]
    pub fn write(&mut self, value: u8) {
        self.data[self.cursor] = value;
        self.advance();
    }

    /// Writes every byte in order, wrapping as needed
    pub fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write(b);
        }
    }

    /// Moves the cursor back to the first cell
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.data.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = CircularBuffer::new(8).unwrap();
        assert_eq!(buf.as_bytes(), &[0u8; 8]);
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            CircularBuffer::new(0),
            Err(ExecError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_write_wraps_and_overwrites() {
        let n = 4;
        let k = 3;
        let mut buf = CircularBuffer::new(n).unwrap();
        for i in 0..(n + k) {
            buf.write(i as u8 + 1);
        }
        assert_eq!(buf.cursor(), k % n);
        // Cells 0..k were overwritten by the wrapped writes n+1..=n+k
        assert_eq!(buf.as_bytes(), &[5, 6, 7, 4]);
    }

    #[test]
    fn test_read_shares_cursor_with_write() {
        let mut buf = CircularBuffer::new(3).unwrap();
        buf.write_all(&[10, 20]);
        assert_eq!(buf.read(), 0);
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.read(), 10);
        assert_eq!(buf.read(), 20);
    }

    #[test]
    fn test_rewind() {
        let mut buf = CircularBuffer::new(4).unwrap();
        buf.write_all(b"ab");
        buf.rewind();
        assert_eq!(buf.read(), b'a');
        assert_eq!(buf.read(), b'b');
        assert_eq!(buf.read(), 0);
    }
}
