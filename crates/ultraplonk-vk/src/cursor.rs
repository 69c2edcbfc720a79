//! Bounds-checked sequential reads over a byte buffer

use crate::errors::VkError;

/// Forward-only reader over an immutable byte buffer.
///
/// Every read advances an internal offset. A failed read reports the
/// offset at which the shortfall was detected and is fatal to the
/// surrounding decode; there is no retry or rewind.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current read position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], VkError> {
        if self.remaining() < n {
            return Err(VkError::Truncated {
                offset: self.offset,
                wanted: n - self.remaining(),
            });
        }
        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32, VkError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a single byte that must be exactly 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool, VkError> {
        let offset = self.offset;
        match self.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(VkError::InvalidBool { offset, value }),
        }
    }

    /// Read exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], VkError> {
        self.take(n)
    }

    /// Read `n` bytes and decode them as UTF-8 text.
    pub fn read_utf8(&mut self, n: usize) -> Result<&'a str, VkError> {
        let offset = self.offset;
        let bytes = self.take(n)?;
        core::str::from_utf8(bytes).map_err(|_| VkError::InvalidUtf8 { offset })
    }

    /// Advance past `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<(), VkError> {
        self.take(n).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_be() {
        let mut cur = ByteCursor::new(&[0x00, 0x00, 0x01, 0x02, 0xff]);
        assert_eq!(cur.read_u32_be().unwrap(), 258);
        assert_eq!(cur.offset(), 4);
        assert_eq!(cur.remaining(), 1);
    }

    #[test]
    fn test_read_u32_be_truncated() {
        let mut cur = ByteCursor::new(&[0x00, 0x01]);
        assert_eq!(
            cur.read_u32_be(),
            Err(VkError::Truncated {
                offset: 0,
                wanted: 2
            })
        );
    }

    #[test]
    fn test_read_bool() {
        let mut cur = ByteCursor::new(&[0, 1, 2]);
        assert_eq!(cur.read_bool().unwrap(), false);
        assert_eq!(cur.read_bool().unwrap(), true);
        assert_eq!(
            cur.read_bool(),
            Err(VkError::InvalidBool {
                offset: 2,
                value: 2
            })
        );
    }

    #[test]
    fn test_read_utf8() {
        let mut cur = ByteCursor::new(b"ID_1\xff\xfe");
        assert_eq!(cur.read_utf8(4).unwrap(), "ID_1");
        assert_eq!(cur.read_utf8(2), Err(VkError::InvalidUtf8 { offset: 4 }));
    }

    #[test]
    fn test_skip_and_offset() {
        let mut cur = ByteCursor::new(&[0u8; 8]);
        cur.skip(3).unwrap();
        assert_eq!(cur.offset(), 3);
        assert_eq!(
            cur.skip(6),
            Err(VkError::Truncated {
                offset: 3,
                wanted: 1
            })
        );
        // A failed skip does not advance
        assert_eq!(cur.offset(), 3);
    }
}
