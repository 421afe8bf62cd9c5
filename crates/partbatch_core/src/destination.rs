//! Write targets for serialized part tables.
//!
//! A destination is a byte region with a write cursor. Offsets passed to
//! [`InstanceDestination::write_f32`] and [`InstanceDestination::fill_zero`]
//! are relative to the cursor; nothing moves the cursor except
//! [`InstanceDestination::advance`].

/// A byte region that serialized entries are written into.
pub trait InstanceDestination {
    /// Bytes available between the cursor and the end of the region.
    fn remaining(&self) -> usize;

    /// Writes `value` as little-endian at `offset` bytes past the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 4 > self.remaining()`.
    fn write_f32(&mut self, offset: usize, value: f32);

    /// Zeroes `len` bytes starting `offset` bytes past the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len > self.remaining()`.
    fn fill_zero(&mut self, offset: usize, len: usize);

    /// Moves the cursor forward by `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes > self.remaining()`.
    fn advance(&mut self, bytes: usize);
}

/// Destination over a borrowed byte slice.
///
/// Useful for writing straight into a mapped GPU buffer range.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a mut [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current cursor position from the start of the slice.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Everything before the cursor.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.bytes[..self.position]
    }

    fn window(&mut self, offset: usize, len: usize) -> &mut [u8] {
        let start = self.position + offset;
        &mut self.bytes[start..start + len]
    }
}

impl InstanceDestination for ByteCursor<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    #[inline]
    fn write_f32(&mut self, offset: usize, value: f32) {
        self.window(offset, 4).copy_from_slice(&value.to_le_bytes());
    }

    fn fill_zero(&mut self, offset: usize, len: usize) {
        self.window(offset, len).fill(0);
    }

    fn advance(&mut self, bytes: usize) {
        assert!(
            bytes <= self.remaining(),
            "cannot advance {bytes} bytes, only {} remaining",
            self.remaining()
        );
        self.position += bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_relative_to_cursor() {
        let mut bytes = [0xAAu8; 16];
        let mut cursor = ByteCursor::new(&mut bytes);

        cursor.advance(4);
        cursor.write_f32(0, 1.0);
        cursor.fill_zero(4, 4);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.remaining(), 12);
        assert_eq!(cursor.written(), &[0xAA; 4]);

        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &[0; 4]);
        assert_eq!(&bytes[12..], &[0xAA; 4]);
    }

    #[test]
    #[should_panic(expected = "cannot advance")]
    fn test_advance_past_end_panics() {
        let mut bytes = [0u8; 8];
        let mut cursor = ByteCursor::new(&mut bytes);
        cursor.advance(9);
    }

    #[test]
    #[should_panic]
    fn test_write_past_end_panics() {
        let mut bytes = [0u8; 8];
        let mut cursor = ByteCursor::new(&mut bytes);
        cursor.write_f32(6, 1.0);
    }
}
