//! CPU-side staging memory for instance uploads.
//!
//! Pre-allocates once and keeps its bytes across frames; only grows when a
//! frame needs more than it has ever needed before.

use partbatch_core::InstanceDestination;

/// Owned byte buffer with a write cursor.
#[derive(Debug, Default)]
pub struct StagingBuffer {
    /// Backing bytes. Length is the capacity; stale content past the cursor
    /// is left in place between frames.
    bytes: Vec<u8>,
    /// Write cursor.
    position: usize,
}

impl StagingBuffer {
    /// Creates a buffer of `capacity` zeroed bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            position: 0,
        }
    }

    /// Total bytes allocated.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Cursor position, which is also the number of bytes written this frame.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Rewinds the cursor. Bytes are kept.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Makes sure at least `additional` bytes remain past the cursor.
    ///
    /// Grows to the next power of two so repeated small overflows do not
    /// reallocate every frame. Bytes already written are preserved.
    ///
    /// Returns `true` if the buffer grew.
    pub fn reserve(&mut self, additional: usize) -> bool {
        let needed = self.position + additional;
        if needed <= self.bytes.len() {
            return false;
        }
        let new_capacity = needed.next_power_of_two();
        tracing::debug!(
            old_capacity = self.bytes.len(),
            new_capacity,
            "staging buffer grown"
        );
        self.bytes.resize(new_capacity, 0);
        true
    }

    /// Bytes written since the last reset.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.position]
    }

    fn window(&mut self, offset: usize, len: usize) -> &mut [u8] {
        let start = self.position + offset;
        &mut self.bytes[start..start + len]
    }
}

impl InstanceDestination for StagingBuffer {
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
