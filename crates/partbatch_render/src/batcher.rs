//! # Instance Batcher
//!
//! Packs the part tables of many model instances back to back into one
//! staging buffer per frame. Each packed table gets a [`PartRange`] telling
//! the draw call where its entries start in the instance buffer.
//!
//! The staging memory is double buffered: the CPU fills one side while the
//! previous frame's side is still being uploaded.

use partbatch_core::{
    PartBatchConfig, PartTable, TableError, TransformSource, ENTRY_BYTE_SIZE,
};

use crate::error::{BatchError, BatchResult};
use crate::staging::StagingBuffer;

/// Where one table's entries landed in the frame's instance buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartRange {
    /// Index of the table's part 0, in entries.
    pub first_entry: usize,
    /// Entries written for the table (its high-water mark + 1).
    pub entry_count: usize,
}

impl PartRange {
    /// Offset of the first entry in bytes.
    #[must_use]
    pub const fn byte_offset(&self) -> usize {
        self.first_entry * ENTRY_BYTE_SIZE
    }

    /// True if the table was empty and nothing was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Tables packed this frame.
    pub tables: usize,
    /// Entries packed this frame.
    pub entries: usize,
    /// Bytes packed this frame.
    pub bytes: usize,
    /// Times the staging buffer had to grow this frame.
    pub staging_grows: usize,
}

/// Double-buffered packer for part tables.
pub struct InstanceBatcher {
    /// CPU-side staging buffers (double buffered).
    staging: [StagingBuffer; 2],
    /// Current write buffer index.
    write_index: usize,
    /// Frame ceiling in bytes.
    max_frame_bytes: usize,
    /// Counters for the frame being written.
    stats: BatchStats,
}

impl InstanceBatcher {
    /// Creates a batcher with both staging buffers pre-allocated.
    ///
    /// # Note
    /// This allocates `2 * config.staging_bytes()`. Call once during initialization.
    #[must_use]
    pub fn new(config: &PartBatchConfig) -> Self {
        Self {
            staging: [
                StagingBuffer::with_capacity(config.staging_bytes()),
                StagingBuffer::with_capacity(config.staging_bytes()),
            ],
            write_index: 0,
            max_frame_bytes: config.max_frame_bytes(),
            stats: BatchStats::default(),
        }
    }

    /// Begins a new frame: swaps buffers and rewinds the write side.
    pub fn begin_frame(&mut self) {
        self.write_index = 1 - self.write_index;
        self.staging[self.write_index].reset();
        self.stats = BatchStats::default();
    }

    /// Appends `table` to the frame, filling unwritten ids with `default`.
    ///
    /// If the staging buffer is too small it grows once and the table is
    /// serialized again. The table itself is not modified; clear it when the
    /// caller is done with the frame.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::EntryLimit`] if the frame would pass
    /// `max_entries_per_frame`. Nothing is written in that case.
    pub fn push_table<S>(&mut self, table: &PartTable, default: &S) -> BatchResult<PartRange>
    where
        S: TransformSource + ?Sized,
    {
        let staging = &mut self.staging[self.write_index];
        let used = staging.position();
        let required = table.serialized_size();

        if used + required > self.max_frame_bytes {
            let err = BatchError::EntryLimit {
                used: used / ENTRY_BYTE_SIZE,
                requested: table.len(),
                limit: self.max_frame_bytes / ENTRY_BYTE_SIZE,
            };
            tracing::warn!(%err, "part table dropped from frame");
            return Err(err);
        }

        let written = match table.serialize(&mut *staging, default) {
            Ok(written) => written,
            Err(TableError::CapacityExceeded { required, .. }) => {
                staging.reserve(required);
                self.stats.staging_grows += 1;
                table.serialize(&mut *staging, default)?
            }
            Err(err) => return Err(err.into()),
        };

        let range = PartRange {
            first_entry: used / ENTRY_BYTE_SIZE,
            entry_count: written / ENTRY_BYTE_SIZE,
        };
        self.stats.tables += 1;
        self.stats.entries += range.entry_count;
        self.stats.bytes += written;
        Ok(range)
    }

    /// Finishes the frame and returns the bytes to upload.
    #[must_use]
    pub fn end_frame(&self) -> (&[u8], BatchStats) {
        (self.staging[self.write_index].as_bytes(), self.stats)
    }

    /// Counters for the frame being written.
    #[must_use]
    pub const fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Returns the read buffer (previous frame, for upload while writing the other).
    #[must_use]
    pub fn read_buffer(&self) -> &[u8] {
        self.staging[1 - self.write_index].as_bytes()
    }

    /// Allocated bytes of the write buffer.
    #[must_use]
    pub fn staging_capacity(&self) -> usize {
        self.staging[self.write_index].capacity()
    }
}

impl Default for InstanceBatcher {
    fn default() -> Self {
        Self::new(&PartBatchConfig::default())
    }
}
