//! # Part Table
//!
//! Sparse, index-addressed storage for the part transforms of one model
//! instance, plus its serialization into the instance buffer.
//!
//! ## Frame cycle
//!
//! ```text
//! set(id, ..) x N  →  serialize(dest, default)  →  clear()
//! ```
//!
//! `clear` only resets the prefix that was touched, and the backing storage
//! is kept, so a warm table does not allocate.

use crate::codec::{encode_entry, encode_null, ENTRY_BYTE_SIZE};
use crate::config::PartBatchConfig;
use crate::destination::InstanceDestination;
use crate::entry::{TransformEntry, TransformSource};
use crate::error::{TableError, TableResult};

/// Capacity used by [`PartTable::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// State of one part id.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Slot {
    /// Never written since the last clear. Serialized as the caller's default.
    #[default]
    Unwritten,
    /// Explicitly written with no transform. Serialized as zero bytes.
    Absent,
    /// Explicitly written transform.
    Present(TransformEntry),
}

impl Slot {
    /// True for anything but [`Slot::Unwritten`].
    #[inline]
    #[must_use]
    pub const fn is_written(&self) -> bool {
        !matches!(self, Self::Unwritten)
    }

    /// The stored transform, if any.
    #[inline]
    #[must_use]
    pub const fn entry(&self) -> Option<&TransformEntry> {
        match self {
            Self::Present(entry) => Some(entry),
            Self::Unwritten | Self::Absent => None,
        }
    }
}

/// Sparse table of part transforms keyed by part id.
///
/// # Thread Safety
///
/// No internal locking. One writer, one reader, one thread per frame.
#[derive(Clone, Debug)]
pub struct PartTable {
    /// One slot per part id. Length is the capacity and never shrinks.
    slots: Box<[Slot]>,
    /// Highest id written since the last clear.
    highest: Option<usize>,
}

impl PartTable {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Unwritten; capacity].into_boxed_slice(),
            highest: None,
        }
    }

    /// Creates an empty table sized from the config.
    #[must_use]
    pub fn from_config(config: &PartBatchConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Number of slots currently allocated.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes the transform for `id`, or marks it null when `entry` is `None`.
    ///
    /// Grows the table to the next power of two when `id` does not fit.
    /// The matrices are copied, so `entry` may change right after.
    pub fn set<S>(&mut self, id: usize, entry: Option<&S>)
    where
        S: TransformSource + ?Sized,
    {
        if id >= self.slots.len() {
            self.grow(id);
        }
        if self.highest.map_or(true, |h| id > h) {
            self.highest = Some(id);
        }

        self.slots[id] = match entry {
            Some(source) => Slot::Present(TransformEntry::from_source(source)),
            None => Slot::Absent,
        };
    }

    /// Marks `id` as written with no transform.
    pub fn set_null(&mut self, id: usize) {
        self.set::<TransformEntry>(id, None);
    }

    /// Whether `id` was written since the last clear.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.capacity()`.
    #[inline]
    #[must_use]
    pub fn is_written(&self, id: usize) -> bool {
        self.slot(id).is_written()
    }

    /// Stored transform for `id`. `None` for both null and unwritten ids.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.capacity()`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&TransformEntry> {
        self.slot(id).entry()
    }

    /// Full slot state for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.capacity()`.
    #[inline]
    #[must_use]
    pub fn slot(&self, id: usize) -> &Slot {
        match self.try_slot(id) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked variant of [`Self::slot`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfRange`] if `id >= self.capacity()`.
    pub fn try_slot(&self, id: usize) -> TableResult<&Slot> {
        self.slots.get(id).ok_or(TableError::OutOfRange {
            id,
            capacity: self.slots.len(),
        })
    }

    /// Resets every id up to the high-water mark. Capacity is kept.
    pub fn clear(&mut self) {
        if let Some(highest) = self.highest.take() {
            self.slots[..=highest].fill(Slot::Unwritten);
        }
    }

    /// Highest id written since the last clear.
    #[inline]
    #[must_use]
    pub const fn highest_written_id(&self) -> Option<usize> {
        self.highest
    }

    /// Highest written id, or `-1` when empty.
    #[must_use]
    pub fn highest_written_id_signed(&self) -> i64 {
        self.highest
            .map_or(-1, |h| i64::try_from(h).unwrap_or(i64::MAX))
    }

    /// True when nothing was written since the last clear.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.highest.is_none()
    }

    /// Number of entries [`Self::serialize`] emits: high-water mark + 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.highest.map_or(0, |h| h + 1)
    }

    /// Bytes [`Self::serialize`] writes.
    #[inline]
    #[must_use]
    pub fn serialized_size(&self) -> usize {
        self.len() * ENTRY_BYTE_SIZE
    }

    /// Slots in `[0, high-water mark]`, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots[..self.len()].iter().enumerate()
    }

    /// Serializes ids `[0, high-water mark]` into `dest` and advances its cursor.
    ///
    /// Written transforms are encoded as-is, null ids as zero bytes, and ids
    /// never written are encoded as `default`. The table is not modified.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExceeded`] if `dest` has fewer bytes
    /// remaining than [`Self::serialized_size`]. Nothing is written and the
    /// cursor does not move.
    pub fn serialize<D, S>(&self, dest: &mut D, default: &S) -> TableResult<usize>
    where
        D: InstanceDestination + ?Sized,
        S: TransformSource + ?Sized,
    {
        let required = self.serialized_size();
        let available = dest.remaining();
        if required > available {
            return Err(TableError::CapacityExceeded {
                required,
                available,
            });
        }

        for (id, slot) in self.iter() {
            let offset = id * ENTRY_BYTE_SIZE;
            match slot {
                Slot::Present(entry) => encode_entry(dest, offset, entry),
                Slot::Absent => encode_null(dest, offset),
                Slot::Unwritten => encode_entry(dest, offset, default),
            }
        }

        dest.advance(required);
        Ok(required)
    }

    fn grow(&mut self, id: usize) {
        let old_capacity = self.slots.len();
        let new_capacity = (id + 1).next_power_of_two();

        let mut slots = std::mem::take(&mut self.slots).into_vec();
        slots.resize(new_capacity, Slot::Unwritten);
        self.slots = slots.into_boxed_slice();

        tracing::trace!(id, old_capacity, new_capacity, "part table grown");
    }
}

impl Default for PartTable {
    fn default() -> Self {
        Self::new()
    }
}
