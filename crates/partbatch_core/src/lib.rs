//! # PARTBATCH Core
//!
//! Sparse part-transform tables for instanced rendering of multi-part models.
//!
//! Every part of a model has an integer id and a transform (position matrix
//! plus normal matrix). A [`PartTable`] collects the transforms written in a
//! frame and packs ids `[0, highest]` into a fixed-stride, GPU-ready byte
//! layout, filling ids that were never written with a caller-supplied default.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed stride** - every entry is [`ENTRY_BYTE_SIZE`] bytes
//! 2. **Check before write** - capacity is verified before the first byte
//! 3. **Warm tables never allocate** - clear keeps the storage
//!
//! ## Example
//!
//! ```rust
//! use partbatch_core::{ByteCursor, PartTable, TransformEntry, ENTRY_BYTE_SIZE};
//!
//! let mut table = PartTable::new();
//! table.set(0, Some(&TransformEntry::IDENTITY));
//! table.set_null(2);
//!
//! let mut bytes = vec![0u8; table.serialized_size()];
//! let written = table.serialize(&mut ByteCursor::new(&mut bytes), &TransformEntry::IDENTITY)?;
//! assert_eq!(written, 3 * ENTRY_BYTE_SIZE);
//!
//! table.clear();
//! # Ok::<(), partbatch_core::TableError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod codec;
pub mod config;
pub mod destination;
pub mod entry;
pub mod error;
pub mod math;
pub mod stack;
pub mod table;

pub use codec::{decode_entry, encode_entry, encode_null, ENTRY_BYTE_SIZE};
pub use config::PartBatchConfig;
pub use destination::{ByteCursor, InstanceDestination};
pub use entry::{TransformEntry, TransformSource};
pub use error::{ConfigError, ConfigResult, TableError, TableResult};
pub use math::{Mat3, Mat4, Quaternion, Vec3};
pub use stack::TransformStack;
pub use table::{PartTable, Slot, DEFAULT_CAPACITY};
