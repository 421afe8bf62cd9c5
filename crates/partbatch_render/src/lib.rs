//! # PARTBATCH Render
//!
//! Per-frame packing of part tables into instance-buffer bytes.
//!
//! ## Frame Flow
//!
//! ```text
//! begin_frame → push_table (per visible model instance) → end_frame → upload
//!                    │
//!                    └─ PartRange → first_instance / instance_count of the draw
//! ```
//!
//! GPU upload itself lives with the renderer; this crate only produces bytes.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod batcher;
pub mod error;
pub mod staging;

pub use batcher::{BatchStats, InstanceBatcher, PartRange};
pub use error::{BatchError, BatchResult};
pub use staging::StagingBuffer;
