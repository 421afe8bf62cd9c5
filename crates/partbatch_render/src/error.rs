//! # Batching Error Types

use partbatch_core::TableError;
use thiserror::Error;

/// Errors that can occur while packing a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// A part table failed to serialize.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The frame would exceed its configured entry ceiling.
    #[error("frame entry limit reached: {used} used, {requested} requested, limit {limit}")]
    EntryLimit {
        /// Entries already packed this frame.
        used: usize,
        /// Entries the rejected table needed.
        requested: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

/// Result type for batching operations.
pub type BatchResult<T> = Result<T, BatchError>;
