//! # Instance Entry Codec
//!
//! One part transform occupies [`ENTRY_BYTE_SIZE`] bytes in the instance
//! buffer, little-endian `f32` throughout:
//!
//! ```text
//! offset  0..64   position matrix, column 0..3, rows 0..3 per column
//! offset 64..112  normal matrix, 3 columns of 3 rows, each padded to vec4
//!                 pad floats at 76, 92, 108
//! ```
//!
//! The encoder never touches the pad floats. Only a null entry writes the
//! whole 112 bytes (all zero).

use crate::destination::InstanceDestination;
use crate::entry::{TransformEntry, TransformSource};
use crate::math::{Mat3, Mat4};

/// Floats per entry, padding included.
pub const ENTRY_FLOATS: usize = 16 + 12;

/// Stride of one entry in the instance buffer.
pub const ENTRY_BYTE_SIZE: usize = ENTRY_FLOATS * 4;

/// Byte offset of the normal block inside an entry.
pub const NORMAL_BLOCK_OFFSET: usize = 64;

/// Byte stride between normal matrix columns (three floats plus one pad).
pub const NORMAL_COLUMN_STRIDE: usize = 16;

/// Byte offsets of the pad floats inside an entry.
pub const PADDING_OFFSETS: [usize; 3] = [76, 92, 108];

/// Encodes `source` at `offset` bytes past the destination cursor.
///
/// The caller must have checked that `offset + ENTRY_BYTE_SIZE` fits.
pub fn encode_entry<D, S>(dest: &mut D, offset: usize, source: &S)
where
    D: InstanceDestination + ?Sized,
    S: TransformSource + ?Sized,
{
    let position = source.position_matrix();
    for (i, value) in position.to_cols_array().into_iter().enumerate() {
        dest.write_f32(offset + i * 4, value);
    }

    let normal = source.normal_matrix();
    for (c, column) in normal.cols.iter().enumerate() {
        let base = offset + NORMAL_BLOCK_OFFSET + c * NORMAL_COLUMN_STRIDE;
        for (r, value) in column.iter().enumerate() {
            dest.write_f32(base + r * 4, *value);
        }
        // pad float at base + 12 left as-is
    }
}

/// Writes an all-zero entry at `offset` bytes past the destination cursor.
pub fn encode_null<D>(dest: &mut D, offset: usize)
where
    D: InstanceDestination + ?Sized,
{
    dest.fill_zero(offset, ENTRY_BYTE_SIZE);
}

/// Reads one entry back from its encoded bytes. Pad floats are ignored.
///
/// # Panics
///
/// Panics if `bytes` is shorter than [`ENTRY_BYTE_SIZE`].
#[must_use]
pub fn decode_entry(bytes: &[u8]) -> TransformEntry {
    assert!(
        bytes.len() >= ENTRY_BYTE_SIZE,
        "entry needs {ENTRY_BYTE_SIZE} bytes, got {}",
        bytes.len()
    );
    let read = |offset: usize| {
        f32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };

    let mut position = [0.0f32; 16];
    for (i, value) in position.iter_mut().enumerate() {
        *value = read(i * 4);
    }

    let mut normal = [[0.0f32; 3]; 3];
    for (c, column) in normal.iter_mut().enumerate() {
        let base = NORMAL_BLOCK_OFFSET + c * NORMAL_COLUMN_STRIDE;
        for (r, value) in column.iter_mut().enumerate() {
            *value = read(base + r * 4);
        }
    }

    TransformEntry::new(Mat4::from_cols_array(position), Mat3::from_cols(normal))
}
