//! Part transforms: the position/normal matrix pair stored per part id.

use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Mat4};

/// Anything that can hand out a part transform.
///
/// The table only reads both matrices during [`crate::PartTable::set`] and
/// copies them, so implementors keep full ownership.
pub trait TransformSource {
    /// Model-space position matrix.
    fn position_matrix(&self) -> &Mat4;

    /// Normal/orientation matrix matching [`Self::position_matrix`].
    fn normal_matrix(&self) -> &Mat3;
}

/// A single part transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformEntry {
    /// Position matrix.
    pub position: Mat4,
    /// Normal matrix.
    pub normal: Mat3,
}

impl TransformEntry {
    /// Identity transform.
    pub const IDENTITY: Self = Self::new(Mat4::IDENTITY, Mat3::IDENTITY);

    /// Creates an entry from both matrices.
    #[must_use]
    pub const fn new(position: Mat4, normal: Mat3) -> Self {
        Self { position, normal }
    }

    /// Copies the current matrices out of `source`.
    #[must_use]
    pub fn from_source<S: TransformSource + ?Sized>(source: &S) -> Self {
        Self::new(*source.position_matrix(), *source.normal_matrix())
    }
}

impl TransformSource for TransformEntry {
    #[inline]
    fn position_matrix(&self) -> &Mat4 {
        &self.position
    }

    #[inline]
    fn normal_matrix(&self) -> &Mat3 {
        &self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(TransformEntry::default(), TransformEntry::IDENTITY);
    }

    #[test]
    fn test_from_source_copies() {
        let src = TransformEntry::new(
            Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0)),
            Mat3::IDENTITY.scaled(-1.0),
        );
        let copy = TransformEntry::from_source(&src);
        assert_eq!(copy, src);
        assert_eq!(copy.position_matrix().col(3), [4.0, 5.0, 6.0, 1.0]);
    }
}
