//! Hierarchical transform stack that produces part transforms.
//!
//! Walk a model's part tree, push before descending into a child, apply the
//! child's local transform, hand the stack to [`crate::PartTable::set`], pop
//! on the way back up.

use crate::entry::{TransformEntry, TransformSource};
use crate::math::{Mat3, Mat4, Quaternion, Vec3};

/// Push/pop stack of part transforms. The root is the identity.
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    top: TransformEntry,
    saved: Vec<TransformEntry>,
}

impl TransformStack {
    /// Creates a stack holding only the identity root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            top: TransformEntry::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// Saves the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.top);
    }

    /// Restores the last saved transform.
    ///
    /// Returns `false` and leaves the stack alone if only the root is left.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(previous) => {
                self.top = previous;
                true
            }
            None => false,
        }
    }

    /// Current transform.
    #[inline]
    #[must_use]
    pub const fn peek(&self) -> &TransformEntry {
        &self.top
    }

    /// Number of pushes not yet popped.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// True when nothing is pushed.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.saved.is_empty()
    }

    /// Drops every saved transform and resets the root to identity.
    pub fn reset(&mut self) {
        self.saved.clear();
        self.top = TransformEntry::IDENTITY;
    }

    /// Applies a translation. The normal matrix is unaffected.
    pub fn translate(&mut self, offset: Vec3) {
        self.top.position = self.top.position * Mat4::from_translation(offset);
    }

    /// Applies a scale.
    ///
    /// A uniform scale only flips the normals when negative. A non-uniform
    /// scale applies the inverse scale to the normals, normalized by its
    /// cube root so unit normals stay roughly unit length.
    pub fn scale(&mut self, factors: Vec3) {
        self.top.position = self.top.position * Mat4::from_scale(factors);

        let Vec3 { x, y, z } = factors;
        if x == y && y == z {
            if x < 0.0 {
                self.top.normal = self.top.normal.scaled(-1.0);
            }
            return;
        }

        let inv = Vec3::new(1.0 / x, 1.0 / y, 1.0 / z);
        let norm = (inv.x * inv.y * inv.z).cbrt();
        let correction = Mat3::from_diagonal(Vec3::new(inv.x / norm, inv.y / norm, inv.z / norm));
        self.top.normal = self.top.normal * correction;
    }

    /// Applies a rotation to both matrices.
    pub fn rotate(&mut self, rotation: Quaternion) {
        let m = rotation.to_mat3();
        self.top.position = self.top.position * Mat4::from_mat3(m);
        self.top.normal = self.top.normal * m;
    }

    /// Post-multiplies both matrices by `local`.
    pub fn multiply(&mut self, local: &TransformEntry) {
        self.top.position = self.top.position * local.position;
        self.top.normal = self.top.normal * local.normal;
    }
}

impl TransformSource for TransformStack {
    #[inline]
    fn position_matrix(&self) -> &Mat4 {
        &self.top.position
    }

    #[inline]
    fn normal_matrix(&self) -> &Mat3 {
        &self.top.normal
    }
}
