//! Matrix and vector types used by part transforms.
//!
//! Matrices are stored column by column, which is the order the instance
//! encoder emits them in and the order the vertex shader expects.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - translation, scale, rotation axis
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns the vector scaled to unit length, or zero for a zero vector.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len)
        } else {
            Self::ZERO
        }
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `radians` around `axis`. The axis does not need to be normalized.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let axis = axis.normalize_or_zero();
        let (sin, cos) = (radians * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Rotation matrix of this quaternion. Assumes unit length.
    #[must_use]
    pub fn to_mat3(self) -> Mat3 {
        let Self { x, y, z, w } = self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Mat3::from_cols([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 3x3 matrix, column-major. Used for normal/orientation transforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    /// Columns; `cols[c][r]` is row `r` of column `c`.
    pub cols: [[f32; 3]; 3],
}

impl Mat3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self::from_cols([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// All components zero
    pub const ZERO: Self = Self::from_cols([[0.0; 3]; 3]);

    /// Creates a matrix from its columns.
    #[must_use]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self { cols }
    }

    /// Diagonal scale matrix.
    #[must_use]
    pub const fn from_diagonal(d: Vec3) -> Self {
        Self::from_cols([[d.x, 0.0, 0.0], [0.0, d.y, 0.0], [0.0, 0.0, d.z]])
    }

    /// Column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= 3`.
    #[inline]
    #[must_use]
    pub const fn col(&self, c: usize) -> [f32; 3] {
        self.cols[c]
    }

    /// Component at `row`, `col`.
    #[inline]
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col][row]
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        for v in self.cols.iter_mut().flatten() {
            *v *= factor;
        }
        self
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 3]; 3];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..3).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Self::from_cols(out)
    }
}

/// 4x4 matrix, column-major. Used for part position transforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    /// Columns; `cols[c][r]` is row `r` of column `c`.
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self::from_cols([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// All components zero
    pub const ZERO: Self = Self::from_cols([[0.0; 4]; 4]);

    /// Creates a matrix from its columns.
    #[must_use]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Creates a matrix from 16 floats in column order.
    #[must_use]
    pub fn from_cols_array(values: [f32; 16]) -> Self {
        Self::from_cols(bytemuck::cast(values))
    }

    /// Returns the 16 components in column order.
    #[must_use]
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(self.cols)
    }

    /// Translation matrix.
    #[must_use]
    pub const fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    /// Scale matrix.
    #[must_use]
    pub const fn from_scale(s: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = s.x;
        m.cols[1][1] = s.y;
        m.cols[2][2] = s.z;
        m
    }

    /// Embeds a 3x3 linear transform with no translation.
    #[must_use]
    pub const fn from_mat3(m: Mat3) -> Self {
        let [c0, c1, c2] = m.cols;
        Self::from_cols([
            [c0[0], c0[1], c0[2], 0.0],
            [c1[0], c1[1], c1[2], 0.0],
            [c2[0], c2[1], c2[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(&self, c: usize) -> [f32; 4] {
        self.cols[c]
    }

    /// Component at `row`, `col`.
    #[inline]
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col][row]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Self::from_cols(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_matrix_sizes() {
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
        assert_eq!(std::mem::size_of::<Mat3>(), 36);
        assert_eq!(bytemuck::bytes_of(&Mat4::IDENTITY).len(), 64);
    }

    #[test]
    fn test_translation_then_scale() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let s = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        let m = t * s;

        // Scale applies first, translation column untouched
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.col(3), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn test_cols_array_is_column_major() {
        let mut values = [0.0f32; 16];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f32;
        }
        let m = Mat4::from_cols_array(values);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(0, 1), 4.0);
        assert_eq!(m.to_cols_array(), values);
    }

    #[test]
    fn test_quaternion_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        let m = q.to_mat3();

        // X axis rotates onto Y
        let x = m.col(0);
        assert!(approx(x[0], 0.0));
        assert!(approx(x[1], 1.0));
        assert!(approx(x[2], 0.0));

        let back = m * Quaternion::from_axis_angle(Vec3::Z, -std::f32::consts::FRAC_PI_2).to_mat3();
        for c in 0..3 {
            for r in 0..3 {
                assert!(approx(back.get(r, c), Mat3::IDENTITY.get(r, c)));
            }
        }
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(
            Quaternion::from_axis_angle(Vec3::ZERO, 1.0).to_mat3().col(0)[0],
            1.0
        );
    }
}
