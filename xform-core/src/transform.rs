//! 4x4 transformation matrices with a save/restore stack
//!
//! Matrices are stored as 16 `f64` values in row-major order. Every
//! transformation mutates the current matrix in place; [`Transform::push`]
//! and [`Transform::pop`] save and restore it for hierarchical composition.

use log::debug;
use nalgebra as na;
use nalgebra::Point3;

use crate::error::{TransformError, TransformResult};

/// 16 values of a 4x4 matrix in row-major order
pub type Matrix4 = [f64; 16];

/// The 4x4 identity matrix
pub const IDENTITY: Matrix4 = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, //
];

/// Which side of the current matrix a new transform is multiplied on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// `current = current * other`
    #[default]
    Post,
    /// `current = other * current`
    Pre,
}

/// Anything that can be read as a row-major 4x4 matrix
pub trait AsMatrix {
    fn as_matrix(&self) -> &Matrix4;
}

impl AsMatrix for Matrix4 {
    fn as_matrix(&self) -> &Matrix4 {
        self
    }
}

impl AsMatrix for Transform {
    fn as_matrix(&self) -> &Matrix4 {
        &self.values
    }
}

/// Row-major product `a * b`
pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut result = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i * 4 + j] += a[i * 4 + k] * b[k * 4 + j];
            }
        }
    }
    result
}

/// A current 4x4 matrix plus a stack of saved snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    values: Matrix4,
    stack: Vec<Matrix4>,
}

impl Transform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self::from(IDENTITY)
    }

    /// Create a transform from exactly 16 row-major values
    pub fn from_values(values: &[f64]) -> TransformResult<Self> {
        let matrix: Matrix4 = values
            .try_into()
            .map_err(|_| TransformError::InvalidArgument {
                expected: 16,
                actual: values.len(),
            })?;
        Ok(Self::from(matrix))
    }

    /// The current matrix
    pub fn values(&self) -> &Matrix4 {
        &self.values
    }

    /// Number of saved snapshots
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current values narrowed to `f32`, ready for a uniform upload
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.values.map(|v| v as f32)
    }

    /// Save a copy of the current matrix
    pub fn push(&mut self) {
        self.stack.push(self.values);
    }

    /// Restore the most recently saved matrix
    pub fn pop(&mut self) -> TransformResult<()> {
        match self.stack.pop() {
            Some(values) => {
                self.values = values;
                Ok(())
            }
            None => {
                debug!("pop on empty transform stack");
                Err(TransformError::EmptyStack)
            }
        }
    }

    /// Multiply the current matrix by `other` on the side given by `order`
    pub fn multiply_by<M: AsMatrix + ?Sized>(&mut self, other: &M, order: Order) -> &mut Self {
        let other = other.as_matrix();
        self.values = match order {
            Order::Post => multiply(&self.values, other),
            Order::Pre => multiply(other, &self.values),
        };
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64, order: Order) -> &mut Self {
        self.multiply_by(
            &[
                1.0, 0.0, 0.0, tx, //
                0.0, 1.0, 0.0, ty, //
                0.0, 0.0, 1.0, tz, //
                0.0, 0.0, 0.0, 1.0, //
            ],
            order,
        )
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64, order: Order) -> &mut Self {
        self.multiply_by(
            &[
                sx, 0.0, 0.0, 0.0, //
                0.0, sy, 0.0, 0.0, //
                0.0, 0.0, sz, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
            ],
            order,
        )
    }

    /// Rotate about the X axis by `angle` degrees
    pub fn rotate_x(&mut self, angle: f64, order: Order) -> &mut Self {
        let (s, c) = radians(angle).sin_cos();
        self.multiply_by(
            &[
                1.0, 0.0, 0.0, 0.0, //
                0.0, c, -s, 0.0, //
                0.0, s, c, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
            ],
            order,
        )
    }

    /// Rotate about the Y axis by `angle` degrees
    pub fn rotate_y(&mut self, angle: f64, order: Order) -> &mut Self {
        let (s, c) = radians(angle).sin_cos();
        self.multiply_by(
            &[
                c, 0.0, s, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                -s, 0.0, c, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
            ],
            order,
        )
    }

    /// Rotate about the Z axis by `angle` degrees
    pub fn rotate_z(&mut self, angle: f64, order: Order) -> &mut Self {
        let (s, c) = radians(angle).sin_cos();
        self.multiply_by(
            &[
                c, -s, 0.0, 0.0, //
                s, c, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
            ],
            order,
        )
    }

    /// Post-multiply by a symmetric-frustum perspective projection
    ///
    /// A degenerate frustum (`near == far`, `top == 0` or `right == 0`)
    /// divides by zero and leaves non-finite values in the matrix. Later
    /// inversion of such a matrix does not report `SingularMatrix`.
    pub fn perspective(&mut self, near: f64, far: f64, top: f64, right: f64) -> &mut Self {
        let (n, f, t, r) = (near, far, top, right);
        if n == f || t == 0.0 || r == 0.0 {
            debug!(
                "degenerate frustum near={} far={} top={} right={}",
                n, f, t, r
            );
        }
        self.multiply_by(
            &[
                n / r, 0.0, 0.0, 0.0, //
                0.0, n / t, 0.0, 0.0, //
                0.0, 0.0, (n + f) / (n - f), 2.0 * n * f / (n - f), //
                0.0, 0.0, -1.0, 0.0, //
            ],
            Order::Post,
        )
    }

    /// Invert the current matrix by cofactor expansion
    ///
    /// Term groupings follow Mesa's `gluInvertMatrixd`. A zero determinant
    /// leaves the matrix untouched and returns [`TransformError::SingularMatrix`].
    pub fn invert(&mut self) -> TransformResult<&mut Self> {
        let m = &self.values;
        let mut inv = [0.0; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];

        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];

        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];

        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];

        if det == 0.0 {
            debug!("refusing to invert singular matrix {:?}", m);
            return Err(TransformError::SingularMatrix);
        }

        inv[0] /= det;
        inv[4] /= det;
        inv[8] /= det;
        inv[12] /= det;

        inv[1] = (-m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10])
            / det;

        inv[5] = (m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10])
            / det;

        inv[9] = (-m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9])
            / det;

        inv[13] = (m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9])
            / det;

        inv[2] = (m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6])
            / det;

        inv[6] = (-m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6])
            / det;

        inv[10] = (m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5])
            / det;

        inv[14] = (-m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5])
            / det;

        inv[3] = (-m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6])
            / det;

        inv[7] = (m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6])
            / det;

        inv[11] = (-m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5])
            / det;

        inv[15] = (m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5])
            / det;

        self.values = inv;
        Ok(self)
    }

    /// The inverse as a new transform, leaving `self` untouched
    pub fn inverted(&self) -> TransformResult<Transform> {
        let mut inverse = Transform::from(self.values);
        inverse.invert()?;
        Ok(inverse)
    }

    /// Project a point through the current matrix with `w = 1`
    ///
    /// The perspective divide is always applied, even for affine matrices.
    /// Only an exactly zero `w` is an error: a tiny nonzero `w` returns `Ok`
    /// with infinite coordinates, so check `is_finite` on the result when
    /// projecting near the eye plane.
    pub fn apply_to_vertex(&self, v: &Point3<f64>) -> TransformResult<Point3<f64>> {
        let m = &self.values;
        let w = m[12] * v.x + m[13] * v.y + m[14] * v.z + m[15];

        if w == 0.0 {
            debug!("vertex {:?} projects to w = 0", v);
            return Err(TransformError::DivisionByZero);
        }

        Ok(Point3::new(
            (m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3]) / w,
            (m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7]) / w,
            (m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11]) / w,
        ))
    }
}

fn radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Matrix4> for Transform {
    fn from(values: Matrix4) -> Self {
        Self {
            values,
            stack: Vec::new(),
        }
    }
}

impl From<&Transform> for na::Matrix4<f64> {
    fn from(transform: &Transform) -> Self {
        na::Matrix4::from_row_slice(&transform.values)
    }
}

impl From<na::Matrix4<f64>> for Transform {
    fn from(matrix: na::Matrix4<f64>) -> Self {
        let mut values = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                values[row * 4 + col] = matrix[(row, col)];
            }
        }
        Self::from(values)
    }
}
