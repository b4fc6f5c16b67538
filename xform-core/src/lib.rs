//! xform core library: a 4x4 transform matrix with a save/restore stack
//!
//! Provides composition (translate, scale, rotate, perspective), inversion
//! by cofactor expansion and homogeneous vertex projection over row-major
//! `f64` matrices, plus a bracketed text form for matrices.

pub mod error;
pub mod parse;
pub mod transform;

// Re-export commonly used types
pub use error::{TransformError, TransformResult};
pub use nalgebra::Point3;
pub use transform::{multiply, AsMatrix, Matrix4, Order, Transform, IDENTITY};
