//! Linear algebra for 3D transforms.
//!
//! Includes [vectors][self::vec], [matrices][mat], the
//! [decomposition kernels][decomp], and utilities such as approximate
//! equality comparisons.
//!
//! Matrices act on *row* vectors: a point `v` is transformed as `v · M`.
//! Consequently the translation of an affine [`Mat4`] is stored in its
//! last row, and composing `A` then `B` is the product `A · B`.

pub use {
    approx::ApproxEq,
    decomp::{diagonalize_symmetric, polar_decomposition},
    mat::{Mat3, Mat4, Matrix, RealToReal},
    vec::{Vec3, Vector, splat, vec3},
};

pub mod approx;
pub mod decomp;
pub mod float;
pub mod mat;
pub mod vec;

/// Machine tolerance for double-precision comparisons against zero.
pub const TOLERANCE: f64 = 1e-15;

/// Looser tolerance used where values have accrued rounding error.
pub const DELTA: f64 = 1e-9;
