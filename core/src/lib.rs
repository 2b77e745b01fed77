//! Core math of the `voxform` project.
//!
//! Includes small fixed-size matrices and vectors in double precision,
//! approximate equality comparisons, and the numeric kernels used to
//! factor linear transforms: symmetric eigendecomposition and polar
//! decomposition.
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of `std`.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! All features are disabled by default. Without `std` or `libm`, a
//! Newton iteration fallback is used for square roots.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod math;

pub mod prelude {
    pub use crate::math::{
        approx::ApproxEq,
        decomp::{diagonalize_symmetric, polar_decomposition},
        mat::{Mat3, Mat4, Matrix, RealToReal},
        vec::{splat, vec3, Vec3, Vector},
    };
}
