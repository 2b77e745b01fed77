//! Floating-point compatibility API.
//!
//! `sqrt` is unavailable in `no_std`. This module provides it using the
//! `libm` crate if the corresponding feature is enabled. As a fallback,
//! it also implements it even if no feature is enabled.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::sqrt;
}

pub mod fallback {
    /// Returns the square root of `x`, or NaN if `x` is negative.
    ///
    /// Halving the exponent bits gives a first guess within a few percent,
    /// which six rounds of Newton's method refine to full precision.
    #[inline]
    pub fn sqrt(x: f64) -> f64 {
        if x.is_nan() || x < 0.0 {
            return f64::NAN;
        }
        if x == 0.0 || x == f64::INFINITY {
            return x;
        }
        const MAGIC: u64 = 0x1ff8_0000_0000_0000;
        let mut y = f64::from_bits((x.to_bits() >> 1) + MAGIC);
        for _ in 0..6 {
            y = 0.5 * (y + x / y);
        }
        y
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f64 = core::primitive::f64;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f64;

#[cfg(not(feature = "fp"))]
pub use fallback as f64;
