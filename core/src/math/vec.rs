//! Real vectors of fixed dimension.

use core::array;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use crate::math::approx::ApproxEq;

/// A vector of `f64` components, used both for points and directions.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Vector<Repr>(pub Repr);

/// A 3-vector with `f64` components.
pub type Vec3 = Vector<[f64; 3]>;

/// Returns a 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vector([x, y, z])
}

/// Returns a vector with all components equal to `s`.
#[inline]
pub fn splat<const N: usize>(s: f64) -> Vector<[f64; N]> {
    Vector([s; N])
}

impl<const N: usize> Vector<[f64; N]> {
    #[inline]
    pub const fn new(els: [f64; N]) -> Self {
        Self(els)
    }

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self([0.0; N])
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f64 {
        use crate::math::float::f64;
        f64::sqrt(self.dot(self))
    }

    /// Returns the component-wise product of `self` and `other`.
    #[inline]
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i] * other.0[i]))
    }

    /// Returns the component-wise quotient of `self` and `other`.
    #[inline]
    pub fn div_elem(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i] / other.0[i]))
    }

    /// Returns the product of the components of `self`.
    #[inline]
    pub fn product(&self) -> f64 {
        self.0.iter().product()
    }
}

impl<const N: usize> Add for Vector<[f64; N]> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> Sub for Vector<[f64; N]> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const N: usize> Neg for Vector<[f64; N]> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(|x| -x))
    }
}

impl<const N: usize> Mul<f64> for Vector<[f64; N]> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self(self.0.map(|x| x * rhs))
    }
}

impl<const N: usize> Index<usize> for Vector<[f64; N]> {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<[f64; N]> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl<const N: usize> From<[f64; N]> for Vector<[f64; N]> {
    #[inline]
    fn from(els: [f64; N]) -> Self {
        Self(els)
    }
}

impl<const N: usize> ApproxEq<Self, f64> for Vector<[f64; N]> {
    fn approx_eq_eps(&self, other: &Self, eps: &f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f64 {
        f64::relative_epsilon()
    }
}

impl<R: Debug> Debug for Vector<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec")?;
        Debug::fmt(&self.0, f)
    }
}
