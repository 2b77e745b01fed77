//! Matrices and linear transforms.
//!
//! Matrices are stored row-major and act on row vectors from the right,
//! so that `v · A · B` applies `A` first and `B` second.
//!
//! A matrix may be tagged with the kind of map it represents, such as
//! [`RealToReal`], to keep matrices between different spaces apart.
//! Untagged matrices use the unit tag `()` and support the full set of
//! arithmetic operations.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Index, IndexMut, Mul, Sub};

use crate::math::approx::ApproxEq;
use crate::math::vec::{Vec3, Vector, vec3};

/// Tag for an affine map from `DIM`-dimensional `Src` space to
/// `DIM`-dimensional `Dst` space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RealToReal<const DIM: usize, Src = (), Dst = ()>(
    PhantomData<(Src, Dst)>,
);

#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct Matrix<Repr, Map = ()>(pub Repr, PhantomData<Map>);

/// A 3×3 matrix, representing a linear map of 3-space.
pub type Mat3 = Matrix<[[f64; 3]; 3]>;
/// A 4×4 matrix, representing an affine map of 3-space.
pub type Mat4 = Matrix<[[f64; 4]; 4]>;

impl<const N: usize, M> Matrix<[[f64; N]; N], M> {
    pub const fn new(els: [[f64; N]; N]) -> Self {
        Self(els, PhantomData)
    }

    /// Returns the matrix with all elements zero.
    pub const fn zero() -> Self {
        Self::new([[0.0; N]; N])
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| (i == j) as u8 as f64)))
    }

    /// Returns `self` with the same elements but tagged as map `U`.
    #[inline]
    pub fn to<U>(&self) -> Matrix<[[f64; N]; N], U> {
        Matrix(self.0, PhantomData)
    }
}

impl<const N: usize> Matrix<[[f64; N]; N]> {
    #[inline]
    pub fn row(&self, i: usize) -> Vector<[f64; N]> {
        Vector(self.0[i])
    }

    #[inline]
    pub fn col(&self, j: usize) -> Vector<[f64; N]> {
        Vector(array::from_fn(|i| self.0[i][j]))
    }

    pub fn transpose(&self) -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| self.0[j][i])))
    }

    /// Returns the row vector `v · self`.
    #[inline]
    pub fn apply(&self, v: &Vector<[f64; N]>) -> Vector<[f64; N]> {
        Vector(array::from_fn(|j| v.dot(&self.col(j))))
    }

    /// Returns the maximum absolute row sum of `self`.
    pub fn l_inf_norm(&self) -> f64 {
        self.0
            .iter()
            .map(|r| r.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Returns the maximum absolute column sum of `self`.
    pub fn l_one_norm(&self) -> f64 {
        self.transpose().l_inf_norm()
    }

    /// Returns whether `self` equals its transpose within the default
    /// relative epsilon.
    pub fn is_symmetric(&self) -> bool {
        self.approx_eq(&self.transpose())
    }

    /// Returns whether every off-diagonal element of `self` is
    /// approximately zero.
    pub fn is_diagonal(&self) -> bool {
        let mut off = 0.0;
        for i in 0..N {
            for j in 0..N {
                if i != j {
                    off += self.0[i][j].abs();
                }
            }
        }
        off.approx_eq(&0.0)
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::identity())
    }

    /// Returns whether `self · selfᵀ` is the identity, that is, whether
    /// `self` is a rotation or a reflection.
    pub fn is_unitary(&self) -> bool {
        (*self * self.transpose()).is_identity()
    }

    /// Returns the inverse of `self`, or `None` if `self` is singular.
    ///
    /// Uses Gauss–Jordan elimination with partial pivoting. Only an exactly
    /// zero (or NaN) pivot counts as singular; a badly conditioned matrix
    /// still gets its, possibly inaccurate, inverse.
    pub fn inverse(&self) -> Option<Self> {
        fn sub_row<const N: usize>(
            m: &mut [[f64; N]; N],
            from: usize,
            to: usize,
            mul: f64,
        ) {
            for j in 0..N {
                m[to][j] -= m[from][j] * mul;
            }
        }

        let mut this = self.0;
        let mut inv = Self::identity().0;

        for idx in 0..N {
            let pivot = (idx..N).max_by(|&r1, &r2| {
                let v1 = this[r1][idx].abs();
                let v2 = this[r2][idx].abs();
                v1.total_cmp(&v2)
            })?;

            if !(this[pivot][idx].abs() > 0.0) {
                return None;
            }
            this.swap(idx, pivot);
            inv.swap(idx, pivot);

            let div = 1.0 / this[idx][idx];
            for r in (0..N).filter(|&r| r != idx) {
                let x = this[r][idx] * div;
                sub_row(&mut this, idx, r, x);
                sub_row(&mut inv, idx, r, x);
            }
        }
        // normalize
        for r in 0..N {
            let x = 1.0 / this[r][r];
            inv[r] = inv[r].map(|e| e * x);
        }
        Some(Self::new(inv))
    }
}

impl Mat3 {
    /// Returns a diagonal matrix with the components of `d` on the diagonal.
    pub fn from_diagonal(d: &Vec3) -> Self {
        let [x, y, z] = d.0;
        Self::new([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]])
    }

    pub fn determinant(&self) -> f64 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.0;
        a * (e * i - f * h) + b * (f * g - d * i) + c * (d * h - e * g)
    }
}

impl Mat4 {
    /// Returns the affine matrix with linear part `m` and translation `t`.
    pub fn from_mat3_translation(m: &Mat3, t: &Vec3) -> Self {
        let mut res = Self::identity();
        res.set_mat3(m);
        res.set_translation(t);
        res
    }

    /// Returns the upper-left 3×3 block of `self`.
    pub fn mat3(&self) -> Mat3 {
        Matrix::new(array::from_fn(|i| array::from_fn(|j| self.0[i][j])))
    }

    pub fn set_mat3(&mut self, m: &Mat3) {
        for i in 0..3 {
            self.0[i][..3].copy_from_slice(&m.0[i]);
        }
    }

    /// Returns the translation stored in the last row of `self`.
    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.0[3];
        vec3(x, y, z)
    }

    pub fn set_translation(&mut self, t: &Vec3) {
        self.0[3][..3].copy_from_slice(&t.0);
    }

    /// Returns whether `self` represents an affine map, that is, whether
    /// its last column is `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.col(3).0.approx_eq(&[0.0, 0.0, 0.0, 1.0])
    }

    /// Transforms the point `p`, treated as the row vector `[p, 1]`.
    pub fn apply_point(&self, p: &Vec3) -> Vec3 {
        let [x, y, z] = p.0;
        let v = Vector([x, y, z, 1.0]);
        let [x, y, z, _] = self.apply(&v).0;
        vec3(x, y, z)
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, c, d] = self.0[0];

        let det3 = |j, k, l| {
            let [r, s, t] = [&self.0[1], &self.0[2], &self.0[3]];
            let [a, b, c] = [r[j], r[k], r[l]];
            let [d, e, f] = [s[j], s[k], s[l]];
            let [g, h, i] = [t[j], t[k], t[l]];

            a * (e * i - f * h) + b * (f * g - d * i) + c * (d * h - e * g)
        };

        a * det3(1, 2, 3) - b * det3(0, 2, 3) + c * det3(0, 1, 3)
            - d * det3(0, 1, 2)
    }
}

impl<Src, Dst> Matrix<[[f64; 4]; 4], RealToReal<3, Src, Dst>> {
    /// Maps the point `p` from `Src` space to `Dst` space.
    pub fn apply_point(&self, p: &Vec3) -> Vec3 {
        self.to::<()>().apply_point(p)
    }

    /// Returns the map from `Dst` space back to `Src` space, or `None`
    /// if `self` is singular.
    pub fn inverse(
        &self,
    ) -> Option<Matrix<[[f64; 4]; 4], RealToReal<3, Dst, Src>>> {
        self.to::<()>().inverse().map(|inv| inv.to())
    }
}

impl<const N: usize> Mul for Matrix<[[f64; N]; N]> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| {
            array::from_fn(|j| self.row(i).dot(&rhs.col(j)))
        }))
    }
}

impl<const N: usize> Mul<f64> for Matrix<[[f64; N]; N]> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0.map(|r| r.map(|x| x * rhs)))
    }
}

impl<const N: usize> Add for Matrix<[[f64; N]; N]> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| self.0[i][j] + rhs.0[i][j])))
    }
}

impl<const N: usize> Sub for Matrix<[[f64; N]; N]> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(array::from_fn(|i| array::from_fn(|j| self.0[i][j] - rhs.0[i][j])))
    }
}

impl<const N: usize, M> Index<usize> for Matrix<[[f64; N]; N], M> {
    type Output = [f64; N];

    fn index(&self, i: usize) -> &[f64; N] {
        &self.0[i]
    }
}

impl<const N: usize, M> IndexMut<usize> for Matrix<[[f64; N]; N], M> {
    fn index_mut(&mut self, i: usize) -> &mut [f64; N] {
        &mut self.0[i]
    }
}

impl<const N: usize, M> Default for Matrix<[[f64; N]; N], M> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize, M> Debug for Matrix<[[f64; N]; N], M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix[")?;
        for i in 0..N {
            writeln!(f, "    {:6.2?}", self.0[i])?;
        }
        write!(f, "]")
    }
}

impl<const N: usize, M> From<[[f64; N]; N]> for Matrix<[[f64; N]; N], M> {
    fn from(els: [[f64; N]; N]) -> Self {
        Self::new(els)
    }
}

impl<const N: usize, M> ApproxEq<Self, f64> for Matrix<[[f64; N]; N], M> {
    fn approx_eq_eps(&self, other: &Self, eps: &f64) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f64 {
        f64::relative_epsilon()
    }
}
