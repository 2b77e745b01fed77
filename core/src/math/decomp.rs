//! Numeric kernels for factoring 3×3 matrices.
//!
//! Both kernels are iterative and report failure to converge by
//! returning `None` rather than panicking.

use crate::math::mat::Mat3;
use crate::math::vec::{Vec3, vec3};
use crate::math::TOLERANCE;

/// Upper bound on Jacobi rotations in [`diagonalize_symmetric`].
const MAX_ROTATIONS: usize = 250;

/// Upper bound on Newton steps in [`polar_decomposition`].
const MAX_POLAR_ITERATIONS: usize = 100;

/// Step size below which the polar iteration is considered converged.
/// Convergence is quadratic, so the final iterate is accurate to
/// roughly the square of this.
const POLAR_STEP_TOLERANCE: f64 = 1e-12;

#[inline]
fn sqrt(x: f64) -> f64 {
    use crate::math::float::f64;
    f64::sqrt(x)
}

/// Computes the eigendecomposition of a symmetric matrix.
///
/// Returns `(Q, λ)` such that `m = Q · diag(λ) · Qᵀ`, where the columns
/// of the orthonormal matrix `Q` are the eigenvectors of `m`. Eigenvalues
/// are in no particular order.
///
/// Uses Jacobi rotations, always pivoting on the largest off-diagonal
/// element. Returns `None` if the off-diagonal mass does not vanish
/// within a fixed number of rotations.
///
/// # Examples
/// ```
/// use voxform_core::math::{Mat3, diagonalize_symmetric};
/// use voxform_core::assert_approx_eq;
///
/// let m: Mat3 = [[2.0, 1.0, 0.0], [1.0, 2.0, 0.0], [0.0, 0.0, 5.0]].into();
/// let (q, l) = diagonalize_symmetric(&m).unwrap();
/// assert_approx_eq!(q * Mat3::from_diagonal(&l) * q.transpose(), m);
/// ```
pub fn diagonalize_symmetric(m: &Mat3) -> Option<(Mat3, Vec3)> {
    let scale = m.l_inf_norm();
    let mut s = *m;
    let mut q = Mat3::identity();

    for _ in 0..=MAX_ROTATIONS {
        let mut off = 0.0;
        let (mut p, mut r, mut max) = (0, 1, 0.0);
        for i in 0..3 {
            for j in i + 1..3 {
                let a = s[i][j].abs();
                // Negligible next to the diagonal, rotating would be noise
                if a <= TOLERANCE * (s[i][i].abs() + s[j][j].abs()) {
                    s[i][j] = 0.0;
                    s[j][i] = 0.0;
                    continue;
                }
                off += a;
                if a > max {
                    (p, r, max) = (i, j, a);
                }
            }
        }
        if off <= TOLERANCE * scale {
            return Some((q, vec3(s[0][0], s[1][1], s[2][2])));
        }
        rotate(&mut s, &mut q, p, r);
    }
    None
}

/// Applies the Jacobi rotation that zeroes `s[p][r]`, accumulating it
/// into the eigenvector matrix `q`. Keeps `s` symmetric.
fn rotate(s: &mut Mat3, q: &mut Mat3, p: usize, r: usize) {
    let (app, arr, apr) = (s[p][p], s[r][r], s[p][r]);

    let theta = (arr - app) / (2.0 * apr);
    let t = if theta >= 0.0 {
        1.0 / (theta + sqrt(1.0 + theta * theta))
    } else {
        -1.0 / (-theta + sqrt(1.0 + theta * theta))
    };
    let c = 1.0 / sqrt(1.0 + t * t);
    let sn = t * c;

    s[p][p] = app - t * apr;
    s[r][r] = arr + t * apr;
    s[p][r] = 0.0;
    s[r][p] = 0.0;

    for k in (0..3).filter(|&k| k != p && k != r) {
        let (skp, skr) = (s[k][p], s[k][r]);
        s[k][p] = c * skp - sn * skr;
        s[p][k] = s[k][p];
        s[k][r] = sn * skp + c * skr;
        s[r][k] = s[k][r];
    }
    for k in 0..3 {
        let (qkp, qkr) = (q[k][p], q[k][r]);
        q[k][p] = c * qkp - sn * qkr;
        q[k][r] = sn * qkp + c * qkr;
    }
}

/// Computes the polar decomposition of a nonsingular matrix.
///
/// Returns `(U, S)` such that `m = U · S`, where `U` is unitary and `S`
/// is symmetric positive definite. If `det m < 0`, `U` is a reflection.
///
/// Uses the scaled Newton iteration
/// ```text
/// Uₖ₊₁ = ½ (γ Uₖ + γ⁻¹ Uₖ⁻ᵀ),   γ = ⁴√(‖Uₖ⁻¹‖₁ ‖Uₖ⁻¹‖∞ / ‖Uₖ‖₁ ‖Uₖ‖∞)
/// ```
/// starting from `U₀ = m`. Returns `None` if `m` is singular or nearly so,
/// or if the iteration does not converge.
pub fn polar_decomposition(m: &Mat3) -> Option<(Mat3, Mat3)> {
    if !(m.determinant().abs() >= TOLERANCE) {
        return None;
    }
    let mut u = *m;
    for _ in 0..MAX_POLAR_ITERATIONS {
        let u_inv = u.inverse()?;
        let gamma = sqrt(sqrt(
            (u_inv.l_one_norm() * u_inv.l_inf_norm())
                / (u.l_one_norm() * u.l_inf_norm()),
        ));
        let next = (u * gamma + u_inv.transpose() * gamma.recip()) * 0.5;
        let step = (u - next).l_inf_norm();
        u = next;
        if step <= POLAR_STEP_TOLERANCE {
            return Some((u, u.transpose() * *m));
        }
    }
    None
}
