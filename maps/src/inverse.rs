//! Inverting possibly singular affine matrices.

use tracing::warn;
use vf::math::TOLERANCE;
use vf::prelude::*;

/// Absolute tolerance of the symmetry test in [`approx_inverse`].
const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Returns the inverse of the affine matrix `m`, or an approximation of
/// it if `m` is singular. Never fails.
///
/// A comfortably nonsingular `m` is inverted exactly. Otherwise, or if
/// exact inversion fails anyway, the result depends on the linear part
/// of `m`. If it is symmetric, the result is built from its Moore–Penrose
/// pseudo-inverse: eigenvalues too close to zero are treated as zero,
/// projecting out the null space.
///
/// If the linear part is not symmetric, or its eigendecomposition does
/// not converge, the result is a crude stand-in: a zero linear part with
/// the translation negated. The caller cannot tell this case apart from
/// an exact inverse.
pub fn approx_inverse(m: &Mat4) -> Mat4 {
    if m.determinant().abs() >= 3.0 * TOLERANCE {
        if let Some(inv) = m.inverse() {
            return inv;
        }
    }

    let mat3 = m.mat3();
    let trans = m.translation();

    let symmetric = (0..3).all(|i| {
        (0..3).all(|j| (mat3[i][j] - mat3[j][i]).abs() <= SYMMETRY_TOLERANCE)
    });
    if !symmetric {
        warn!(?m, "singular non-symmetric matrix, approximating inverse");
        return degenerate_inverse(&trans);
    }
    pseudo_inverse(&mat3, &trans).unwrap_or_else(|| {
        warn!(?m, "eigendecomposition did not converge, approximating inverse");
        degenerate_inverse(&trans)
    })
}

/// Returns the affine inverse built from the pseudo-inverse of the
/// symmetric `mat3`, or `None` if `mat3` cannot be diagonalized.
///
/// Finite symmetric input always converges; non-finite elements do not.
fn pseudo_inverse(mat3: &Mat3, trans: &Vec3) -> Option<Mat4> {
    let (eigenvectors, eigenvalues) = diagonalize_symmetric(mat3)?;
    let d = Vec3::new(eigenvalues.0.map(|l| {
        if l.abs() < 10.0 * TOLERANCE { 0.0 } else { 1.0 / l }
    }));
    let pseudo_inv =
        eigenvectors * Mat3::from_diagonal(&d) * eigenvectors.transpose();
    let inv_trans = pseudo_inv.apply(&-*trans);

    Some(Mat4::from_mat3_translation(&pseudo_inv, &inv_trans))
}

fn degenerate_inverse(trans: &Vec3) -> Mat4 {
    let mut res = Mat4::zero();
    res.set_translation(&-*trans);
    res[3][3] = 1.0;
    res
}
