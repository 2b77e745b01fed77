//! Factoring matrices into compound maps of elementary parts.
//!
//! Maps act on row vectors, so a linear map `M` is factored as
//! `M = S · U` (first scale, then rotate) rather than the textbook
//! `M = U · S`. The polar decomposition kernel computes the latter,
//! which is why [`create_polar_decomposed_map`] works on `Mᵀ`.

use std::sync::Arc;

use tracing::debug;
use vf::prelude::*;

use crate::compound::{
    CompoundMap, FullyDecomposedMap, PolarDecomposedMap, SymmetricMap,
    UnitaryAndTranslationMap,
};
use crate::error::{MapError, Result};
use crate::linear::{ScaleMap, TranslationMap, UnitaryMap};

/// Factors a symmetric matrix `m = U · diag(λ) · Uᵀ` into a rotation into
/// its eigenbasis, a scale by its eigenvalues, and a rotation back.
///
/// # Errors
/// [`MapError::Arithmetic`] if `m` is not symmetric, if diagonalization
/// fails to converge, or if `m` is singular.
pub fn create_symmetric_map(m: &Mat3) -> Result<Arc<SymmetricMap>> {
    if !m.is_symmetric() {
        return Err(MapError::Arithmetic(
            "3x3 matrix initializing symmetric map was not symmetric",
        ));
    }
    let (u, eigenvalues) = diagonalize_symmetric(m).ok_or(
        MapError::Arithmetic("diagonalization of the symmetric matrix failed"),
    )?;

    let rotation = UnitaryMap::new(u)?;
    let diagonal = ScaleMap::new(eigenvalues)?;
    let first = CompoundMap::new(rotation, diagonal);

    let rotation_inv = UnitaryMap::new(u.transpose())?;
    Ok(Arc::new(SymmetricMap::new(first, rotation_inv)))
}

/// Factors `m` as a symmetric map followed by a rotation.
///
/// # Errors
/// [`MapError::Arithmetic`] if `m` is singular or polar decomposition
/// fails to converge.
pub fn create_polar_decomposed_map(m: &Mat3) -> Result<Arc<PolarDecomposedMap>> {
    // mᵀ = U · S  ⟺  m = S · Uᵀ
    let (unitary, symmetric) = polar_decomposition(&m.transpose()).ok_or(
        MapError::Arithmetic("polar decomposition of transform failed"),
    )?;

    let unitary_map = UnitaryMap::new(unitary.transpose())?;
    let symmetric_map = create_symmetric_map(&symmetric)?;

    Ok(Arc::new(PolarDecomposedMap::new(
        Arc::unwrap_or_clone(symmetric_map),
        unitary_map,
    )))
}

/// Factors an affine matrix into scale along principal axes, then
/// rotation, then translation.
///
/// # Errors
/// [`MapError::Arithmetic`] if `m` is not affine, or if its linear part
/// cannot be [polar decomposed][create_polar_decomposed_map].
pub fn create_fully_decomposed_map(m: &Mat4) -> Result<Arc<FullyDecomposedMap>> {
    if !m.is_affine() {
        return Err(MapError::Arithmetic(
            "4x4 matrix initializing decomposition map was not affine",
        ));
    }
    debug!(?m, "decomposing affine matrix");

    let translate = TranslationMap::new(m.translation());
    let polar = create_polar_decomposed_map(&m.mat3())?;
    let (symmetric, unitary) = Arc::unwrap_or_clone(polar).into_parts();

    let rotation_and_translate = UnitaryAndTranslationMap::new(unitary, translate);

    Ok(Arc::new(FullyDecomposedMap::new(
        symmetric,
        rotation_and_translate,
    )))
}
