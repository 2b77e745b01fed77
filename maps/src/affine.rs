//! General affine maps.

use std::borrow::Cow;
use std::sync::Arc;

use vf::prelude::*;

use crate::error::{MapError, Result};
use crate::map::{IndexToWorld, Map, MapRef, MapType, WorldToIndex};

/// An arbitrary invertible affine map, stored as a 4×4 matrix together
/// with its inverse.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AffineMap {
    matrix: IndexToWorld,
    inverse: WorldToIndex,
}

impl AffineMap {
    /// Returns a new affine map, or an error if `matrix` is not affine
    /// or not invertible.
    pub fn new(matrix: Mat4) -> Result<Self> {
        if !matrix.is_affine() {
            return Err(MapError::Arithmetic(
                "4x4 matrix initializing affine map was not affine",
            ));
        }
        let matrix: IndexToWorld = matrix.to();
        let inverse = matrix
            .inverse()
            .ok_or(MapError::Arithmetic("affine map matrix is singular"))?;
        Ok(Self { matrix, inverse })
    }

    /// Returns the affine map equivalent to `map`.
    pub fn from_map(map: &dyn Map) -> Result<Self> {
        if !map.is_affine() {
            return Err(MapError::Arithmetic("map is not affine"));
        }
        Self::new(map.to_affine())
    }

    pub fn matrix(&self) -> &IndexToWorld {
        &self.matrix
    }
}

impl MapType for AffineMap {
    const NAME: &'static str = "AffineMap";
}

impl Map for AffineMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        self.matrix.apply_point(p)
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        self.inverse.apply_point(p)
    }
    fn is_linear(&self) -> bool {
        true
    }
    /// Whether the whole matrix, translation included, is diagonal.
    fn is_scale(&self) -> bool {
        self.to_affine().is_diagonal()
    }
    /// Whether the linear part of the matrix is diagonal.
    fn is_scale_translate(&self) -> bool {
        self.to_affine().mat3().is_diagonal()
    }
    /// The world space of `self` becomes the index space of the inverse.
    fn inverse(&self) -> MapRef {
        Arc::new(Self {
            matrix: self.inverse.to(),
            inverse: self.matrix.to(),
        })
    }
    fn to_affine(&self) -> Mat4 {
        self.matrix.to()
    }
}
