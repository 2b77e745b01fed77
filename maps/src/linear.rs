//! Elementary linear maps: translations, scales and rotations.

use std::borrow::Cow;
use std::sync::Arc;

use vf::math::TOLERANCE;
use vf::prelude::*;

use crate::error::{MapError, Result};
use crate::map::{Map, MapRef, MapType};

/// Translates points by a fixed offset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TranslationMap {
    translation: Vec3,
}

/// Scales each axis by its own nonzero factor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleMap {
    scale: Vec3,
}

/// Scales all axes by the same nonzero factor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformScaleMap {
    scale: f64,
}

/// Scales each axis, then translates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleTranslateMap {
    scale: Vec3,
    translation: Vec3,
}

/// Scales all axes uniformly, then translates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformScaleTranslateMap {
    scale: f64,
    translation: Vec3,
}

/// Rotates and/or reflects points about the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UnitaryMap {
    matrix: Mat3,
}

fn check_scale(scale: &Vec3) -> Result<()> {
    if scale.0.iter().any(|s| !(s.abs() > TOLERANCE)) {
        return Err(MapError::Arithmetic("non-zero scale values required"));
    }
    Ok(())
}

//
// Inherent impls
//

impl TranslationMap {
    pub fn new(translation: Vec3) -> Self {
        Self { translation }
    }
    pub fn translation(&self) -> Vec3 {
        self.translation
    }
}

impl ScaleMap {
    /// Returns a new scale map, or an error if any component of `scale`
    /// is zero.
    pub fn new(scale: Vec3) -> Result<Self> {
        check_scale(&scale)?;
        Ok(Self { scale })
    }
    pub(crate) fn new_unchecked(scale: Vec3) -> Self {
        Self { scale }
    }
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl UniformScaleMap {
    pub fn new(scale: f64) -> Result<Self> {
        check_scale(&splat(scale))?;
        Ok(Self { scale })
    }
    pub(crate) fn new_unchecked(scale: f64) -> Self {
        Self { scale }
    }
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl ScaleTranslateMap {
    pub fn new(scale: Vec3, translation: Vec3) -> Result<Self> {
        check_scale(&scale)?;
        Ok(Self { scale, translation })
    }
    pub(crate) fn new_unchecked(scale: Vec3, translation: Vec3) -> Self {
        Self { scale, translation }
    }
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
    pub fn translation(&self) -> Vec3 {
        self.translation
    }
}

impl UniformScaleTranslateMap {
    pub fn new(scale: f64, translation: Vec3) -> Result<Self> {
        check_scale(&splat(scale))?;
        Ok(Self { scale, translation })
    }
    pub(crate) fn new_unchecked(scale: f64, translation: Vec3) -> Self {
        Self { scale, translation }
    }
    pub fn scale(&self) -> f64 {
        self.scale
    }
    pub fn translation(&self) -> Vec3 {
        self.translation
    }
}

impl UnitaryMap {
    /// Returns a new unitary map, or an error if `matrix` is not
    /// orthonormal.
    pub fn new(matrix: Mat3) -> Result<Self> {
        if !matrix.is_unitary() {
            return Err(MapError::Arithmetic(
                "matrix initializing unitary map was not unitary",
            ));
        }
        Ok(Self { matrix })
    }

    /// Returns a rotation by `radians` about `axis`, counterclockwise
    /// when looking down the axis towards the origin.
    pub fn from_axis_angle(axis: &Vec3, radians: f64) -> Result<Self> {
        let len = axis.len();
        if len.approx_eq(&0.0) {
            return Err(MapError::Arithmetic("rotation axis must be non-zero"));
        }
        let [x, y, z] = (*axis * len.recip()).0;
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        // Transpose of the column-vector Rodrigues matrix
        let matrix = Mat3::new([
            [t * x * x + c, t * x * y + s * z, t * x * z - s * y],
            [t * x * y - s * z, t * y * y + c, t * y * z + s * x],
            [t * x * z + s * y, t * y * z - s * x, t * z * z + c],
        ]);
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }
}

impl Default for ScaleMap {
    fn default() -> Self {
        Self { scale: splat(1.0) }
    }
}

impl Default for UniformScaleMap {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Default for ScaleTranslateMap {
    fn default() -> Self {
        Self { scale: splat(1.0), translation: Vec3::zero() }
    }
}

impl Default for UniformScaleTranslateMap {
    fn default() -> Self {
        Self { scale: 1.0, translation: Vec3::zero() }
    }
}

//
// Map impls
//

impl MapType for TranslationMap {
    const NAME: &'static str = "TranslationMap";
}

impl Map for TranslationMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        *p + self.translation
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        *p - self.translation
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn is_scale_translate(&self) -> bool {
        true
    }
    fn is_uniform_scale_translate(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        Arc::new(Self::new(-self.translation))
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&Mat3::identity(), &self.translation)
    }
    fn determinant(&self) -> f64 {
        1.0
    }
}

impl MapType for ScaleMap {
    const NAME: &'static str = "ScaleMap";
}

impl Map for ScaleMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        p.mul_elem(&self.scale)
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        p.div_elem(&self.scale)
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn is_scale(&self) -> bool {
        true
    }
    fn is_scale_translate(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        Arc::new(Self::new_unchecked(splat(1.0).div_elem(&self.scale)))
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&Mat3::from_diagonal(&self.scale), &Vec3::zero())
    }
    fn determinant(&self) -> f64 {
        self.scale.product()
    }
    fn voxel_size(&self) -> Vec3 {
        Vec3::new(self.scale.0.map(f64::abs))
    }
}

impl MapType for UniformScaleMap {
    const NAME: &'static str = "UniformScaleMap";
}

impl Map for UniformScaleMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        *p * self.scale
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        *p * self.scale.recip()
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn is_scale(&self) -> bool {
        true
    }
    fn is_scale_translate(&self) -> bool {
        true
    }
    fn is_uniform_scale(&self) -> bool {
        true
    }
    fn is_uniform_scale_translate(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        Arc::new(Self::new_unchecked(self.scale.recip()))
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&(Mat3::identity() * self.scale), &Vec3::zero())
    }
    fn determinant(&self) -> f64 {
        self.scale.powi(3)
    }
    fn voxel_size(&self) -> Vec3 {
        splat(self.scale.abs())
    }
}

impl MapType for ScaleTranslateMap {
    const NAME: &'static str = "ScaleTranslateMap";
}

impl Map for ScaleTranslateMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        p.mul_elem(&self.scale) + self.translation
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        (*p - self.translation).div_elem(&self.scale)
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn is_scale_translate(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        let inv_scale = splat(1.0).div_elem(&self.scale);
        let inv_translation = -self.translation.mul_elem(&inv_scale);
        Arc::new(Self::new_unchecked(inv_scale, inv_translation))
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&Mat3::from_diagonal(&self.scale), &self.translation)
    }
    fn determinant(&self) -> f64 {
        self.scale.product()
    }
    fn voxel_size(&self) -> Vec3 {
        Vec3::new(self.scale.0.map(f64::abs))
    }
}

impl MapType for UniformScaleTranslateMap {
    const NAME: &'static str = "UniformScaleTranslateMap";
}

impl Map for UniformScaleTranslateMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        *p * self.scale + self.translation
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        (*p - self.translation) * self.scale.recip()
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn is_scale_translate(&self) -> bool {
        true
    }
    fn is_uniform_scale_translate(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        let inv_scale = self.scale.recip();
        Arc::new(Self::new_unchecked(inv_scale, -self.translation * inv_scale))
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&(Mat3::identity() * self.scale), &self.translation)
    }
    fn determinant(&self) -> f64 {
        self.scale.powi(3)
    }
    fn voxel_size(&self) -> Vec3 {
        splat(self.scale.abs())
    }
}

impl MapType for UnitaryMap {
    const NAME: &'static str = "UnitaryMap";
}

impl Map for UnitaryMap {
    fn map_type(&self) -> Cow<'static, str> {
        Self::NAME.into()
    }
    fn apply_map(&self, p: &Vec3) -> Vec3 {
        self.matrix.apply(p)
    }
    fn apply_inverse_map(&self, p: &Vec3) -> Vec3 {
        self.matrix.transpose().apply(p)
    }
    fn is_linear(&self) -> bool {
        true
    }
    fn inverse(&self) -> MapRef {
        Arc::new(Self { matrix: self.matrix.transpose() })
    }
    fn to_affine(&self) -> Mat4 {
        Mat4::from_mat3_translation(&self.matrix, &Vec3::zero())
    }
    fn voxel_size(&self) -> Vec3 {
        splat(1.0)
    }
}
